//! Settings keys
//!
//! Keys are two ASCII characters packed little-endian into a `u16`, so a
//! dump of the settings region stays readable.

/// Key identifying one entry in a keyed settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingsKey(pub u16);

impl SettingsKey {
    /// Erased-storage pattern; never a valid key
    pub const INVALID: SettingsKey = SettingsKey(0xFFFF);

    /// EUI-64 hardware address
    pub const EUI64: SettingsKey = SettingsKey::from_chars(b'E', b'8');
    /// Radio channel
    pub const CHANNEL: SettingsKey = SettingsKey::from_chars(b'C', b'H');
    /// Transmit power
    pub const TX_POWER: SettingsKey = SettingsKey::from_chars(b'T', b'P');
    /// PAN identifier
    pub const PAN_ID: SettingsKey = SettingsKey::from_chars(b'P', b'N');
    /// PAN short address
    pub const PAN_ADDRESS: SettingsKey = SettingsKey::from_chars(b'P', b'A');

    /// Packs two characters into a key
    pub const fn from_chars(first: u8, second: u8) -> Self {
        SettingsKey(u16::from_le_bytes([first, second]))
    }

    /// Returns false for the erased pattern
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    /// Little-endian byte form, as stored
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::types::Parameter;

    #[test]
    fn test_key_packing() {
        assert_eq!(SettingsKey::CHANNEL.to_bytes(), *b"CH");
        assert_eq!(SettingsKey::EUI64.to_bytes(), *b"E8");
        assert!(SettingsKey::CHANNEL.is_valid());
        assert!(!SettingsKey::INVALID.is_valid());
    }

    #[test]
    fn test_parameter_keys_are_distinct() {
        for (i, a) in Parameter::ALL.iter().enumerate() {
            for b in &Parameter::ALL[i + 1..] {
                assert_ne!(a.settings_key(), b.settings_key());
            }
            assert!(a.settings_key().is_valid());
        }
    }
}
