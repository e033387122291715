//! Radio parameter types
//!
//! The node persists exactly five parameters. Each has a compile-time default
//! and a runtime-resolved value.

use super::keys::SettingsKey;

/// Lowest valid IEEE 802.15.4 channel in the 2.4 GHz band
pub const CHANNEL_MIN: u8 = 11;

/// Highest valid IEEE 802.15.4 channel in the 2.4 GHz band
pub const CHANNEL_MAX: u8 = 26;

/// Built-in default channel
pub const DEFAULT_CHANNEL: u8 = 26;

/// Built-in default PAN identifier
pub const DEFAULT_PAN_ID: u16 = 0xABCD;

/// Built-in default PAN short address
pub const DEFAULT_PAN_ADDRESS: u16 = 0;

/// Built-in default transmit power (0 = maximum)
pub const DEFAULT_TX_POWER: u8 = 0;

/// Built-in default hardware address.
///
/// Locally administered, with the `FF:FE` expansion in bytes 3-4 so the
/// 6LoWPAN header can be fully compressed from the link-layer address.
pub const DEFAULT_EUI64: Eui64 = [0x02, 0x00, 0x00, 0xFF, 0xFE, 0x00, 0x00, 0x01];

/// 8-byte EUI-64 hardware address
pub type Eui64 = [u8; 8];

/// Returns true if `channel` lies in `CHANNEL_MIN..=CHANNEL_MAX`.
pub const fn is_valid_channel(channel: u8) -> bool {
    channel >= CHANNEL_MIN && channel <= CHANNEL_MAX
}

/// The five persistent parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Radio channel (1 byte, 11..=26)
    Channel,
    /// EUI-64 hardware address (8 bytes)
    HardwareAddress,
    /// PAN identifier (2 bytes)
    PanId,
    /// PAN short address (2 bytes)
    PanAddress,
    /// Transmit power (1 byte, 0 = maximum)
    TxPower,
}

impl Parameter {
    /// All parameters, channel first
    pub const ALL: [Parameter; 5] = [
        Parameter::Channel,
        Parameter::HardwareAddress,
        Parameter::PanId,
        Parameter::PanAddress,
        Parameter::TxPower,
    ];

    /// Settings key this parameter is stored under
    pub const fn settings_key(self) -> SettingsKey {
        match self {
            Parameter::Channel => SettingsKey::CHANNEL,
            Parameter::HardwareAddress => SettingsKey::EUI64,
            Parameter::PanId => SettingsKey::PAN_ID,
            Parameter::PanAddress => SettingsKey::PAN_ADDRESS,
            Parameter::TxPower => SettingsKey::TX_POWER,
        }
    }

    /// Short human-readable name used in log output
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Channel => "channel",
            Parameter::HardwareAddress => "eui64",
            Parameter::PanId => "pan_id",
            Parameter::PanAddress => "pan_addr",
            Parameter::TxPower => "tx_power",
        }
    }
}

/// Compiled default values for every parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDefaults {
    /// Default radio channel
    pub channel: u8,
    /// Default hardware address
    pub eui64: Eui64,
    /// Default PAN identifier
    pub pan_id: u16,
    /// Default PAN short address
    pub pan_address: u16,
    /// Default transmit power
    pub tx_power: u8,
}

impl ParamDefaults {
    /// Built-in defaults, used when the build does not override them
    pub const BUILTIN: Self = Self {
        channel: DEFAULT_CHANNEL,
        eui64: DEFAULT_EUI64,
        pan_id: DEFAULT_PAN_ID,
        pan_address: DEFAULT_PAN_ADDRESS,
        tx_power: DEFAULT_TX_POWER,
    };

    /// Same defaults with an out-of-range channel replaced by
    /// `DEFAULT_CHANNEL`
    pub const fn with_valid_channel(mut self) -> Self {
        if !is_valid_channel(self.channel) {
            self.channel = DEFAULT_CHANNEL;
        }
        self
    }
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self::BUILTIN
    }
}

/// Hardware address as answered by a parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareAddress {
    /// Address bytes
    pub bytes: Eui64,
    /// True if the address was generated during this session
    pub freshly_generated: bool,
}

impl HardwareAddress {
    /// Address taken from storage or compiled defaults
    pub const fn stored(bytes: Eui64) -> Self {
        Self {
            bytes,
            freshly_generated: false,
        }
    }

    /// Address generated during this session
    pub const fn generated(bytes: Eui64) -> Self {
        Self {
            bytes,
            freshly_generated: true,
        }
    }
}
