//! Mock keyed settings store for testing

use heapless::Vec;
use micropnp_core::parameters::SettingsKey;

use crate::platform::{error::SettingsError, traits::SettingsInterface, Result};

/// Maximum number of entries the mock holds
pub const MOCK_SETTINGS_ENTRIES: usize = 16;

/// Maximum entry size
pub const MOCK_SETTINGS_VALUE_LEN: usize = 32;

/// One stored entry
#[derive(Debug, Clone)]
struct Entry {
    key: SettingsKey,
    value: Vec<u8, MOCK_SETTINGS_VALUE_LEN>,
}

/// Mock keyed settings store
///
/// Keeps entries in insertion order; `get` with index `n` returns the
/// `n`-th entry stored under the key. Counts lookups and additions, and can
/// be told to fail every `add`.
#[derive(Debug, Clone, Default)]
pub struct MockSettings {
    entries: Vec<Entry, MOCK_SETTINGS_ENTRIES>,
    gets: u32,
    adds: u32,
    fail_adds: bool,
}

impl MockSettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload an entry without counting it as an `add`
    pub fn preload(&mut self, key: SettingsKey, value: &[u8]) {
        let mut stored = Vec::new();
        let _ = stored.extend_from_slice(value);
        let _ = self.entries.push(Entry { key, value: stored });
    }

    /// Make every subsequent `add` fail (or succeed again)
    pub fn set_fail_adds(&mut self, fail: bool) {
        self.fail_adds = fail;
    }

    /// Number of `get` calls so far
    pub fn get_count(&self) -> u32 {
        self.gets
    }

    /// Number of successful `add` calls so far
    pub fn add_count(&self) -> u32 {
        self.adds
    }

    /// Number of entries stored under `key`
    pub fn entries_for(&self, key: SettingsKey) -> usize {
        self.entries.iter().filter(|e| e.key == key).count()
    }

    /// First entry stored under `key`, if any
    pub fn value(&self, key: SettingsKey) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_slice())
    }
}

impl SettingsInterface for MockSettings {
    fn get(&mut self, key: SettingsKey, index: u8, buf: &mut [u8]) -> Result<usize> {
        self.gets += 1;

        let entry = self
            .entries
            .iter()
            .filter(|e| e.key == key)
            .nth(index as usize)
            .ok_or(SettingsError::NotFound)?;

        let len = entry.value.len();
        if buf.len() < len {
            return Err(SettingsError::ValueTooBig.into());
        }
        buf[..len].copy_from_slice(&entry.value);
        Ok(len)
    }

    fn add(&mut self, key: SettingsKey, value: &[u8]) -> Result<()> {
        if !key.is_valid() {
            return Err(SettingsError::InvalidKey.into());
        }
        if self.fail_adds {
            return Err(SettingsError::Failure.into());
        }

        let mut stored = Vec::new();
        stored
            .extend_from_slice(value)
            .map_err(|_| SettingsError::ValueTooBig)?;
        self.entries
            .push(Entry { key, value: stored })
            .map_err(|_| SettingsError::StorageFull)?;
        self.adds += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_settings_miss() {
        let mut settings = MockSettings::new();
        let mut buf = [0u8; 2];
        assert_eq!(
            settings.get(SettingsKey::CHANNEL, 0, &mut buf),
            Err(SettingsError::NotFound.into())
        );
        assert_eq!(settings.get_count(), 1);
    }

    #[test]
    fn test_mock_settings_indexed_entries() {
        let mut settings = MockSettings::new();
        settings.add_u8(SettingsKey::CHANNEL, 15).unwrap();
        settings.add_u8(SettingsKey::TX_POWER, 3).unwrap();
        settings.add_u8(SettingsKey::CHANNEL, 20).unwrap();

        let mut buf = [0u8; 1];
        settings.get(SettingsKey::CHANNEL, 1, &mut buf).unwrap();
        assert_eq!(buf[0], 20);
        assert_eq!(settings.get_u8(SettingsKey::CHANNEL).unwrap(), 15);
        assert_eq!(settings.entries_for(SettingsKey::CHANNEL), 2);
        assert_eq!(settings.add_count(), 3);
    }

    #[test]
    fn test_mock_settings_size_checks() {
        let mut settings = MockSettings::new();
        settings.add_u16(SettingsKey::PAN_ID, 0x1234).unwrap();

        let mut small = [0u8; 1];
        assert_eq!(
            settings.get(SettingsKey::PAN_ID, 0, &mut small),
            Err(SettingsError::ValueTooBig.into())
        );
        assert_eq!(
            settings.get_u8(SettingsKey::PAN_ID),
            Err(SettingsError::ValueTooBig.into())
        );
        assert_eq!(settings.get_u16(SettingsKey::PAN_ID).unwrap(), 0x1234);
    }

    #[test]
    fn test_mock_settings_failures() {
        let mut settings = MockSettings::new();
        assert_eq!(
            settings.add_u8(SettingsKey::INVALID, 1),
            Err(SettingsError::InvalidKey.into())
        );

        settings.set_fail_adds(true);
        assert!(settings.add_u8(SettingsKey::CHANNEL, 11).is_err());
        assert_eq!(settings.entries_for(SettingsKey::CHANNEL), 0);
    }
}
