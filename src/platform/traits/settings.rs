//! Keyed settings interface trait
//!
//! A generic key/value store in non-volatile memory. Each key may hold more
//! than one entry; entries are addressed by key and a 0-based index.

use micropnp_core::parameters::SettingsKey;

use crate::platform::error::SettingsError;
use crate::platform::Result;

/// Keyed settings interface trait
///
/// Errors distinguish a plain miss (`SettingsError::NotFound`) from every
/// other failure so callers can materialize defaults on a miss only.
pub trait SettingsInterface {
    /// Copy the `index`-th entry stored under `key` into `buf`
    ///
    /// Returns the stored length.
    ///
    /// # Errors
    ///
    /// - `SettingsError::NotFound` if there is no such entry
    /// - `SettingsError::ValueTooBig` if `buf` is shorter than the entry
    fn get(&mut self, key: SettingsKey, index: u8, buf: &mut [u8]) -> Result<usize>;

    /// Append a new entry under `key`
    ///
    /// # Errors
    ///
    /// - `SettingsError::InvalidKey` for the reserved key
    /// - `SettingsError::StorageFull` if the entry does not fit
    fn add(&mut self, key: SettingsKey, value: &[u8]) -> Result<()>;

    /// Read a 1-byte entry
    fn get_u8(&mut self, key: SettingsKey) -> Result<u8> {
        let mut buf = [0u8; 1];
        let len = self.get(key, 0, &mut buf)?;
        if len != buf.len() {
            return Err(SettingsError::InvalidSize.into());
        }
        Ok(buf[0])
    }

    /// Read a 2-byte little-endian entry
    fn get_u16(&mut self, key: SettingsKey) -> Result<u16> {
        let mut buf = [0u8; 2];
        let len = self.get(key, 0, &mut buf)?;
        if len != buf.len() {
            return Err(SettingsError::InvalidSize.into());
        }
        Ok(u16::from_le_bytes(buf))
    }

    /// Append a 1-byte entry
    fn add_u8(&mut self, key: SettingsKey, value: u8) -> Result<()> {
        self.add(key, &[value])
    }

    /// Append a 2-byte little-endian entry
    fn add_u16(&mut self, key: SettingsKey, value: u16) -> Result<()> {
        self.add(key, &value.to_le_bytes())
    }
}

impl<S: SettingsInterface + ?Sized> SettingsInterface for &mut S {
    fn get(&mut self, key: SettingsKey, index: u8, buf: &mut [u8]) -> Result<usize> {
        (**self).get(key, index, buf)
    }

    fn add(&mut self, key: SettingsKey, value: &[u8]) -> Result<()> {
        (**self).add(key, value)
    }
}
