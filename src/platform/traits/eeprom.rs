//! EEPROM interface trait
//!
//! This module defines the byte-addressable non-volatile storage interface
//! used by the fixed-slot parameter backend and the keyed settings store.

use crate::platform::Result;

/// EEPROM interface trait
///
/// Platform implementations must provide block read and write. Byte and
/// word accessors have default implementations on top of them.
///
/// # EEPROM Characteristics
///
/// - Byte addressable, no erase step (unlike Flash)
/// - Erased cells read as 0xFF
/// - Limited write endurance (~100k cycles per cell), so avoid rewriting
///   unchanged data
/// - Words are stored little-endian
///
/// # Safety Invariants
///
/// - Only one owner per EEPROM instance (no concurrent access)
/// - A multi-byte write that must be observed whole has to run inside a
///   [`CriticalSectionGuard`](crate::platform::critical::CriticalSectionGuard)
pub trait EepromInterface {
    /// Read `buf.len()` bytes starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// range runs past the end of the EEPROM.
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// range runs past the end of the EEPROM, or
    /// `PlatformError::Eeprom(EepromError::WriteFailed)` if the controller
    /// reports a failure.
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<()>;

    /// Total EEPROM size in bytes
    fn capacity(&self) -> u16;

    /// Read a single byte
    fn read_byte(&mut self, offset: u16) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, offset: u16, value: u8) -> Result<()> {
        self.write(offset, &[value])
    }

    /// Read a little-endian word
    fn read_word(&mut self, offset: u16) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read(offset, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write a little-endian word
    fn write_word(&mut self, offset: u16, value: u16) -> Result<()> {
        self.write(offset, &value.to_le_bytes())
    }
}

impl<E: EepromInterface + ?Sized> EepromInterface for &mut E {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        (**self).write(offset, data)
    }

    fn capacity(&self) -> u16 {
        (**self).capacity()
    }
}
