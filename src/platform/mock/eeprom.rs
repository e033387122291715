//! Mock EEPROM implementation for testing
//!
//! Provides in-memory EEPROM simulation for unit tests.

use crate::platform::critical::CriticalSectionGuard;
use crate::platform::{error::EepromError, traits::EepromInterface, Result};

/// EEPROM capacity (4 KB, same as the ATmega128RFA1)
pub const EEPROM_CAPACITY: u16 = 4096;

/// Mock EEPROM implementation
///
/// Simulates EEPROM storage in memory for testing. Supports:
/// - Read/write operations with bounds checking
/// - Corruption injection for testing error handling
/// - Write counting for wear and "no write happened" checks
/// - Write failure injection
/// - Tracking of writes issued inside a critical section
///
/// # Example
///
/// ```
/// # #[cfg(feature = "mock")]
/// # {
/// use micropnp::platform::mock::MockEeprom;
/// use micropnp::platform::traits::EepromInterface;
///
/// let mut eeprom = MockEeprom::new();
///
/// eeprom.write_word(0x08, 0xE51A).unwrap();
/// assert_eq!(eeprom.read_byte(0x08).unwrap(), 0x1A);
/// assert_eq!(eeprom.write_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockEeprom {
    /// EEPROM contents (initialized to 0xFF - erased state)
    storage: [u8; EEPROM_CAPACITY as usize],
    /// Number of write calls that changed or attempted to change storage
    writes: u32,
    /// Number of bytes written
    bytes_written: u32,
    /// Writes issued while a critical section was held
    guarded_writes: u32,
    /// Fail every write while set
    fail_writes: bool,
    /// Fail every read while set
    fail_reads: bool,
}

impl MockEeprom {
    /// Create an erased mock EEPROM
    pub fn new() -> Self {
        Self {
            storage: [0xFF; EEPROM_CAPACITY as usize],
            writes: 0,
            bytes_written: 0,
            guarded_writes: 0,
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Get EEPROM contents (for test verification)
    pub fn contents(&self, offset: u16, len: usize) -> &[u8] {
        &self.storage[offset as usize..offset as usize + len]
    }

    /// Preload bytes without counting a write (factory programming)
    pub fn program(&mut self, offset: u16, data: &[u8]) {
        self.storage[offset as usize..offset as usize + data.len()].copy_from_slice(data);
    }

    /// Inject corruption at offset (for testing error recovery)
    pub fn inject_corruption(&mut self, offset: u16, len: usize) {
        for byte in &mut self.storage[offset as usize..offset as usize + len] {
            *byte ^= 0xA5; // Corrupt pattern
        }
    }

    /// Number of write calls so far
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Number of bytes written so far
    pub fn bytes_written(&self) -> u32 {
        self.bytes_written
    }

    /// Number of write calls issued inside a critical section
    pub fn guarded_write_count(&self) -> u32 {
        self.guarded_writes
    }

    /// Reset write counters
    pub fn clear_counters(&mut self) {
        self.writes = 0;
        self.bytes_written = 0;
        self.guarded_writes = 0;
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make every subsequent read fail (or succeed again)
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    fn check_range(offset: u16, len: usize) -> Result<()> {
        if offset as usize + len > EEPROM_CAPACITY as usize {
            return Err(EepromError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromInterface for MockEeprom {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<()> {
        Self::check_range(offset, buf.len())?;
        if self.fail_reads {
            return Err(EepromError::ReadFailed.into());
        }

        buf.copy_from_slice(&self.storage[offset as usize..offset as usize + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        Self::check_range(offset, data.len())?;
        if self.fail_writes {
            return Err(EepromError::WriteFailed.into());
        }

        self.storage[offset as usize..offset as usize + data.len()].copy_from_slice(data);
        self.writes += 1;
        self.bytes_written += data.len() as u32;
        if CriticalSectionGuard::nesting() > 0 {
            self.guarded_writes += 1;
        }
        Ok(())
    }

    fn capacity(&self) -> u16 {
        EEPROM_CAPACITY
    }
}
