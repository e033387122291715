//! EEPROM-backed keyed settings store
//!
//! Append-only log of small records in a region of the EEPROM.
//!
//! # Record Format
//!
//! ```text
//! ┌────────┬────────┬─────┬──────┬────────────────┐
//! │ key_lo │ key_hi │ len │ crc8 │ data[len]      │
//! └────────┴────────┴─────┴──────┴────────────────┘
//! ```
//!
//! `crc8` (CRC-8/SMBUS) covers key, len and data. Records grow upward from
//! the region base. The log ends at the first erased header (key bytes
//! `0xFF 0xFF`), at a record failing its CRC, or at a record running past
//! the region. New records are written data first, header last, so a torn
//! append leaves the header erased and the record invisible.

use micropnp_core::parameters::{record_crc8, SettingsKey};

use crate::platform::critical::CriticalSectionGuard;
use crate::platform::error::SettingsError;
use crate::platform::traits::{EepromInterface, SettingsInterface};
use crate::platform::Result;

/// Header size in bytes
pub const RECORD_HEADER_LEN: u16 = 4;

/// Largest value a record can hold
pub const MAX_VALUE_LEN: usize = 64;

/// Erase chunk used by `wipe`
const WIPE_CHUNK: usize = 16;

/// Decoded record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordHeader {
    key: SettingsKey,
    len: u8,
}

/// Keyed settings on top of an EEPROM region
#[derive(Debug)]
pub struct EepromSettings<E: EepromInterface> {
    eeprom: E,
    base: u16,
    end: u16,
}

impl<E: EepromInterface> EepromSettings<E> {
    /// Use `size` bytes of `eeprom` starting at `base`
    ///
    /// The region is clipped to the EEPROM capacity.
    pub fn new(eeprom: E, base: u16, size: u16) -> Self {
        let end = base.saturating_add(size).min(eeprom.capacity());
        Self { eeprom, base, end }
    }

    /// Region start offset
    pub fn base(&self) -> u16 {
        self.base
    }

    /// Region size in bytes
    pub fn size(&self) -> u16 {
        self.end.saturating_sub(self.base)
    }

    /// Bytes consumed by valid records
    pub fn used(&mut self) -> Result<u16> {
        Ok(self.log_end()? - self.base)
    }

    /// Erase the whole region
    pub fn wipe(&mut self) -> Result<()> {
        let erased = [0xFFu8; WIPE_CHUNK];
        let _guard = CriticalSectionGuard::acquire();

        let mut offset = self.base;
        while offset < self.end {
            let len = (self.end - offset).min(WIPE_CHUNK as u16);
            self.eeprom.write(offset, &erased[..len as usize])?;
            offset += len;
        }
        crate::log_debug!("settings region erased ({} bytes)", self.size());
        Ok(())
    }

    /// Access the underlying EEPROM
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Give back the underlying EEPROM
    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// Read and verify the record at `offset`; `None` ends the log
    fn read_record(
        &mut self,
        offset: u16,
        data: &mut [u8; MAX_VALUE_LEN],
    ) -> Result<Option<RecordHeader>> {
        if offset.saturating_add(RECORD_HEADER_LEN) > self.end {
            return Ok(None);
        }

        let mut header = [0u8; RECORD_HEADER_LEN as usize];
        self.eeprom.read(offset, &mut header)?;

        let key_bytes = [header[0], header[1]];
        let key = SettingsKey(u16::from_le_bytes(key_bytes));
        if !key.is_valid() {
            return Ok(None);
        }

        let len = header[2];
        let data_offset = offset + RECORD_HEADER_LEN;
        if len as usize > MAX_VALUE_LEN || data_offset.saturating_add(len as u16) > self.end {
            crate::log_warn!("settings record at {} overruns region", offset);
            return Ok(None);
        }

        let value = &mut data[..len as usize];
        self.eeprom.read(data_offset, value)?;
        if record_crc8(key_bytes, value) != header[3] {
            crate::log_warn!("settings record at {} fails CRC", offset);
            return Ok(None);
        }

        Ok(Some(RecordHeader { key, len }))
    }

    /// Offset just past the last valid record
    fn log_end(&mut self) -> Result<u16> {
        let mut data = [0u8; MAX_VALUE_LEN];
        let mut offset = self.base;
        while let Some(header) = self.read_record(offset, &mut data)? {
            offset += RECORD_HEADER_LEN + header.len as u16;
        }
        Ok(offset)
    }
}

impl<E: EepromInterface> SettingsInterface for EepromSettings<E> {
    fn get(&mut self, key: SettingsKey, index: u8, buf: &mut [u8]) -> Result<usize> {
        let mut data = [0u8; MAX_VALUE_LEN];
        let mut offset = self.base;
        let mut seen = 0u8;

        while let Some(header) = self.read_record(offset, &mut data)? {
            if header.key == key {
                if seen == index {
                    let len = header.len as usize;
                    if buf.len() < len {
                        return Err(SettingsError::ValueTooBig.into());
                    }
                    buf[..len].copy_from_slice(&data[..len]);
                    return Ok(len);
                }
                seen = seen.saturating_add(1);
            }
            offset += RECORD_HEADER_LEN + header.len as u16;
        }

        Err(SettingsError::NotFound.into())
    }

    fn add(&mut self, key: SettingsKey, value: &[u8]) -> Result<()> {
        if !key.is_valid() {
            return Err(SettingsError::InvalidKey.into());
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(SettingsError::ValueTooBig.into());
        }

        let offset = self.log_end()?;
        let data_offset = offset + RECORD_HEADER_LEN;
        if data_offset as usize + value.len() > self.end as usize {
            return Err(SettingsError::StorageFull.into());
        }

        let key_bytes = key.to_bytes();
        let header = [
            key_bytes[0],
            key_bytes[1],
            value.len() as u8,
            record_crc8(key_bytes, value),
        ];

        let _guard = CriticalSectionGuard::acquire();
        self.eeprom.write(data_offset, value)?;
        self.eeprom.write(offset, &header)?;
        Ok(())
    }
}
