//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// EEPROM operation failed
    Eeprom(EepromError),
    /// Settings store operation failed
    Settings(SettingsError),
}

/// EEPROM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Offset or length runs past the end of the EEPROM
    InvalidAddress,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
}

/// Settings store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// No entry with this key (and index)
    NotFound,
    /// Key is reserved or malformed
    InvalidKey,
    /// Stored entry has a different size than requested
    InvalidSize,
    /// Caller buffer is smaller than the stored entry
    ValueTooBig,
    /// No room left for a new entry
    StorageFull,
    /// Underlying storage failed
    Failure,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Eeprom(e) => write!(f, "EEPROM error: {:?}", e),
            PlatformError::Settings(e) => write!(f, "Settings error: {:?}", e),
        }
    }
}

// From implementations for error conversion
impl From<EepromError> for PlatformError {
    fn from(error: EepromError) -> Self {
        PlatformError::Eeprom(error)
    }
}

impl From<SettingsError> for PlatformError {
    fn from(error: SettingsError) -> Self {
        PlatformError::Settings(error)
    }
}

impl PlatformError {
    /// True for a settings lookup that simply found nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::Settings(SettingsError::NotFound))
    }
}
