//! Platform abstraction layer
//!
//! Hardware access goes through the traits in [`traits`]; board support
//! provides the implementations. All platform-specific code stays in this
//! module.

pub mod critical;
pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use critical::CriticalSectionGuard;
pub use error::{EepromError, PlatformError, Result, SettingsError};
pub use traits::{
    BandgapAdc, EepromInterface, IoStatus, ResetStatus, SettingsInterface, SleepInterface,
    SleepMode,
};
