//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod eeprom;
pub mod power;
pub mod reset;
pub mod settings;

// Re-export trait interfaces
pub use adc::BandgapAdc;
pub use eeprom::EepromInterface;
pub use power::{IoStatus, SleepInterface, SleepMode};
pub use reset::ResetStatus;
pub use settings::SettingsInterface;
