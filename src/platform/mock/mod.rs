//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")]
//! # {
//! use micropnp::platform::mock::{MockEeprom, MockSettings};
//! use micropnp::platform::traits::{EepromInterface, SettingsInterface};
//! use micropnp_core::parameters::SettingsKey;
//!
//! let mut eeprom = MockEeprom::new();
//! assert_eq!(eeprom.read_byte(0).unwrap(), 0xFF);
//!
//! let mut settings = MockSettings::new();
//! settings.add_u8(SettingsKey::CHANNEL, 15).unwrap();
//! assert_eq!(settings.get_u8(SettingsKey::CHANNEL).unwrap(), 15);
//! # }
//! ```

#![cfg(any(test, feature = "mock"))]

mod adc;
mod eeprom;
mod power;
mod reset;
mod settings;

pub use adc::MockAdc;
pub use eeprom::{MockEeprom, EEPROM_CAPACITY};
pub use power::{MockIo, MockSleep, SleepOp};
pub use reset::MockResetStatus;
pub use settings::MockSettings;
