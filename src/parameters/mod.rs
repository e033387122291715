//! Persistent Radio Parameter Store
//!
//! Answers the five radio parameters (channel, hardware address, PAN id,
//! PAN address, tx power) from one of three backends chosen at build time.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │   Network stack / radio driver         │
//! └──────────────┬─────────────────────────┘
//!                │ ParameterStore
//!                ▼
//! ┌────────────────────────────────────────┐
//! │        ParamStore (build-time choice)  │
//! │  - DefaultsBackend   (no persistence)  │
//! │  - FixedSlotBackend  (EEPROM offsets)  │
//! │  - KeyedBackend      (settings store)  │
//! └──────────────┬─────────────────────────┘
//!                │
//!                ▼
//! ┌────────────────────────────────────────┐
//! │  EepromInterface / SettingsInterface   │
//! │  (EepromSettings record log)           │
//! └────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! - **No failing queries**: corrupt or missing data resolves to defaults
//! - **Sentinel repair**: the fixed-slot record is rewritten from defaults
//!   when the channel/complement pair fails
//! - **Lazy materialization**: the keyed backend stores defaults on first miss
//! - **Random addresses**: optional locally administered EUI-64 generation

pub mod build_env;
pub mod defaults;
pub mod fixed_slot;
pub mod keyed;
pub mod record_store;
pub mod store;

pub use build_env::{build_config, BuildValues};
pub use defaults::DefaultsBackend;
pub use fixed_slot::{FixedSlotBackend, RepairStats};
pub use keyed::{KeyedBackend, LookupStats};
pub use record_store::EepromSettings;
pub use store::{ParamStore, ParameterStore, RadioParams};

/// Start of the keyed settings region, clear of the fixed-slot record
pub const SETTINGS_REGION_BASE: u16 = 0x100;
