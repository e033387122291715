//! Parameter store facade
//!
//! Callers see one interface, [`ParameterStore`], whichever backend the
//! build selected. The backend is chosen once by [`ParamStore::open`] and
//! never changes afterwards.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")]
//! # {
//! use micropnp::parameters::{ParamStore, ParameterStore, RadioParams};
//! use micropnp::platform::mock::{MockEeprom, MockSettings};
//! use micropnp_core::config::{StorageMode, StoreConfig};
//! use micropnp_core::traits::MockNoise;
//!
//! let config = StoreConfig::new(StorageMode::FixedSlot);
//! let mut store: ParamStore<MockEeprom, MockSettings, MockNoise> =
//!     ParamStore::open(&config, Some(MockEeprom::new()), None, MockNoise::new(&[]));
//!
//! let params = RadioParams::from_store(&mut store);
//! assert_eq!(params.channel, 26);
//! assert_eq!(params.pan_id, 0xABCD);
//! # }
//! ```

use micropnp_core::config::{StorageMode, StoreConfig};
use micropnp_core::parameters::HardwareAddress;
use micropnp_core::traits::NoiseSource;

use super::defaults::DefaultsBackend;
use super::fixed_slot::FixedSlotBackend;
use super::keyed::KeyedBackend;
use super::record_store::EepromSettings;
use super::SETTINGS_REGION_BASE;
use crate::platform::traits::{EepromInterface, SettingsInterface};

/// Radio parameter queries
///
/// Queries never fail: missing or corrupt data is resolved to a valid
/// default before returning. Queries take `&mut self` because answering
/// one may repair or populate storage.
pub trait ParameterStore {
    /// Radio channel, always within 11..=26
    fn get_channel(&mut self) -> u8;

    /// Hardware address and whether it was generated this session
    fn get_hardware_address(&mut self) -> HardwareAddress;

    /// PAN identifier
    fn get_pan_id(&mut self) -> u16;

    /// PAN short address
    fn get_pan_address(&mut self) -> u16;

    /// Transmit power (0 = maximum)
    fn get_tx_power(&mut self) -> u8;
}

impl<P: ParameterStore + ?Sized> ParameterStore for &mut P {
    fn get_channel(&mut self) -> u8 {
        (**self).get_channel()
    }

    fn get_hardware_address(&mut self) -> HardwareAddress {
        (**self).get_hardware_address()
    }

    fn get_pan_id(&mut self) -> u16 {
        (**self).get_pan_id()
    }

    fn get_pan_address(&mut self) -> u16 {
        (**self).get_pan_address()
    }

    fn get_tx_power(&mut self) -> u8 {
        (**self).get_tx_power()
    }
}

/// The backend selected for this build
#[derive(Debug)]
pub enum ParamStore<E, S, N>
where
    E: EepromInterface,
    S: SettingsInterface,
    N: NoiseSource,
{
    /// Compiled constants only
    Defaults(DefaultsBackend<N>),
    /// Fixed EEPROM slots with sentinel repair
    FixedSlot(FixedSlotBackend<E, N>),
    /// Keyed settings with default materialization
    Keyed(KeyedBackend<S, N>),
}

impl<E, S, N> ParamStore<E, S, N>
where
    E: EepromInterface,
    S: SettingsInterface,
    N: NoiseSource,
{
    /// Build the backend named by `config.mode`
    ///
    /// Falls back to compiled defaults if the storage the mode needs was
    /// not supplied. Storage that the mode does not use is dropped.
    pub fn open(config: &StoreConfig, eeprom: Option<E>, settings: Option<S>, noise: N) -> Self {
        match (config.mode, eeprom, settings) {
            (StorageMode::FixedSlot, Some(eeprom), _) => {
                crate::log_debug!("parameter store: fixed-slot");
                ParamStore::FixedSlot(FixedSlotBackend::new(eeprom, config, noise))
            }
            (StorageMode::KeyedSettings, _, Some(settings)) => {
                crate::log_debug!("parameter store: keyed settings");
                ParamStore::Keyed(KeyedBackend::new(settings, config, noise))
            }
            (StorageMode::CompiledDefaults, _, _) => {
                crate::log_debug!("parameter store: compiled defaults");
                ParamStore::Defaults(DefaultsBackend::new(config, noise))
            }
            (StorageMode::FixedSlot, None, _) | (StorageMode::KeyedSettings, _, None) => {
                crate::log_warn!("parameter storage unavailable, using compiled defaults");
                ParamStore::Defaults(DefaultsBackend::new(config, noise))
            }
        }
    }

    /// Storage mode actually in use
    pub fn mode(&self) -> StorageMode {
        match self {
            ParamStore::Defaults(_) => StorageMode::CompiledDefaults,
            ParamStore::FixedSlot(_) => StorageMode::FixedSlot,
            ParamStore::Keyed(_) => StorageMode::KeyedSettings,
        }
    }

    /// Run the fixed-slot integrity check; other backends have none
    pub fn ensure_valid(&mut self) {
        if let ParamStore::FixedSlot(backend) = self {
            backend.ensure_valid();
        }
    }
}

impl<E, N> ParamStore<E, EepromSettings<E>, N>
where
    E: EepromInterface,
    N: NoiseSource,
{
    /// Build the configured backend on a single EEPROM
    ///
    /// The keyed store lives from [`SETTINGS_REGION_BASE`] to the end of the
    /// EEPROM; the fixed-slot record uses the start.
    pub fn on_eeprom(config: &StoreConfig, eeprom: E, noise: N) -> Self {
        match config.mode {
            StorageMode::KeyedSettings => {
                let size = eeprom.capacity().saturating_sub(SETTINGS_REGION_BASE);
                let settings = EepromSettings::new(eeprom, SETTINGS_REGION_BASE, size);
                Self::open(config, None, Some(settings), noise)
            }
            StorageMode::FixedSlot | StorageMode::CompiledDefaults => {
                Self::open(config, Some(eeprom), None, noise)
            }
        }
    }
}

impl<E, S, N> ParameterStore for ParamStore<E, S, N>
where
    E: EepromInterface,
    S: SettingsInterface,
    N: NoiseSource,
{
    fn get_channel(&mut self) -> u8 {
        match self {
            ParamStore::Defaults(b) => b.get_channel(),
            ParamStore::FixedSlot(b) => b.get_channel(),
            ParamStore::Keyed(b) => b.get_channel(),
        }
    }

    fn get_hardware_address(&mut self) -> HardwareAddress {
        match self {
            ParamStore::Defaults(b) => b.get_hardware_address(),
            ParamStore::FixedSlot(b) => b.get_hardware_address(),
            ParamStore::Keyed(b) => b.get_hardware_address(),
        }
    }

    fn get_pan_id(&mut self) -> u16 {
        match self {
            ParamStore::Defaults(b) => b.get_pan_id(),
            ParamStore::FixedSlot(b) => b.get_pan_id(),
            ParamStore::Keyed(b) => b.get_pan_id(),
        }
    }

    fn get_pan_address(&mut self) -> u16 {
        match self {
            ParamStore::Defaults(b) => b.get_pan_address(),
            ParamStore::FixedSlot(b) => b.get_pan_address(),
            ParamStore::Keyed(b) => b.get_pan_address(),
        }
    }

    fn get_tx_power(&mut self) -> u8 {
        match self {
            ParamStore::Defaults(b) => b.get_tx_power(),
            ParamStore::FixedSlot(b) => b.get_tx_power(),
            ParamStore::Keyed(b) => b.get_tx_power(),
        }
    }
}

/// Snapshot of every radio parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioParams {
    /// Radio channel
    pub channel: u8,
    /// Hardware address
    pub eui64: [u8; 8],
    /// Address was generated this session
    pub fresh_address: bool,
    /// PAN identifier
    pub pan_id: u16,
    /// PAN short address
    pub pan_address: u16,
    /// Transmit power (0 = maximum)
    pub tx_power: u8,
}

impl RadioParams {
    /// Query every parameter, channel first
    pub fn from_store<P: ParameterStore + ?Sized>(store: &mut P) -> Self {
        let channel = store.get_channel();
        let address = store.get_hardware_address();
        let params = Self {
            channel,
            eui64: address.bytes,
            fresh_address: address.freshly_generated,
            pan_id: store.get_pan_id(),
            pan_address: store.get_pan_address(),
            tx_power: store.get_tx_power(),
        };
        crate::log_info!(
            "radio: channel {} PAN {} address {} tx power {}",
            params.channel,
            params.pan_id,
            params.pan_address,
            params.tx_power
        );
        params
    }
}
