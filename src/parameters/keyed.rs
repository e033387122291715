//! Keyed-settings backend
//!
//! Each parameter is an entry in a generic key/value settings store. A
//! lookup miss resolves the compiled default (or a generated address) and
//! writes it back so later boots find it. The settings store owns integrity
//! checking; this backend never repairs anything.

use micropnp_core::config::StoreConfig;
use micropnp_core::parameters::{
    generate_local_eui64, Eui64, HardwareAddress, ParamDefaults, Parameter,
};
use micropnp_core::traits::NoiseSource;

use super::store::ParameterStore;
use crate::platform::traits::SettingsInterface;

/// Lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LookupStats {
    /// Lookups answered from the store
    pub hits: u32,
    /// Lookups resolved from defaults
    pub misses: u32,
    /// Defaults written back
    pub persisted: u32,
    /// Write-backs that failed
    pub persist_failures: u32,
}

/// Result of a settings lookup
enum Lookup<const LEN: usize> {
    /// Entry present with the expected size
    Hit([u8; LEN]),
    /// No entry under the key
    Missing,
    /// Entry present but unreadable; a new entry would be shadowed by it
    Unusable,
}

/// Backend on top of a keyed settings store
#[derive(Debug)]
pub struct KeyedBackend<S: SettingsInterface, N: NoiseSource> {
    settings: S,
    defaults: ParamDefaults,
    randomize_address: bool,
    persist_defaults: bool,
    noise: N,
    /// Address generated this session, reused until reboot
    generated: Option<Eui64>,
    stats: LookupStats,
}

impl<S: SettingsInterface, N: NoiseSource> KeyedBackend<S, N> {
    /// Create from a store configuration
    pub fn new(settings: S, config: &StoreConfig, noise: N) -> Self {
        Self {
            settings,
            defaults: config.defaults.with_valid_channel(),
            randomize_address: config.randomize_address,
            persist_defaults: config.persist_defaults,
            noise,
            generated: None,
            stats: LookupStats::default(),
        }
    }

    /// Lookup counters
    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    /// Access the underlying settings store
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Mutable access to the underlying settings store
    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    /// Give back the underlying settings store
    pub fn into_inner(self) -> S {
        self.settings
    }

    /// Look `param` up in the settings store
    fn lookup<const LEN: usize>(&mut self, param: Parameter) -> Lookup<LEN> {
        let mut buf = [0u8; LEN];
        match self.settings.get(param.settings_key(), 0, &mut buf) {
            Ok(len) if len == LEN => {
                self.stats.hits += 1;
                crate::log_debug!("settings hit for {}", param.name());
                Lookup::Hit(buf)
            }
            Ok(len) => {
                crate::log_warn!("settings entry for {} has size {}", param.name(), len);
                Lookup::Unusable
            }
            Err(e) if e.is_not_found() => Lookup::Missing,
            Err(e) => {
                crate::log_warn!("settings lookup for {} failed: {}", param.name(), e);
                Lookup::Unusable
            }
        }
    }

    /// Write a resolved default back; failures only cost a retry next boot
    fn persist(&mut self, param: Parameter, value: &[u8]) {
        if !self.persist_defaults {
            return;
        }

        match self.settings.add(param.settings_key(), value) {
            Ok(()) => {
                self.stats.persisted += 1;
                crate::log_info!("stored default {} in settings", param.name());
            }
            Err(e) => {
                self.stats.persist_failures += 1;
                crate::log_warn!("could not store {}: {}", param.name(), e);
            }
        }
    }

    /// Look `param` up, materializing `default` when it is missing
    fn resolve<const LEN: usize>(&mut self, param: Parameter, default: [u8; LEN]) -> [u8; LEN] {
        match self.lookup::<LEN>(param) {
            Lookup::Hit(value) => value,
            Lookup::Missing => {
                self.stats.misses += 1;
                self.persist(param, &default);
                default
            }
            Lookup::Unusable => {
                self.stats.misses += 1;
                default
            }
        }
    }
}

impl<S: SettingsInterface, N: NoiseSource> ParameterStore for KeyedBackend<S, N> {
    fn get_channel(&mut self) -> u8 {
        let [channel] = self.resolve(Parameter::Channel, [self.defaults.channel]);
        channel
    }

    fn get_hardware_address(&mut self) -> HardwareAddress {
        let missing = match self.lookup::<8>(Parameter::HardwareAddress) {
            Lookup::Hit(bytes) => {
                return HardwareAddress {
                    bytes,
                    freshly_generated: self.generated == Some(bytes),
                }
            }
            Lookup::Missing => true,
            Lookup::Unusable => false,
        };
        self.stats.misses += 1;

        let address = if self.randomize_address {
            let bytes = match self.generated {
                Some(bytes) => bytes,
                None => {
                    crate::log_info!("generating random EUI-64");
                    let bytes = generate_local_eui64(&mut self.noise);
                    self.generated = Some(bytes);
                    bytes
                }
            };
            HardwareAddress::generated(bytes)
        } else {
            HardwareAddress::stored(self.defaults.eui64)
        };

        if missing {
            self.persist(Parameter::HardwareAddress, &address.bytes);
        }
        address
    }

    fn get_pan_id(&mut self) -> u16 {
        u16::from_le_bytes(self.resolve(Parameter::PanId, self.defaults.pan_id.to_le_bytes()))
    }

    fn get_pan_address(&mut self) -> u16 {
        u16::from_le_bytes(
            self.resolve(Parameter::PanAddress, self.defaults.pan_address.to_le_bytes()),
        )
    }

    fn get_tx_power(&mut self) -> u8 {
        let [tx_power] = self.resolve(Parameter::TxPower, [self.defaults.tx_power]);
        tx_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::record_store::EepromSettings;
    use crate::platform::mock::{MockEeprom, MockSettings};
    use micropnp_core::config::StorageMode;
    use micropnp_core::parameters::{has_generated_markers, SettingsKey, DEFAULT_EUI64};
    use micropnp_core::traits::MockNoise;

    fn config() -> StoreConfig {
        StoreConfig::new(StorageMode::KeyedSettings)
    }

    fn backend(settings: MockSettings, config: &StoreConfig) -> KeyedBackend<MockSettings, MockNoise> {
        KeyedBackend::new(settings, config, MockNoise::new(&[0x10, 0x20, 0x30, 0x40, 0x50]))
    }

    #[test]
    fn test_stored_values_are_returned() {
        let mut settings = MockSettings::new();
        settings.preload(SettingsKey::CHANNEL, &[15]);
        settings.preload(SettingsKey::PAN_ID, &0x1234u16.to_le_bytes());
        settings.preload(SettingsKey::PAN_ADDRESS, &0x0042u16.to_le_bytes());
        settings.preload(SettingsKey::TX_POWER, &[5]);
        settings.preload(SettingsKey::EUI64, &[8, 7, 6, 5, 4, 3, 2, 1]);

        let mut backend = backend(settings, &config());
        assert_eq!(backend.get_channel(), 15);
        assert_eq!(backend.get_pan_id(), 0x1234);
        assert_eq!(backend.get_pan_address(), 0x0042);
        assert_eq!(backend.get_tx_power(), 5);
        assert_eq!(
            backend.get_hardware_address(),
            HardwareAddress::stored([8, 7, 6, 5, 4, 3, 2, 1])
        );
        assert_eq!(backend.stats().hits, 5);
        assert_eq!(backend.settings().add_count(), 0);
    }

    #[test]
    fn test_miss_materializes_default() {
        let mut backend = backend(MockSettings::new(), &config());

        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.settings().value(SettingsKey::CHANNEL), Some(&[26u8][..]));
        assert_eq!(backend.stats().misses, 1);
        assert_eq!(backend.stats().persisted, 1);

        // Second lookup is answered from storage
        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.stats().hits, 1);
        assert_eq!(backend.settings().entries_for(SettingsKey::CHANNEL), 1);
    }

    #[test]
    fn test_every_parameter_materializes() {
        let mut backend = backend(MockSettings::new(), &config());

        assert_eq!(backend.get_pan_id(), 0xABCD);
        assert_eq!(backend.get_pan_address(), 0);
        assert_eq!(backend.get_tx_power(), 0);
        assert_eq!(
            backend.get_hardware_address(),
            HardwareAddress::stored(DEFAULT_EUI64)
        );

        let settings = backend.settings();
        assert_eq!(settings.value(SettingsKey::PAN_ID), Some(&[0xCD, 0xAB][..]));
        assert_eq!(settings.value(SettingsKey::PAN_ADDRESS), Some(&[0, 0][..]));
        assert_eq!(settings.value(SettingsKey::TX_POWER), Some(&[0][..]));
        assert_eq!(settings.value(SettingsKey::EUI64), Some(&DEFAULT_EUI64[..]));
    }

    #[test]
    fn test_persist_failure_is_ignored() {
        let mut settings = MockSettings::new();
        settings.set_fail_adds(true);
        let mut backend = backend(settings, &config());

        assert_eq!(backend.get_pan_id(), 0xABCD);
        assert_eq!(backend.get_pan_id(), 0xABCD);
        assert_eq!(backend.stats().persist_failures, 2);
        assert_eq!(backend.stats().misses, 2);
    }

    #[test]
    fn test_no_write_back_when_disabled() {
        let config = config().with_persist_defaults(false);
        let mut backend = backend(MockSettings::new(), &config);

        assert_eq!(backend.get_tx_power(), 0);
        assert_eq!(backend.settings().add_count(), 0);
        assert_eq!(backend.stats().misses, 1);
    }

    #[test]
    fn test_wrong_size_entry_falls_back() {
        let mut settings = MockSettings::new();
        settings.preload(SettingsKey::CHANNEL, &[15, 16]);
        let mut backend = backend(settings, &config());

        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.stats().hits, 0);
        assert_eq!(backend.settings().add_count(), 0);
    }

    #[test]
    fn test_random_address_generated_and_persisted() {
        let config = config().with_random_address(true);
        let mut backend = backend(MockSettings::new(), &config);

        let first = backend.get_hardware_address();
        assert!(first.freshly_generated);
        assert!(has_generated_markers(&first.bytes));
        assert_eq!(first.bytes, [0x02, 0x10, 0x20, 0xFF, 0xFE, 0x30, 0x40, 0x50]);
        assert_eq!(
            backend.settings().value(SettingsKey::EUI64),
            Some(&first.bytes[..])
        );

        // Read back from storage, still flagged for this session
        let second = backend.get_hardware_address();
        assert_eq!(second, first);
        assert_eq!(backend.stats().hits, 1);
    }

    #[test]
    fn test_random_address_reused_when_persist_fails() {
        let config = config().with_random_address(true);
        let mut settings = MockSettings::new();
        settings.set_fail_adds(true);
        let mut backend = backend(settings, &config);

        let first = backend.get_hardware_address();
        let second = backend.get_hardware_address();
        assert_eq!(first, second);
        assert!(second.freshly_generated);
    }

    #[test]
    fn test_stored_address_not_fresh_with_randomization() {
        let config = config().with_random_address(true);
        let mut settings = MockSettings::new();
        settings.preload(SettingsKey::EUI64, &[0x02, 1, 2, 0xFF, 0xFE, 3, 4, 5]);
        let mut backend = backend(settings, &config);

        assert!(!backend.get_hardware_address().freshly_generated);
    }

    #[test]
    fn test_on_eeprom_record_store() {
        let settings = EepromSettings::new(MockEeprom::new(), 0x100, 0x100);
        let mut backend = KeyedBackend::new(settings, &config(), MockNoise::new(&[]));

        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.get_pan_id(), 0xABCD);
        assert_eq!(backend.stats().persisted, 2);

        let mut settings = backend.into_inner();
        assert_eq!(settings.get_u8(SettingsKey::CHANNEL).unwrap(), 26);
        assert_eq!(settings.get_u16(SettingsKey::PAN_ID).unwrap(), 0xABCD);

        // A new session over the same storage hits
        let mut backend = KeyedBackend::new(settings, &config(), MockNoise::new(&[]));
        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.stats().hits, 1);
        assert_eq!(backend.stats().misses, 0);
    }
}
