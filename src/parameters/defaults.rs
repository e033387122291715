//! Compiled-defaults backend
//!
//! Nothing is persisted: every query answers from the compiled defaults.
//! With address randomization the hardware address is generated on first
//! request and kept for the lifetime of the backend, so it changes on every
//! boot and is always reported as freshly generated.

use micropnp_core::config::StoreConfig;
use micropnp_core::parameters::{generate_local_eui64, Eui64, HardwareAddress, ParamDefaults};
use micropnp_core::traits::NoiseSource;

use super::store::ParameterStore;

/// Backend answering from compiled constants
#[derive(Debug)]
pub struct DefaultsBackend<N: NoiseSource> {
    defaults: ParamDefaults,
    randomize_address: bool,
    noise: N,
    generated: Option<Eui64>,
}

impl<N: NoiseSource> DefaultsBackend<N> {
    /// Create from a store configuration
    pub fn new(config: &StoreConfig, noise: N) -> Self {
        Self {
            defaults: config.defaults.with_valid_channel(),
            randomize_address: config.randomize_address,
            noise,
            generated: None,
        }
    }

    /// Defaults in use
    pub fn defaults(&self) -> &ParamDefaults {
        &self.defaults
    }
}

impl<N: NoiseSource> ParameterStore for DefaultsBackend<N> {
    fn get_channel(&mut self) -> u8 {
        self.defaults.channel
    }

    fn get_hardware_address(&mut self) -> HardwareAddress {
        if !self.randomize_address {
            return HardwareAddress::stored(self.defaults.eui64);
        }

        let bytes = match self.generated {
            Some(bytes) => bytes,
            None => {
                let bytes = generate_local_eui64(&mut self.noise);
                crate::log_info!("generated random EUI-64");
                self.generated = Some(bytes);
                bytes
            }
        };
        HardwareAddress::generated(bytes)
    }

    fn get_pan_id(&mut self) -> u16 {
        self.defaults.pan_id
    }

    fn get_pan_address(&mut self) -> u16 {
        self.defaults.pan_address
    }

    fn get_tx_power(&mut self) -> u8 {
        self.defaults.tx_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micropnp_core::config::StorageMode;
    use micropnp_core::parameters::{has_generated_markers, DEFAULT_EUI64};
    use micropnp_core::traits::MockNoise;

    #[test]
    fn test_returns_compiled_defaults() {
        let config = StoreConfig::new(StorageMode::CompiledDefaults);
        let mut backend = DefaultsBackend::new(&config, MockNoise::new(&[]));

        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.get_pan_id(), 0xABCD);
        assert_eq!(backend.get_pan_address(), 0);
        assert_eq!(backend.get_tx_power(), 0);
        assert_eq!(
            backend.get_hardware_address(),
            HardwareAddress::stored(DEFAULT_EUI64)
        );
    }

    #[test]
    fn test_out_of_range_default_channel_replaced() {
        let mut config = StoreConfig::new(StorageMode::CompiledDefaults);
        config.defaults.channel = 30;
        let mut backend = DefaultsBackend::new(&config, MockNoise::new(&[]));

        assert_eq!(backend.get_channel(), 26);
        assert_eq!(backend.defaults().channel, 26);
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = ParamDefaults {
            channel: 15,
            pan_id: 0x1234,
            ..ParamDefaults::BUILTIN
        };
        let config = StoreConfig::new(StorageMode::CompiledDefaults).with_defaults(defaults);
        let mut backend = DefaultsBackend::new(&config, MockNoise::new(&[]));

        assert_eq!(backend.get_channel(), 15);
        assert_eq!(backend.get_pan_id(), 0x1234);
    }

    #[test]
    fn test_random_address_generated_once() {
        let config = StoreConfig::new(StorageMode::CompiledDefaults).with_random_address(true);
        let mut backend = DefaultsBackend::new(&config, MockNoise::new(&[0x11, 0x22, 0x33]));

        let first = backend.get_hardware_address();
        assert!(first.freshly_generated);
        assert!(has_generated_markers(&first.bytes));
        assert_eq!(first.bytes, [0x02, 0x11, 0x22, 0xFF, 0xFE, 0x33, 0x11, 0x22]);

        let second = backend.get_hardware_address();
        assert_eq!(second, first);
    }
}
