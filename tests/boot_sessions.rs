//! Parameter store behaviour across simulated reboots
//!
//! Run with `cargo test --features mock`.

#![cfg(feature = "mock")]

use micropnp::parameters::{ParamStore, RadioParams};
use micropnp::platform::mock::MockEeprom;
use micropnp_core::config::{StorageMode, StoreConfig};
use micropnp_core::parameters::{has_generated_markers, DEFAULT_EUI64};
use micropnp_core::traits::MockNoise;

/// One boot: open the store, snapshot the parameters, hand the EEPROM back
fn boot(config: &StoreConfig, eeprom: MockEeprom, noise: &[u8]) -> (RadioParams, MockEeprom) {
    let mut store = ParamStore::on_eeprom(config, eeprom, MockNoise::new(noise));
    let params = RadioParams::from_store(&mut store);

    let eeprom = match store {
        ParamStore::FixedSlot(backend) => backend.into_inner(),
        ParamStore::Keyed(backend) => backend.into_inner().into_inner(),
        ParamStore::Defaults(_) => panic!("storage was supplied"),
    };
    (params, eeprom)
}

#[test]
fn test_fixed_slot_random_address_survives_reboot() {
    let config = StoreConfig::new(StorageMode::FixedSlot).with_random_address(true);

    let (first, eeprom) = boot(&config, MockEeprom::new(), &[0xA1, 0xA2, 0xA3, 0xA4, 0xA5]);
    assert!(first.fresh_address);
    assert!(has_generated_markers(&first.eui64));

    let writes = eeprom.write_count();
    let (second, eeprom) = boot(&config, eeprom, &[0xB1, 0xB2, 0xB3, 0xB4, 0xB5]);
    assert_eq!(second.eui64, first.eui64);
    assert!(!second.fresh_address);
    assert_eq!(eeprom.write_count(), writes);
}

#[test]
fn test_fixed_slot_corruption_between_boots() {
    let config = StoreConfig::new(StorageMode::FixedSlot);

    let (_, mut eeprom) = boot(&config, MockEeprom::new(), &[]);
    // Hand-edited parameters survive as long as the sentinel verifies
    eeprom.program(0x08, &[15, !15u8]);
    eeprom.program(0x0A, &0x2222u16.to_le_bytes());

    let (params, mut eeprom) = boot(&config, eeprom, &[]);
    assert_eq!(params.channel, 15);
    assert_eq!(params.pan_id, 0x2222);

    // Damage the sentinel: everything returns to defaults
    eeprom.inject_corruption(0x09, 1);
    let (params, _) = boot(&config, eeprom, &[]);
    assert_eq!(params.channel, 26);
    assert_eq!(params.pan_id, 0xABCD);
    assert_eq!(params.eui64, DEFAULT_EUI64);
}

#[test]
fn test_keyed_defaults_materialize_once() {
    let config = StoreConfig::new(StorageMode::KeyedSettings).with_random_address(true);

    let (first, eeprom) = boot(&config, MockEeprom::new(), &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert!(first.fresh_address);
    let writes = eeprom.write_count();
    assert!(writes > 0);

    let (second, eeprom) = boot(&config, eeprom, &[0x09, 0x09, 0x09, 0x09, 0x09]);
    assert_eq!(second.eui64, first.eui64);
    assert!(!second.fresh_address);
    assert_eq!(second.channel, 26);
    assert_eq!(eeprom.write_count(), writes);
}

#[test]
fn test_keyed_without_write_back() {
    let config = StoreConfig::new(StorageMode::KeyedSettings).with_persist_defaults(false);

    let (params, eeprom) = boot(&config, MockEeprom::new(), &[]);
    assert_eq!(params.pan_id, 0xABCD);
    assert_eq!(eeprom.write_count(), 0);
}
