//! Build-time parameter configuration
//!
//! `build.rs` exports the `PARAMS_*` environment variables (or their
//! fallbacks) to the compiler. This module parses them into a
//! [`StoreConfig`].
//!
//! # Variables
//!
//! - `PARAMS_STORAGE` - `defaults`, `fixed-slot` or `keyed` (`0`..`3` also
//!   accepted; `2` disables write-back of defaults)
//! - `PARAMS_RANDOM_MAC` - generate a random hardware address
//! - `PARAMS_PERSIST_DEFAULTS` - keyed store writes resolved defaults back
//! - `PARAMS_CHANNEL`, `PARAMS_PANID`, `PARAMS_PANADDR`, `PARAMS_TXPOWER`
//! - `PARAMS_EUI64` - e.g. `02:00:00:ff:fe:00:00:01`
//! - `PARAMS_SERVER_NAME`, `PARAMS_DOMAIN_NAME` - `webserver` builds only

use micropnp_core::config::{
    parse_bool, parse_channel, parse_eui64, parse_u16, parse_u8, ConfigError, StorageMode,
    StoreConfig,
};
#[cfg(feature = "webserver")]
use micropnp_core::config::WebIdentity;
use micropnp_core::parameters::ParamDefaults;

/// Raw build-time values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildValues<'a> {
    pub storage: &'a str,
    pub random_mac: &'a str,
    pub persist_defaults: &'a str,
    pub channel: &'a str,
    pub pan_id: &'a str,
    pub pan_address: &'a str,
    pub tx_power: &'a str,
    pub eui64: &'a str,
    pub server_name: &'a str,
    pub domain_name: &'a str,
}

impl BuildValues<'static> {
    /// Values baked in by `build.rs`
    pub const COMPILED: Self = Self {
        storage: env!("PARAMS_STORAGE"),
        random_mac: env!("PARAMS_RANDOM_MAC"),
        persist_defaults: env!("PARAMS_PERSIST_DEFAULTS"),
        channel: env!("PARAMS_CHANNEL"),
        pan_id: env!("PARAMS_PANID"),
        pan_address: env!("PARAMS_PANADDR"),
        tx_power: env!("PARAMS_TXPOWER"),
        eui64: env!("PARAMS_EUI64"),
        server_name: env!("PARAMS_SERVER_NAME"),
        domain_name: env!("PARAMS_DOMAIN_NAME"),
    };
}

/// Store configuration from the compiled build values
pub fn build_config() -> StoreConfig {
    config_from(&BuildValues::COMPILED)
}

/// Store configuration from raw values
///
/// Every value that does not parse is replaced by its built-in default and
/// logged.
pub fn config_from(values: &BuildValues<'_>) -> StoreConfig {
    let builtin = ParamDefaults::BUILTIN;

    let mode = or_default(
        "PARAMS_STORAGE",
        values.storage.parse::<StorageMode>(),
        StorageMode::FixedSlot,
    );
    // Legacy level 2 is the keyed store without write-back
    let persist_default = values.storage.trim() != "2";

    let defaults = ParamDefaults {
        channel: or_default(
            "PARAMS_CHANNEL",
            parse_channel(values.channel),
            builtin.channel,
        ),
        eui64: or_default("PARAMS_EUI64", parse_eui64(values.eui64), builtin.eui64),
        pan_id: or_default("PARAMS_PANID", parse_u16(values.pan_id), builtin.pan_id),
        pan_address: or_default(
            "PARAMS_PANADDR",
            parse_u16(values.pan_address),
            builtin.pan_address,
        ),
        tx_power: or_default(
            "PARAMS_TXPOWER",
            parse_u8(values.tx_power),
            builtin.tx_power,
        ),
    };

    let config = StoreConfig::new(mode)
        .with_defaults(defaults)
        .with_random_address(or_default(
            "PARAMS_RANDOM_MAC",
            parse_bool(values.random_mac),
            false,
        ))
        .with_persist_defaults(
            persist_default
                && or_default(
                    "PARAMS_PERSIST_DEFAULTS",
                    parse_bool(values.persist_defaults),
                    true,
                ),
        );

    #[cfg(feature = "webserver")]
    let config = match WebIdentity::new(values.server_name, values.domain_name) {
        Ok(identity) => config.with_web_identity(identity),
        Err(e) => {
            crate::log_warn!("web identity: {}, using built-in names", e.message());
            match WebIdentity::new("micropnp", "localhost") {
                Ok(identity) => config.with_web_identity(identity),
                Err(_) => config,
            }
        }
    };

    config
}

fn or_default<T>(name: &str, parsed: Result<T, ConfigError>, default: T) -> T {
    match parsed {
        Ok(value) => value,
        Err(e) => {
            crate::log_warn!("{}: {}, using built-in default", name, e.message());
            default
        }
    }
}
