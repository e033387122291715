//! Store configuration and build-value parsing
//!
//! The board crate feeds build-time environment strings through these
//! parsers. Every parser is strict; the caller decides the fallback.

use core::fmt;
use core::str::FromStr;

use crate::parameters::layout::{DOMAIN_NAME_LEN, SERVER_NAME_LEN};
use crate::parameters::types::{is_valid_channel, Eui64, ParamDefaults};

/// Errors from parsing configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Not a decimal or `0x` hexadecimal number in range
    InvalidNumber,
    /// Not a recognised boolean spelling
    InvalidBool,
    /// Channel outside 11..=26
    InvalidChannel,
    /// Not eight `:`/`-` separated hex bytes
    InvalidAddress,
    /// Unknown storage mode
    UnknownMode,
    /// String longer than its fixed slot
    TooLong,
}

impl ConfigError {
    /// Short description, usable where `Display` is not
    pub const fn message(self) -> &'static str {
        match self {
            ConfigError::InvalidNumber => "invalid number",
            ConfigError::InvalidBool => "invalid boolean",
            ConfigError::InvalidChannel => "channel out of range 11..=26",
            ConfigError::InvalidAddress => "invalid EUI-64 address",
            ConfigError::UnknownMode => "unknown storage mode",
            ConfigError::TooLong => "value too long for its slot",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Where parameters are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Compiled constants only, nothing persisted
    CompiledDefaults,
    /// Fixed EEPROM offsets, rewritten from defaults when corrupt
    FixedSlot,
    /// Key/value settings store, defaults materialized on first miss
    KeyedSettings,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    /// Accepts the names `defaults`, `fixed-slot`, `keyed` and the legacy
    /// numeric levels `0`..`3` (2 and 3 both select the keyed store).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "defaults" | "compiled-defaults" => Ok(StorageMode::CompiledDefaults),
            "1" | "fixed-slot" | "fixed" | "eeprom" => Ok(StorageMode::FixedSlot),
            "2" | "3" | "keyed" | "keyed-settings" | "settings" => Ok(StorageMode::KeyedSettings),
            _ => Err(ConfigError::UnknownMode),
        }
    }
}

/// Web server identity strings, NUL padded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebIdentity {
    /// Host name
    pub server_name: [u8; SERVER_NAME_LEN],
    /// Domain name
    pub domain_name: [u8; DOMAIN_NAME_LEN],
}

impl WebIdentity {
    /// Builds an identity from strings, rejecting values that do not fit
    pub fn new(server_name: &str, domain_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            server_name: fixed_bytes(server_name)?,
            domain_name: fixed_bytes(domain_name)?,
        })
    }
}

/// Complete store configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backend selection
    pub mode: StorageMode,
    /// Generate a random hardware address instead of the compiled one
    pub randomize_address: bool,
    /// Keyed backend writes resolved defaults back to the store
    pub persist_defaults: bool,
    /// Compiled default values
    pub defaults: ParamDefaults,
    /// Web identity kept alongside the fixed-slot record
    pub web_identity: Option<WebIdentity>,
}

impl StoreConfig {
    /// Configuration for `mode` with built-in defaults
    pub const fn new(mode: StorageMode) -> Self {
        Self {
            mode,
            randomize_address: false,
            persist_defaults: true,
            defaults: ParamDefaults::BUILTIN,
            web_identity: None,
        }
    }

    /// Enables or disables random address generation
    pub const fn with_random_address(mut self, enabled: bool) -> Self {
        self.randomize_address = enabled;
        self
    }

    /// Replaces the compiled defaults
    ///
    /// A channel outside 11..=26 is replaced by the built-in default.
    pub const fn with_defaults(mut self, defaults: ParamDefaults) -> Self {
        self.defaults = defaults.with_valid_channel();
        self
    }

    /// Attaches web identity strings
    pub const fn with_web_identity(mut self, identity: WebIdentity) -> Self {
        self.web_identity = Some(identity);
        self
    }

    /// Controls keyed-store write-back of defaults
    pub const fn with_persist_defaults(mut self, persist: bool) -> Self {
        self.persist_defaults = persist;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(StorageMode::FixedSlot)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal `u16`
pub fn parse_u16(s: &str) -> Result<u16, ConfigError> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|_| ConfigError::InvalidNumber)
}

/// Parse a decimal or `0x`-prefixed hexadecimal `u8`
pub fn parse_u8(s: &str) -> Result<u8, ConfigError> {
    let value = parse_u16(s)?;
    u8::try_from(value).map_err(|_| ConfigError::InvalidNumber)
}

/// Parse a channel, enforcing the 11..=26 range
pub fn parse_channel(s: &str) -> Result<u8, ConfigError> {
    let channel = parse_u8(s)?;
    if !is_valid_channel(channel) {
        return Err(ConfigError::InvalidChannel);
    }
    Ok(channel)
}

/// Parse `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`
pub fn parse_bool(s: &str) -> Result<bool, ConfigError> {
    match s.trim() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool),
    }
}

/// Parse an EUI-64 such as `02:00:00:ff:fe:00:00:01` (`-` also accepted)
pub fn parse_eui64(s: &str) -> Result<Eui64, ConfigError> {
    let mut eui64 = [0u8; 8];
    let mut count = 0;

    for part in s.trim().split([':', '-']) {
        if count == eui64.len() || part.is_empty() || part.len() > 2 {
            return Err(ConfigError::InvalidAddress);
        }
        eui64[count] = u8::from_str_radix(part, 16).map_err(|_| ConfigError::InvalidAddress)?;
        count += 1;
    }

    if count != eui64.len() {
        return Err(ConfigError::InvalidAddress);
    }
    Ok(eui64)
}

/// Copy `s` into a NUL-padded fixed array
pub fn fixed_bytes<const N: usize>(s: &str) -> Result<[u8; N], ConfigError> {
    let bytes = s.as_bytes();
    if bytes.len() > N {
        return Err(ConfigError::TooLong);
    }
    let mut out = [0u8; N];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}
