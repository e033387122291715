//! Radio parameter types and integrity checks
//!
//! Storage drivers and the backends that use them live in the board crate.

pub mod channel;
pub mod crc;
pub mod eui64;
pub mod keys;
pub mod layout;
pub mod types;

pub use channel::{ChannelCheck, CHANNEL_RECORD_SIZE};
pub use crc::{calculate_crc8, record_crc8};
pub use eui64::{generate_local_eui64, has_generated_markers};
pub use keys::SettingsKey;
pub use layout::{Field, FixedSlotLayout, Slot, DOMAIN_NAME_LEN, SERVER_NAME_LEN};
pub use types::{
    is_valid_channel, Eui64, HardwareAddress, ParamDefaults, Parameter, CHANNEL_MAX, CHANNEL_MIN,
    DEFAULT_CHANNEL, DEFAULT_EUI64, DEFAULT_PAN_ADDRESS, DEFAULT_PAN_ID, DEFAULT_TX_POWER,
};
