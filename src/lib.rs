#![cfg_attr(not(test), no_std)]

//! micropnp - Board support and persistent radio parameters for the MicroPnP node
//!
//! This library provides the platform abstraction, a persistent parameter
//! store for the radio (channel, hardware address, PAN identifiers, transmit
//! power) and board bring-up helpers.

// Logging macros, exported at the crate root
pub mod logging;

// Platform abstraction layer
pub mod platform;

// Persistent radio parameters
pub mod parameters;

// Reset, stack, power and noise helpers
pub mod board;
