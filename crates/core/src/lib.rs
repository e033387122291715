//! micropnp_core - Pure no_std parameter logic for the MicroPnP node
//!
//! This crate contains the platform-agnostic half of the radio parameter
//! store: types, integrity checks, record layout and configuration parsing.
//! It can be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Hardware services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Hardware-agnostic trait abstractions (NoiseSource)
//! - [`parameters`]: Parameter types, channel sentinel, EUI-64 generation,
//!   fixed-slot layout, settings keys and CRC-8
//! - [`config`]: Store configuration and build-value parsers

#![no_std]

pub mod config;
pub mod parameters;
pub mod traits;
