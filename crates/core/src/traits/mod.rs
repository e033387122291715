//! Core traits for platform-agnostic parameter handling.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Hardware implementations live in the board crate

pub mod noise;

pub use noise::{MockNoise, NoiseSource};
