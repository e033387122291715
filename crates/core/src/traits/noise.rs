//! Noise source abstraction for identifier generation.
//!
//! This module provides the `NoiseSource` trait that abstracts over the
//! hardware entropy available on the board (ADC bandgap jitter, a TRNG
//! peripheral, or a software RNG on host builds).

/// Source of noisy bytes used to avoid hardware address collisions.
///
/// Output only needs to be spread well enough that two boards sharing the
/// same compiled defaults are unlikely to pick the same address. It is not
/// suitable for key material.
///
/// # Example
///
/// ```
/// use micropnp_core::traits::{MockNoise, NoiseSource};
///
/// let mut noise = MockNoise::new(&[0x11, 0x22]);
/// assert_eq!(noise.sample_u8(), 0x11);
/// assert_eq!(noise.sample_u8(), 0x22);
/// assert_eq!(noise.sample_u8(), 0x11); // wraps
/// ```
pub trait NoiseSource {
    /// Returns one 8-bit sample.
    fn sample_u8(&mut self) -> u8;

    /// Fills `buf` with consecutive samples.
    fn fill(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.sample_u8();
        }
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample_u8(&mut self) -> u8 {
        (**self).sample_u8()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Maximum length of a mock noise pattern
pub const MOCK_NOISE_LEN: usize = 16;

/// Deterministic noise source replaying a fixed pattern.
///
/// An empty pattern yields zeros.
#[derive(Debug, Clone, Default)]
pub struct MockNoise {
    pattern: heapless::Vec<u8, MOCK_NOISE_LEN>,
    position: usize,
    samples: u32,
}

impl MockNoise {
    /// Creates a mock replaying `pattern` (truncated to `MOCK_NOISE_LEN`).
    pub fn new(pattern: &[u8]) -> Self {
        let len = pattern.len().min(MOCK_NOISE_LEN);
        let mut stored = heapless::Vec::new();
        // Cannot fail, length is clamped to capacity
        let _ = stored.extend_from_slice(&pattern[..len]);
        Self {
            pattern: stored,
            position: 0,
            samples: 0,
        }
    }

    /// Number of samples drawn so far.
    pub fn samples_taken(&self) -> u32 {
        self.samples
    }
}

impl NoiseSource for MockNoise {
    fn sample_u8(&mut self) -> u8 {
        self.samples += 1;
        if self.pattern.is_empty() {
            return 0;
        }
        let value = self.pattern[self.position];
        self.position = (self.position + 1) % self.pattern.len();
        value
    }
}
