//! Noise sources for address generation

use micropnp_core::traits::NoiseSource;
use rand_core::RngCore;

use crate::platform::traits::BandgapAdc;

/// Bandgap samples folded into one byte
pub const ADC_SAMPLES_PER_BYTE: usize = 4;

/// Noise from bandgap ADC jitter
///
/// Each byte folds four conversions, `j = (j << 2) + sample`, with the
/// reference toggled before every conversion. Good enough to keep boards
/// with identical defaults apart, not for key material.
#[derive(Debug)]
pub struct AdcNoise<A: BandgapAdc> {
    adc: A,
}

impl<A: BandgapAdc> AdcNoise<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Give back the ADC
    pub fn into_inner(self) -> A {
        self.adc
    }
}

impl<A: BandgapAdc> NoiseSource for AdcNoise<A> {
    fn sample_u8(&mut self) -> u8 {
        self.adc.enable();

        let mut value: u8 = 0;
        for _ in 0..ADC_SAMPLES_PER_BYTE {
            self.adc.toggle_reference();
            let sample = self.adc.convert_bandgap();
            value = (value << 2).wrapping_add(sample as u8);
        }

        self.adc.disable();
        crate::log_trace!("rng issues {}", value);
        value
    }
}

/// Noise from any `rand_core` generator
#[derive(Debug)]
pub struct RngNoise<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> NoiseSource for RngNoise<R> {
    fn sample_u8(&mut self) -> u8 {
        self.rng.next_u32() as u8
    }

    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockAdc;
    use micropnp_core::parameters::{generate_local_eui64, has_generated_markers};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_adc_folding() {
        let mut noise = AdcNoise::new(MockAdc::new(&[1, 2, 3, 4]));

        // ((1 * 4 + 2) * 4 + 3) * 4 + 4
        assert_eq!(noise.sample_u8(), 112);

        let adc = noise.into_inner();
        assert_eq!(adc.conversions(), 4);
        assert_eq!(adc.toggles(), 4);
        assert!(!adc.is_enabled());
    }

    #[test]
    fn test_adc_folding_wraps() {
        // Only the low byte of each conversion survives
        let mut noise = AdcNoise::new(MockAdc::new(&[0x3FF]));
        let expected = [0xFFu8; 4]
            .iter()
            .fold(0u8, |j, &s| (j << 2).wrapping_add(s));
        assert_eq!(noise.sample_u8(), expected);
    }

    #[test]
    fn test_rng_noise_generates_address() {
        let mut noise = RngNoise::new(SmallRng::seed_from_u64(7));
        let first = generate_local_eui64(&mut noise);
        let second = generate_local_eui64(&mut noise);

        assert!(has_generated_markers(&first));
        assert!(has_generated_markers(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_rng_noise_fill() {
        let mut a = RngNoise::new(SmallRng::seed_from_u64(1));
        let mut b = RngNoise::new(SmallRng::seed_from_u64(1));
        let mut buf_a = [0u8; 16];
        let mut buf_b = [0u8; 16];
        a.fill(&mut buf_a);
        b.fill(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }
}
