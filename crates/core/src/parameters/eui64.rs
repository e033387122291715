//! Locally administered EUI-64 generation
//!
//! Generated addresses keep the 16-to-64-bit expansion marker so the
//! interface identifier stays compressible:
//!
//! ```text
//! 02 NN NN FF FE NN NN NN
//! ```

use super::types::Eui64;
use crate::traits::NoiseSource;

/// Byte 0 of a generated address: locally administered, unicast
pub const LOCAL_UNICAST_MARKER: u8 = 0x02;

/// Bytes 3-4 of a generated address
pub const EXPANSION_MARKER: [u8; 2] = [0xFF, 0xFE];

/// Generates a new address from `noise`.
///
/// Draws exactly five samples, in address order.
pub fn generate_local_eui64<N: NoiseSource>(noise: &mut N) -> Eui64 {
    let mut eui64 = [0u8; 8];
    eui64[0] = LOCAL_UNICAST_MARKER;
    eui64[1] = noise.sample_u8();
    eui64[2] = noise.sample_u8();
    eui64[3] = EXPANSION_MARKER[0];
    eui64[4] = EXPANSION_MARKER[1];
    eui64[5] = noise.sample_u8();
    eui64[6] = noise.sample_u8();
    eui64[7] = noise.sample_u8();
    eui64
}

/// Returns true if `eui64` carries the fixed markers of a generated address.
pub fn has_generated_markers(eui64: &Eui64) -> bool {
    eui64[0] == LOCAL_UNICAST_MARKER && eui64[3..5] == EXPANSION_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockNoise;

    #[test]
    fn test_generated_layout() {
        let mut noise = MockNoise::new(&[0x11, 0x22, 0x33, 0x44, 0x55]);
        let eui64 = generate_local_eui64(&mut noise);
        assert_eq!(eui64, [0x02, 0x11, 0x22, 0xFF, 0xFE, 0x33, 0x44, 0x55]);
        assert_eq!(noise.samples_taken(), 5);
    }

    #[test]
    fn test_markers_survive_any_noise() {
        for pattern in [[0x00u8; 5], [0xFF; 5], [0x02, 0xFE, 0xFF, 0x01, 0x80]] {
            let mut noise = MockNoise::new(&pattern);
            let eui64 = generate_local_eui64(&mut noise);
            assert!(has_generated_markers(&eui64));
        }
    }

    #[test]
    fn test_marker_check_rejects_other_addresses() {
        assert!(!has_generated_markers(&[0x00, 0, 0, 0xFF, 0xFE, 0, 0, 1]));
        assert!(!has_generated_markers(&[0x02, 0, 0, 0xFE, 0xFF, 0, 0, 1]));
        assert!(has_generated_markers(&[0x02, 0, 0, 0xFF, 0xFE, 0, 0, 1]));
    }
}
