//! CRC-8 for settings record validation
//!
//! Each keyed settings record carries a one-byte checksum over its key,
//! length and data. A byte keeps the per-record overhead small on parts
//! with only a few kilobytes of EEPROM.

use crc::{Crc, CRC_8_SMBUS};

/// CRC-8 algorithm (SMBus PEC, polynomial 0x07)
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Calculate the CRC-8 of a settings record.
///
/// # Example
///
/// ```
/// use micropnp_core::parameters::crc::record_crc8;
///
/// let crc = record_crc8(*b"CH", &[26]);
/// assert_eq!(crc, record_crc8(*b"CH", &[26]));
/// assert_ne!(crc, record_crc8(*b"CH", &[25]));
/// ```
pub fn record_crc8(key: [u8; 2], data: &[u8]) -> u8 {
    let mut digest = CRC8.digest();
    digest.update(&key);
    digest.update(&[data.len() as u8]);
    digest.update(data);
    digest.finalize()
}

/// Calculate the CRC-8 of arbitrary data
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_known_value() {
        // CRC-8/SMBUS check value
        assert_eq!(calculate_crc8(b"123456789"), 0xF4);
        assert_eq!(calculate_crc8(b""), 0x00);
    }

    #[test]
    fn test_record_crc_covers_header_and_data() {
        let base = record_crc8(*b"PN", &[0xCD, 0xAB]);
        assert_eq!(base, calculate_crc8(&[b'P', b'N', 2, 0xCD, 0xAB]));
        assert_ne!(base, record_crc8(*b"PA", &[0xCD, 0xAB]));
        assert_ne!(base, record_crc8(*b"PN", &[0xCD, 0xAB, 0x00]));
    }

    #[test]
    fn test_crc8_detects_single_bit_flip() {
        let data = [0x02, 0x00, 0x00, 0xFF, 0xFE, 0x00, 0x00, 0x01];
        let crc = calculate_crc8(&data);
        for i in 0..data.len() {
            let mut corrupted = data;
            corrupted[i] ^= 0x01;
            assert_ne!(calculate_crc8(&corrupted), crc);
        }
    }
}
