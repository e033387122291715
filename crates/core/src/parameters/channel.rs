//! Channel sentinel record
//!
//! The channel is stored next to its bitwise complement. The pair doubles as
//! the integrity sentinel for the whole fixed-slot record: if it does not
//! verify, every field is considered corrupt.
//!
//! ```text
//! offset +0: channel
//! offset +1: !channel
//! ```

use super::types::is_valid_channel;

/// Size of the stored channel pair
pub const CHANNEL_RECORD_SIZE: usize = 2;

/// Outcome of checking a stored channel pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCheck {
    /// Pair verifies and the channel is in range
    Valid(u8),
    /// Pair is corrupt; the record must be rewritten
    Corrupt,
}

impl ChannelCheck {
    /// Returns true if the record needs repair
    pub fn is_corrupt(&self) -> bool {
        matches!(self, ChannelCheck::Corrupt)
    }
}

/// Encodes a channel and its complement.
pub const fn encode(channel: u8) -> [u8; CHANNEL_RECORD_SIZE] {
    [channel, !channel]
}

/// Encodes as the little-endian word written to storage.
pub const fn encode_word(channel: u8) -> u16 {
    u16::from_le_bytes(encode(channel))
}

/// Checks a raw stored pair.
///
/// An out-of-range channel poisons the complement (it is replaced by the
/// channel itself, which can never be its own complement) so that range
/// failures and complement failures take the same repair path.
pub fn check(raw: [u8; CHANNEL_RECORD_SIZE]) -> ChannelCheck {
    let channel = raw[0];
    let mut complement = raw[1];

    if !is_valid_channel(channel) {
        complement = channel;
    }

    if channel != !complement {
        return ChannelCheck::Corrupt;
    }

    ChannelCheck::Valid(channel)
}

/// Checks the little-endian word read from storage.
pub fn check_word(word: u16) -> ChannelCheck {
    check(word.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::types::{CHANNEL_MAX, CHANNEL_MIN};

    #[test]
    fn test_every_valid_channel_verifies() {
        for channel in CHANNEL_MIN..=CHANNEL_MAX {
            assert_eq!(check(encode(channel)), ChannelCheck::Valid(channel));
            assert_eq!(check_word(encode_word(channel)), ChannelCheck::Valid(channel));
        }
    }

    #[test]
    fn test_mismatched_complement_is_corrupt() {
        for channel in CHANNEL_MIN..=CHANNEL_MAX {
            for complement in [0x00u8, 0xFF, channel, !channel ^ 0x01] {
                assert!(check([channel, complement]).is_corrupt());
            }
        }
    }

    #[test]
    fn test_out_of_range_channel_is_corrupt_even_with_complement() {
        for channel in (0..CHANNEL_MIN).chain(CHANNEL_MAX + 1..=0xFF) {
            assert!(check(encode(channel)).is_corrupt(), "channel {}", channel);
        }
    }

    #[test]
    fn test_erased_storage_is_corrupt() {
        assert!(check([0xFF, 0xFF]).is_corrupt());
        assert!(check_word(0xFFFF).is_corrupt());
    }

    #[test]
    fn test_known_pair() {
        assert_eq!(encode(26), [26, 0xE5]);
        assert_eq!(check([26, 0xE5]), ChannelCheck::Valid(26));
        assert!(check([26, 0x00]).is_corrupt());
    }
}
