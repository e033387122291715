//! Mock reset status register for testing

use crate::platform::traits::ResetStatus;

/// Mock reset status register
///
/// Holds raw flags until taken, then reads as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResetStatus {
    flags: u8,
}

impl MockResetStatus {
    /// Create a register holding `flags`
    pub fn new(flags: u8) -> Self {
        Self { flags }
    }

    /// Current raw value
    pub fn flags(&self) -> u8 {
        self.flags
    }
}

impl ResetStatus for MockResetStatus {
    fn take(&mut self) -> u8 {
        core::mem::take(&mut self.flags)
    }
}
