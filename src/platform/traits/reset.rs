//! Reset status interface trait

/// Reset status register access
pub trait ResetStatus {
    /// Return the raw reset flags and clear them so the next boot starts clean
    fn take(&mut self) -> u8;
}
