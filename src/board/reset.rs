//! Reset cause reporting
//!
//! The MCU status register latches why the last reset happened. It is read
//! and cleared once at boot so the next reset reports only its own cause.

use bitflags::bitflags;

use crate::platform::traits::ResetStatus;

bitflags! {
    /// Reset causes latched by the MCU status register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResetCause: u8 {
        /// Power-on reset
        const POWER_ON = 0b0000_0001;
        /// External reset pin
        const EXTERNAL = 0b0000_0010;
        /// Brown-out detector
        const BROWN_OUT = 0b0000_0100;
        /// Watchdog timeout
        const WATCHDOG = 0b0000_1000;
        /// JTAG reset instruction
        const JTAG = 0b0001_0000;
    }
}

impl ResetCause {
    /// Human readable description of each single cause
    const DESCRIPTIONS: [(ResetCause, &'static str); 5] = [
        (ResetCause::POWER_ON, "power-on reset"),
        (ResetCause::EXTERNAL, "external reset"),
        (ResetCause::BROWN_OUT, "brown-out reset"),
        (ResetCause::WATCHDOG, "watchdog reset"),
        (ResetCause::JTAG, "JTAG reset"),
    ];

    /// Descriptions of every cause present
    pub fn descriptions(self) -> impl Iterator<Item = &'static str> {
        Self::DESCRIPTIONS
            .into_iter()
            .filter(move |(cause, _)| self.contains(*cause))
            .map(|(_, text)| text)
    }
}

/// Read and clear the reset cause
///
/// Unknown bits are dropped.
pub fn read_reset_cause<R: ResetStatus>(status: &mut R) -> ResetCause {
    ResetCause::from_bits_truncate(status.take())
}

/// Log every reset cause present
pub fn log_reset_cause(cause: ResetCause) {
    if cause.is_empty() {
        crate::log_info!("reset cause unknown");
        return;
    }
    for text in cause.descriptions() {
        crate::log_info!("{}", text);
    }
}
