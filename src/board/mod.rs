//! Board bring-up helpers
//!
//! Reset cause reporting, stack monitoring, sleep entry and noise sources
//! for the MicroPnP node. Register access goes through the platform traits.

pub mod power;
pub mod reset;
pub mod rng;
pub mod stack;

pub use power::{io_done, power_down};
pub use reset::{log_reset_cause, read_reset_cause, ResetCause};
pub use rng::{AdcNoise, RngNoise};
pub use stack::{never_used, paint, PeriodicReports, Reports};

use crate::platform::traits::ResetStatus;

/// Firmware version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the boot banner
pub fn announce_boot(version: &str) {
    crate::log_info!("******* Booting MicroPnP {} *******", version);
}

/// Early boot sequence
///
/// Reads and logs the reset cause, paints the free stack region if one is
/// given, and announces the boot. Returns the reset cause.
pub fn initialize<R: ResetStatus>(status: &mut R, stack_region: Option<&mut [u8]>) -> ResetCause {
    let cause = read_reset_cause(status);
    log_reset_cause(cause);

    if let Some(region) = stack_region {
        let markers = paint(region);
        crate::log_debug!("stack monitor: {} markers", markers);
    }

    announce_boot(VERSION);
    cause
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockResetStatus;

    #[test]
    fn test_initialize() {
        let mut status = MockResetStatus::new(ResetCause::EXTERNAL.bits());
        let mut region = [0u8; 64];

        let cause = initialize(&mut status, Some(&mut region));
        assert_eq!(cause, ResetCause::EXTERNAL);
        assert_eq!(status.flags(), 0);
        assert_eq!(&region[..2], &[0x42, 0x42]);
        assert_eq!(never_used(&region), None);
    }

    #[test]
    fn test_initialize_without_stack_region() {
        let mut status = MockResetStatus::new(0);
        assert_eq!(initialize(&mut status, None), ResetCause::empty());
    }
}
