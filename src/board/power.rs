//! Sleep entry and I/O completion checks

use crate::platform::critical::CriticalSectionGuard;
use crate::platform::traits::{IoStatus, SleepInterface, SleepMode};

/// Enter power-down sleep and return after wake-up
///
/// Arming sleep and dropping brown-out detection is a timed sequence, so
/// both happen inside a critical section. Interrupts must be enabled on
/// entry or nothing can wake the CPU.
pub fn power_down<S: SleepInterface>(sleep: &mut S) {
    sleep.set_mode(SleepMode::PowerDown);
    {
        let _guard = CriticalSectionGuard::acquire();
        sleep.enable();
        sleep.disable_brownout();
    }
    sleep.sleep_cpu();
    sleep.disable();
}

/// Both UARTs finished transmitting and the radio line is idle
pub fn io_done<I: IoStatus>(io: &I) -> bool {
    io.uart_tx_complete(1) && io.uart_tx_complete(0) && io.radio_idle()
}
