//! Mock sleep controller and I/O status for testing

use heapless::Vec;

use crate::platform::critical::CriticalSectionGuard;
use crate::platform::traits::{IoStatus, SleepInterface, SleepMode};

/// Operation recorded by [`MockSleep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOp {
    /// Mode selected
    SetMode(SleepMode),
    /// Sleep enable armed; `guarded` is true inside a critical section
    Enable { guarded: bool },
    /// Brown-out detection dropped; `guarded` as above
    DisableBrownout { guarded: bool },
    /// Sleep instruction executed
    Sleep,
    /// Sleep enable disarmed
    Disable,
}

/// Mock sleep controller recording the operation sequence
#[derive(Debug, Clone, Default)]
pub struct MockSleep {
    ops: Vec<SleepOp, 16>,
}

impl MockSleep {
    /// Create a mock with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations in call order
    pub fn ops(&self) -> &[SleepOp] {
        &self.ops
    }

    fn record(&mut self, op: SleepOp) {
        let _ = self.ops.push(op);
    }
}

impl SleepInterface for MockSleep {
    fn set_mode(&mut self, mode: SleepMode) {
        self.record(SleepOp::SetMode(mode));
    }

    fn enable(&mut self) {
        let guarded = CriticalSectionGuard::nesting() > 0;
        self.record(SleepOp::Enable { guarded });
    }

    fn disable_brownout(&mut self) {
        let guarded = CriticalSectionGuard::nesting() > 0;
        self.record(SleepOp::DisableBrownout { guarded });
    }

    fn sleep_cpu(&mut self) {
        self.record(SleepOp::Sleep);
    }

    fn disable(&mut self) {
        self.record(SleepOp::Disable);
    }
}

/// Mock I/O status with settable flags
#[derive(Debug, Clone, Copy, Default)]
pub struct MockIo {
    /// Transmit-complete flags for UART 0 and 1
    pub uart_tx_complete: [bool; 2],
    /// Radio interrupt line idle
    pub radio_idle: bool,
}

impl MockIo {
    /// All transfers finished
    pub fn idle() -> Self {
        Self {
            uart_tx_complete: [true; 2],
            radio_idle: true,
        }
    }
}

impl IoStatus for MockIo {
    fn uart_tx_complete(&self, port: u8) -> bool {
        self.uart_tx_complete
            .get(port as usize)
            .copied()
            .unwrap_or(false)
    }

    fn radio_idle(&self) -> bool {
        self.radio_idle
    }
}
