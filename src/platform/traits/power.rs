//! Sleep and I/O status interface traits

/// CPU sleep modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepMode {
    /// CPU halted, peripherals and clocks running
    Idle,
    /// Only asynchronous wake sources (pin change, watchdog, TWI address match)
    PowerDown,
    /// Power-down with the asynchronous timer kept running
    PowerSave,
}

/// Sleep controller interface trait
///
/// Mirrors the usual MCU sleep sequence: select a mode, arm the sleep
/// enable bit, optionally drop brown-out detection, execute the sleep
/// instruction, disarm.
pub trait SleepInterface {
    /// Select the mode entered by the next `sleep_cpu`
    fn set_mode(&mut self, mode: SleepMode);

    /// Arm the sleep enable bit
    fn enable(&mut self);

    /// Disable brown-out detection for the coming sleep (timed sequence)
    fn disable_brownout(&mut self);

    /// Execute the sleep instruction; returns after wake-up
    fn sleep_cpu(&mut self);

    /// Disarm the sleep enable bit
    fn disable(&mut self);
}

/// I/O completion status
pub trait IoStatus {
    /// Transmit-complete flag of UART `port`
    fn uart_tx_complete(&self, port: u8) -> bool;

    /// Radio interrupt line is idle
    fn radio_idle(&self) -> bool;
}
