//! ADC interface used as a noise source
//!
//! Only the bandgap measurement is needed: with the reference toggled just
//! before each conversion, the low bits jitter enough to seed identifiers.

/// Bandgap ADC interface trait
pub trait BandgapAdc {
    /// Power up the converter (single conversion mode, interrupts off)
    fn enable(&mut self);

    /// Disturb the reference selection to increase noise
    fn toggle_reference(&mut self);

    /// Run one blocking conversion of the internal bandgap reference
    fn convert_bandgap(&mut self) -> u16;

    /// Power down the converter
    fn disable(&mut self);
}
