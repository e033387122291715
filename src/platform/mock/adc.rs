//! Mock bandgap ADC for testing

use heapless::Vec;

use crate::platform::traits::BandgapAdc;

/// Mock bandgap ADC
///
/// Returns scripted conversion results in a cycle and records how the
/// converter was driven.
#[derive(Debug, Clone, Default)]
pub struct MockAdc {
    readings: Vec<u16, 16>,
    position: usize,
    enabled: bool,
    conversions: u32,
    toggles: u32,
}

impl MockAdc {
    /// Create a mock cycling through `readings` (zero if empty)
    pub fn new(readings: &[u16]) -> Self {
        let mut scripted = Vec::new();
        for &value in readings.iter().take(16) {
            let _ = scripted.push(value);
        }
        Self {
            readings: scripted,
            ..Self::default()
        }
    }

    /// Converter currently powered
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of conversions run
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Number of reference toggles
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

impl BandgapAdc for MockAdc {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn toggle_reference(&mut self) {
        self.toggles += 1;
    }

    fn convert_bandgap(&mut self) -> u16 {
        self.conversions += 1;
        if self.readings.is_empty() {
            return 0;
        }
        let value = self.readings[self.position];
        self.position = (self.position + 1) % self.readings.len();
        value
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}
