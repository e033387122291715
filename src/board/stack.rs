//! Stack high-water monitor
//!
//! At boot the free RAM between the end of static data and the live stack
//! is painted with a 16-bit marker every [`STACK_STRIDE`] bytes. Later, the
//! first marker that no longer reads back shows how deep the stack has
//! grown.
//!
//! ```text
//! bss end                                              stack pointer
//! │42 42 .. .. .. .. .. .. .. ..│42 42 .. ..   ...   │ (10 byte margin) │
//! ```

use bitflags::bitflags;

/// Marker written into unused stack
pub const STACK_MAGIC: u16 = 0x4242;

/// Distance between markers in bytes
pub const STACK_STRIDE: usize = 10;

/// Seconds between time stamps
pub const STAMP_INTERVAL: u32 = 60;

/// Seconds between stack reports
pub const STACK_REPORT_INTERVAL: u32 = 1024;

/// Second within each interval at which the stack report is due
pub const STACK_REPORT_PHASE: u32 = 3;

/// Paint markers over `region`, stopping one stride short of its end
///
/// `region` runs from the end of static data up to the current stack
/// pointer. Returns the number of markers written.
pub fn paint(region: &mut [u8]) -> usize {
    let limit = region.len().saturating_sub(STACK_STRIDE);
    let mut offset = 0;
    let mut painted = 0;

    // The first marker is always written, as long as it fits
    loop {
        if offset + 2 > region.len() {
            break;
        }
        region[offset..offset + 2].copy_from_slice(&STACK_MAGIC.to_le_bytes());
        painted += 1;
        offset += STACK_STRIDE;
        if offset >= limit {
            break;
        }
    }
    painted
}

/// Offset of the first overwritten marker in `region`
///
/// That many bytes above the end of static data have never been used by
/// the stack. `None` if every marker up to one stride before the end is
/// intact.
pub fn never_used(region: &[u8]) -> Option<usize> {
    let limit = region.len().saturating_sub(STACK_STRIDE);
    let mut offset = 0;

    loop {
        if offset + 2 > region.len() {
            return None;
        }
        let marker = u16::from_le_bytes([region[offset], region[offset + 1]]);
        if marker != STACK_MAGIC {
            return Some(offset);
        }
        offset += STACK_STRIDE;
        if offset >= limit {
            return None;
        }
    }
}

/// Log the never-used stack size, if a marker has been overwritten
pub fn report_stack(region: &[u8]) {
    if let Some(unused) = never_used(region) {
        crate::log_info!("never-used stack > {} bytes", unused);
    }
}

bitflags! {
    /// Reports due at a given second
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Reports: u8 {
        /// Uptime stamp
        const STAMP = 0b01;
        /// Stack high-water report
        const STACK = 0b10;
    }
}

/// Decides which periodic reports are due, once per clock second
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicReports {
    last_second: u32,
}

impl PeriodicReports {
    /// Start at second 0, which is treated as already handled
    pub const fn new() -> Self {
        Self { last_second: 0 }
    }

    /// Reports due at `seconds`; empty unless the second changed
    pub fn poll(&mut self, seconds: u32) -> Reports {
        if seconds == self.last_second {
            return Reports::empty();
        }
        self.last_second = seconds;

        let mut due = Reports::empty();
        if seconds % STAMP_INTERVAL == 0 {
            due |= Reports::STAMP;
        }
        if seconds % STACK_REPORT_INTERVAL == STACK_REPORT_PHASE {
            due |= Reports::STACK;
        }
        due
    }

    /// Poll and emit whatever is due
    pub fn run(&mut self, seconds: u32, stack_region: &[u8]) -> Reports {
        let due = self.poll(seconds);
        if due.contains(Reports::STAMP) {
            crate::log_info!("{}s", seconds);
        }
        if due.contains(Reports::STACK) {
            report_stack(stack_region);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_pattern() {
        let mut region = [0u8; 45];
        assert_eq!(paint(&mut region), 4);

        for offset in [0, 10, 20, 30] {
            assert_eq!(&region[offset..offset + 2], &[0x42, 0x42]);
        }
        assert_eq!(region[2], 0);
        // Last stride before the end is left alone
        assert!(region[35..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_paint_tiny_regions() {
        let mut empty: [u8; 0] = [];
        assert_eq!(paint(&mut empty), 0);

        let mut small = [0u8; 4];
        assert_eq!(paint(&mut small), 1);
        assert_eq!(small, [0x42, 0x42, 0, 0]);
    }

    #[test]
    fn test_never_used_intact() {
        let mut region = [0u8; 100];
        paint(&mut region);
        assert_eq!(never_used(&region), None);
    }

    #[test]
    fn test_never_used_finds_first_overwrite() {
        let mut region = [0u8; 100];
        paint(&mut region);
        region[51] = 0x00;
        region[71] = 0x00;
        assert_eq!(never_used(&region), Some(50));

        region[0] = 0x13;
        assert_eq!(never_used(&region), Some(0));
        report_stack(&region);
    }

    #[test]
    fn test_periodic_reports() {
        let mut reports = PeriodicReports::new();

        assert_eq!(reports.poll(0), Reports::empty());
        assert_eq!(reports.poll(1), Reports::empty());
        assert_eq!(reports.poll(3), Reports::STACK);
        assert_eq!(reports.poll(3), Reports::empty());
        assert_eq!(reports.poll(60), Reports::STAMP);
        assert_eq!(reports.poll(60), Reports::empty());
        assert_eq!(reports.poll(1027), Reports::STACK);
        assert_eq!(reports.poll(61440 + 3), Reports::STACK);
    }

    #[test]
    fn test_reports_never_coincide() {
        let mut reports = PeriodicReports::new();
        let mut stacks = 0;
        for second in 1..=10_000 {
            let due = reports.poll(second);
            assert_ne!(due, Reports::all());
            if due.contains(Reports::STACK) {
                stacks += 1;
            }
        }
        assert_eq!(stacks, 10);
    }

    #[test]
    fn test_run_emits_due_reports() {
        let mut region = [0u8; 40];
        paint(&mut region);

        let mut reports = PeriodicReports::new();
        assert_eq!(reports.run(3, &region), Reports::STACK);
        assert_eq!(reports.run(120, &region), Reports::STAMP);
    }
}
