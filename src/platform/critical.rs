//! Scoped critical sections
//!
//! Storage updates that span several bytes must not be interleaved with an
//! interrupt handler. `CriticalSectionGuard` disables interrupts through the
//! `critical-section` crate on creation and restores the saved state when
//! dropped, on every exit path.
//!
//! ```
//! use micropnp::platform::critical::CriticalSectionGuard;
//!
//! {
//!     let _guard = CriticalSectionGuard::acquire();
//!     assert_eq!(CriticalSectionGuard::nesting(), 1);
//! }
//! assert_eq!(CriticalSectionGuard::nesting(), 0);
//! ```

use core::marker::PhantomData;
use core::sync::atomic::{AtomicU8, Ordering};

use critical_section::RestoreState;

/// Number of live guards. Only modified while a critical section is held,
/// so plain load/store is enough on single-core parts.
static NESTING: AtomicU8 = AtomicU8::new(0);

/// RAII critical section
///
/// Guards may nest; they must be dropped in reverse order of acquisition,
/// which scoping guarantees.
pub struct CriticalSectionGuard {
    restore: RestoreState,
    // Restoring interrupt state on another context would be unsound
    _not_send: PhantomData<*mut ()>,
}

impl CriticalSectionGuard {
    /// Disable interrupts and remember the previous state
    pub fn acquire() -> Self {
        // SAFETY: the matching release happens exactly once, in Drop, and
        // guards cannot outlive the scope that created them in reverse order.
        let restore = unsafe { critical_section::acquire() };
        NESTING.store(NESTING.load(Ordering::Relaxed).saturating_add(1), Ordering::Relaxed);
        Self {
            restore,
            _not_send: PhantomData,
        }
    }

    /// Token for APIs that take `critical_section::CriticalSection`
    pub fn token(&self) -> critical_section::CriticalSection<'_> {
        // SAFETY: interrupts stay disabled for as long as `self` is borrowed
        unsafe { critical_section::CriticalSection::new() }
    }

    /// Number of guards currently held
    pub fn nesting() -> u8 {
        NESTING.load(Ordering::Relaxed)
    }

    /// Run `f` inside a fresh guard
    pub fn with<R>(f: impl FnOnce() -> R) -> R {
        let _guard = Self::acquire();
        f()
    }
}

impl Drop for CriticalSectionGuard {
    fn drop(&mut self) {
        NESTING.store(NESTING.load(Ordering::Relaxed).saturating_sub(1), Ordering::Relaxed);
        // SAFETY: `restore` came from the matching `acquire` in `Self::acquire`
        unsafe { critical_section::release(self.restore) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use critical_section::Mutex;

    #[test]
    fn test_guard_nests_and_releases() {
        let outer = CriticalSectionGuard::acquire();
        assert!(CriticalSectionGuard::nesting() >= 1);
        {
            let _inner = CriticalSectionGuard::acquire();
            assert!(CriticalSectionGuard::nesting() >= 2);
        }
        drop(outer);

        // A released section can be entered again
        let value = critical_section::with(|_| 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_guard_released_on_early_return() {
        fn bail(fail: bool) -> Result<u8, ()> {
            let _guard = CriticalSectionGuard::acquire();
            if fail {
                return Err(());
            }
            Ok(1)
        }

        assert!(bail(true).is_err());
        assert_eq!(bail(false), Ok(1));
        assert_eq!(CriticalSectionGuard::with(|| 3), 3);
    }

    #[test]
    fn test_token_borrows_mutex() {
        static COUNTER: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

        let guard = CriticalSectionGuard::acquire();
        let cell = COUNTER.borrow(guard.token());
        cell.set(cell.get() + 1);
        assert_eq!(cell.get(), 1);
    }
}
