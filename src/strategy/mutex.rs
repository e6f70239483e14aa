/*!
 * Blocking Mutex Strategy
 * One shared exclusive lock around every unit of work
 */

use super::CriticalSection;
use parking_lot::Mutex;

/// Conventional blocking-mutex strategy.
///
/// Acquires a single shared exclusive lock before the unit of work and
/// releases it unconditionally afterward; the guard drops during unwinding,
/// so a panicking unit of work cannot leak the lock.
#[derive(Debug, Default)]
pub struct BlockingMutex {
    lock: Mutex<()>,
}

impl BlockingMutex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CriticalSection for BlockingMutex {
    #[inline]
    fn atomically<R>(&self, mut work: impl FnMut() -> R) -> R {
        let _guard = self.lock.lock();
        work()
    }

    fn name(&self) -> &'static str {
        "mutex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn lock_released_after_panicking_work() {
        let strategy = BlockingMutex::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            strategy.atomically(|| panic!("boom"));
        }));
        assert!(result.is_err());

        // A leaked guard would deadlock here.
        assert_eq!(strategy.atomically(|| 5), 5);
    }
}
