/*!
 * Synchronization Strategies
 *
 * Pluggable critical-section execution for the trial workers:
 * - Uncoordinated (no guarantee) for the unsynchronized baseline
 * - Blocking mutex (parking_lot) for conventional exclusion
 * - Elision spin lock using x86 hardware lock elision prefixes
 * - Hardware transactional memory with a bounded-retry locking fallback
 *
 * # Architecture
 *
 * The trial executor depends only on the [`CriticalSection`] capability and
 * is monomorphized per variant; callers never inspect lock state. Every
 * locking variant releases through a drop guard, so a panicking unit of work
 * propagates only after the lock is released.
 */

mod elision;
mod htm;
mod mutex;
mod uncoordinated;

pub use elision::ElisionSpin;
pub use htm::{AbortReason, HtmFallback, RtmEngine, TxEngine, TxStatus};
pub use mutex::BlockingMutex;
pub use uncoordinated::Uncoordinated;

/// Capability to execute a unit of work with a mutual-exclusion/atomicity
/// guarantee that varies by variant.
///
/// The closure is `FnMut` because the transactional variant may re-run an
/// aborted attempt before committing or falling back.
pub trait CriticalSection: Sync {
    /// Execute `work` under this strategy's guarantee and return its result.
    fn atomically<R>(&self, work: impl FnMut() -> R) -> R;

    /// Short name used for series labels and error context.
    fn name(&self) -> &'static str;
}
