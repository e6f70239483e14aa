/*!
 * Hardware Transactional Memory with Locking Fallback
 *
 * Attempts the unit of work as a hardware-backed atomic transaction: all of
 * its memory effects become visible atomically, or none do on abort. Aborts
 * carry a typed reason; retryable aborts are re-attempted up to a configured
 * bound, after which the strategy acquires a fallback mutex to guarantee
 * forward progress.
 *
 * # Lock subscription
 *
 * Inside a transaction the fallback lock's state is read before the work
 * runs. That puts the lock word in the transaction's read set, so a fallback
 * holder (current or arriving mid-transaction) aborts the transactional path
 * and the two execution modes serialize correctly.
 *
 * # Engines
 *
 * The transaction mechanism is a pluggable [`TxEngine`] so the retry/fallback
 * logic is testable without TSX hardware. The shipped [`RtmEngine`] uses x86
 * RTM (`xbegin`/`xend`/`xabort`) behind a runtime feature check and reports
 * [`AbortReason::Unsupported`] everywhere else.
 */

use super::CriticalSection;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Why a transaction attempt did not commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The region executed an explicit abort (e.g. fallback lock observed
    /// held).
    Explicit,
    /// Another executor touched this transaction's read/write set.
    Conflict,
    /// The read/write set outgrew hardware transactional capacity.
    Capacity,
    /// No transactional hardware on this machine.
    Unsupported,
    /// Any other architectural abort cause (interrupt, fault, ...).
    Other,
}

impl AbortReason {
    /// Whether another attempt can plausibly succeed.
    ///
    /// Capacity overflows and missing hardware abort identically on every
    /// retry, so those go straight to the fallback lock.
    pub fn retryable(self) -> bool {
        !matches!(self, AbortReason::Capacity | AbortReason::Unsupported)
    }
}

/// Outcome of [`TxEngine::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// A transaction is open; effects buffer until [`TxEngine::commit`].
    Started,
    /// The attempt aborted (possibly after `Started` was returned and the
    /// hardware rolled execution back to the begin point).
    Abort(AbortReason),
}

/// Transaction mechanism behind [`HtmFallback`].
///
/// `begin` follows x86 RTM semantics: it may return twice, once with
/// `Started` when the transaction opens and, after a hardware rollback of an
/// aborted region, again with the abort reason.
pub trait TxEngine: Sync {
    fn begin(&self) -> TxStatus;

    /// Commit the open transaction. Called only while one is open.
    fn commit(&self);

    /// Explicitly abort the open transaction, if any.
    ///
    /// On hardware this never returns to the caller (control warps to the
    /// begin point); a software engine simply records the request and
    /// returns.
    fn explicit_abort(&self);
}

/// x86 RTM engine. On non-x86_64 targets or parts without TSX every begin
/// reports [`AbortReason::Unsupported`], pushing all work to the fallback.
#[derive(Debug)]
pub struct RtmEngine {
    supported: bool,
}

impl RtmEngine {
    pub fn new() -> Self {
        Self {
            supported: detect_rtm(),
        }
    }

    /// Whether this machine executes real hardware transactions.
    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

impl Default for RtmEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "x86_64")]
fn detect_rtm() -> bool {
    std::is_x86_feature_detected!("rtm")
}

#[cfg(not(target_arch = "x86_64"))]
fn detect_rtm() -> bool {
    false
}

#[cfg(target_arch = "x86_64")]
mod rtm {
    /// `_XBEGIN_STARTED`: eax is all-ones when the transaction opened.
    pub const STARTED: u32 = u32::MAX;
    const ABORT_EXPLICIT: u32 = 1 << 0;
    const ABORT_CONFLICT: u32 = 1 << 2;
    const ABORT_CAPACITY: u32 = 1 << 3;

    /// Open a transaction. Returns [`STARTED`], or the abort status after the
    /// hardware rolls an aborted region back to this point.
    #[inline(always)]
    pub fn xbegin() -> u32 {
        let status: u32;
        unsafe {
            core::arch::asm!(
                "mov eax, 0xffffffff",
                "xbegin 2f",
                "2:",
                out("eax") status,
                options(nostack),
            );
        }
        status
    }

    #[inline(always)]
    pub fn xend() {
        unsafe {
            core::arch::asm!("xend", options(nostack));
        }
    }

    #[inline(always)]
    pub fn xabort() {
        unsafe {
            core::arch::asm!("xabort 0xff", options(nostack));
        }
    }

    pub fn classify(status: u32) -> super::AbortReason {
        if status & ABORT_EXPLICIT != 0 {
            super::AbortReason::Explicit
        } else if status & ABORT_CONFLICT != 0 {
            super::AbortReason::Conflict
        } else if status & ABORT_CAPACITY != 0 {
            super::AbortReason::Capacity
        } else {
            super::AbortReason::Other
        }
    }
}

impl TxEngine for RtmEngine {
    #[cfg(target_arch = "x86_64")]
    #[inline]
    fn begin(&self) -> TxStatus {
        if !self.supported {
            return TxStatus::Abort(AbortReason::Unsupported);
        }
        let status = rtm::xbegin();
        if status == rtm::STARTED {
            TxStatus::Started
        } else {
            TxStatus::Abort(rtm::classify(status))
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[inline]
    fn begin(&self) -> TxStatus {
        TxStatus::Abort(AbortReason::Unsupported)
    }

    #[inline]
    fn commit(&self) {
        #[cfg(target_arch = "x86_64")]
        rtm::xend();
    }

    #[inline]
    fn explicit_abort(&self) {
        #[cfg(target_arch = "x86_64")]
        if self.supported {
            rtm::xabort();
        }
    }
}

/// Transactional strategy with a bounded-retry locking fallback.
pub struct HtmFallback<E: TxEngine = RtmEngine> {
    engine: E,
    fallback: Mutex<()>,
    max_retries: u32,
    aborts: AtomicU64,
    fallbacks: AtomicU64,
}

impl HtmFallback<RtmEngine> {
    /// Strategy backed by real RTM hardware when present.
    pub fn new(max_retries: u32) -> Self {
        Self::with_engine(RtmEngine::new(), max_retries)
    }
}

impl<E: TxEngine> HtmFallback<E> {
    /// Strategy over an explicit engine; tests drive this with engines that
    /// force abort sequences deterministically.
    pub fn with_engine(engine: E, max_retries: u32) -> Self {
        Self {
            engine,
            fallback: Mutex::new(()),
            max_retries,
            aborts: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Total aborted transaction attempts so far.
    pub fn aborts(&self) -> u64 {
        self.aborts.load(Ordering::Relaxed)
    }

    /// Units of work that ended up under the fallback lock.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }
}

impl<E: TxEngine> CriticalSection for HtmFallback<E> {
    fn atomically<R>(&self, mut work: impl FnMut() -> R) -> R {
        let mut attempts = 0;
        while attempts < self.max_retries {
            match self.engine.begin() {
                TxStatus::Started => {
                    // Lock subscription: abort while a fallback holder is
                    // active so the two modes never interleave.
                    if self.fallback.is_locked() {
                        // On hardware this warps back into begin(); the
                        // software path falls through to the retry counter.
                        self.engine.explicit_abort();
                        self.aborts.fetch_add(1, Ordering::Relaxed);
                        attempts += 1;
                        continue;
                    }
                    let out = work();
                    self.engine.commit();
                    return out;
                }
                TxStatus::Abort(reason) => {
                    self.aborts.fetch_add(1, Ordering::Relaxed);
                    if !reason.retryable() {
                        break;
                    }
                    attempts += 1;
                }
            }
        }

        self.fallbacks.fetch_add(1, Ordering::Relaxed);
        let _guard = self.fallback.lock();
        work()
    }

    fn name(&self) -> &'static str {
        "htm"
    }
}
