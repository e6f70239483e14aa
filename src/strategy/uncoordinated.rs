/*!
 * Uncoordinated Baseline
 * Runs the unit of work directly, with no exclusion guarantee
 */

use super::CriticalSection;

/// No-guarantee strategy.
///
/// Exists specifically to measure the unsynchronized upper-bound baseline:
/// concurrent mutation races are expected and intentionally measured, never
/// prevented. The read role's found-assertion stays valid only because the
/// write and update roles add keys and never remove them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Uncoordinated;

impl CriticalSection for Uncoordinated {
    #[inline]
    fn atomically<R>(&self, mut work: impl FnMut() -> R) -> R {
        work()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
