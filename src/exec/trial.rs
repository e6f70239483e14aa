/*!
 * Trial Executor
 *
 * Fans out `level * multiplier` workers, each draining one value stream
 * end-to-end with every store operation individually wrapped in the
 * strategy's critical section, and times the whole barrier-synchronized run.
 *
 * # Timing
 *
 * Workers launch only after setup (pre-population, stream materialization)
 * is complete. The clock starts immediately before the first spawn and stops
 * only after the last worker has fully drained its stream; the scoped join is
 * the trial's barrier. The caller divides the wall-clock duration by the
 * read-stream length for a per-operation estimate, which is comparable
 * across role counts because every role's stream has the same nominal
 * length.
 *
 * # Failure semantics
 *
 * A read or update worker that misses a base key stops its own loop
 * immediately, and after every worker has joined the trial returns the fatal
 * [`TrialError::MissingBaseKey`]. Nothing is retried or suppressed inside a
 * worker loop; the fault indicates a benchmark-setup bug, not a reportable
 * runtime condition.
 */

use crate::core::errors::TrialError;
use crate::core::types::{Key, Role};
use crate::exec::OperationMix;
use crate::store::SharedStore;
use crate::strategy::CriticalSection;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-role value streams for one trial. Read-only for the trial's duration;
/// the read stream doubles as the update roles' target list and as the
/// per-operation normalization length.
#[derive(Debug, Clone, Copy)]
pub struct TrialStreams<'a> {
    /// Base keys; drained by read and update workers.
    pub reads: &'a [Key],
    /// Fresh sparse keys; drained by write workers.
    pub writes: &'a [Key],
}

/// Run one barrier-synchronized trial and return its wall-clock duration.
pub fn run_trial<S, C>(
    level: usize,
    mix: OperationMix,
    store: &S,
    strategy: &C,
    streams: TrialStreams<'_>,
) -> Result<Duration, TrialError>
where
    S: SharedStore,
    C: CriticalSection,
{
    if level < 1 {
        return Err(TrialError::InvalidLevel { level });
    }
    let multiplier = mix.multiplier();
    if multiplier == 0 {
        return Err(TrialError::EmptyMix);
    }

    let workers = level * multiplier;
    debug!(
        level,
        workers,
        strategy = strategy.name(),
        reads = mix.reads,
        writes = mix.writes,
        updates = mix.updates,
        "starting trial"
    );

    let mut first_err: Option<TrialError> = None;
    let mut panic_payload = None;

    let start = Instant::now();
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _slot in 0..level {
            for role in mix.roles() {
                handles.push(scope.spawn(move || run_worker(role, store, strategy, streams)));
            }
        }
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_err.get_or_insert(err);
                }
                Err(payload) => {
                    panic_payload.get_or_insert(payload);
                }
            }
        }
    });
    let elapsed = start.elapsed();

    // A panicking unit of work propagates after every worker has joined, so
    // the strategy's resources are already released.
    if let Some(payload) = panic_payload {
        std::panic::resume_unwind(payload);
    }
    if let Some(err) = first_err {
        return Err(err);
    }

    debug!(
        level,
        workers,
        strategy = strategy.name(),
        elapsed_ms = elapsed.as_millis() as u64,
        "trial finished"
    );
    Ok(elapsed)
}

/// One worker: drain the role's stream once, one store operation per value,
/// each wrapped individually in the strategy's critical section.
fn run_worker<S, C>(
    role: Role,
    store: &S,
    strategy: &C,
    streams: TrialStreams<'_>,
) -> Result<(), TrialError>
where
    S: SharedStore,
    C: CriticalSection,
{
    match role {
        Role::Read => {
            for &key in streams.reads {
                let found = strategy.atomically(|| store.contains(key));
                if !found {
                    return Err(TrialError::missing_base_key(key, role, strategy.name()));
                }
            }
        }
        Role::Write => {
            for &key in streams.writes {
                strategy.atomically(|| store.put(key, 0));
            }
        }
        Role::Update => {
            for &key in streams.reads {
                let updated = strategy.atomically(|| match store.get(key) {
                    Some(current) => {
                        store.put(key, current.wrapping_add(1));
                        true
                    }
                    None => false,
                });
                if !updated {
                    return Err(TrialError::missing_base_key(key, role, strategy.name()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{populate, HashStore};
    use crate::strategy::Uncoordinated;
    use crate::values::RandValues;

    #[test]
    fn rejects_level_zero() {
        let store = HashStore::new();
        let streams = TrialStreams {
            reads: &[],
            writes: &[],
        };
        let err = run_trial(0, OperationMix::READ_ONLY, &store, &Uncoordinated, streams);
        assert_eq!(err, Err(TrialError::InvalidLevel { level: 0 }));
    }

    #[test]
    fn rejects_empty_mix() {
        let store = HashStore::new();
        let streams = TrialStreams {
            reads: &[],
            writes: &[],
        };
        let mix = OperationMix {
            reads: false,
            writes: false,
            updates: false,
        };
        let err = run_trial(1, mix, &store, &Uncoordinated, streams);
        assert_eq!(err, Err(TrialError::EmptyMix));
    }

    #[test]
    fn missing_base_key_is_fatal_with_context() {
        let store = HashStore::new();
        let reads = RandValues::<i32>::seeded(5).add_sparse(100).into_vec();
        // Deliberately skip pre-population.
        let streams = TrialStreams {
            reads: &reads,
            writes: &[],
        };
        let err = run_trial(1, OperationMix::READ_ONLY, &store, &Uncoordinated, streams)
            .expect_err("unpopulated store must fail the read role");
        match err {
            TrialError::MissingBaseKey { key, role, strategy } => {
                assert_eq!(key, reads[0]);
                assert_eq!(role, Role::Read);
                assert_eq!(strategy, "none");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn update_role_increments_base_keys() {
        let store = HashStore::new();
        let reads: Vec<i32> = (0..64).collect();
        populate(&store, &reads);
        let streams = TrialStreams {
            reads: &reads,
            writes: &[],
        };
        let mix = OperationMix {
            reads: false,
            writes: false,
            updates: true,
        };
        run_trial(1, mix, &store, &Uncoordinated, streams).unwrap();
        for &key in &reads {
            assert_eq!(store.get(key), Some(1));
        }
    }
}
