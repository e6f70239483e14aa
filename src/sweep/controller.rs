/*!
 * Sweep Controller
 *
 * Drives the trial executor once per (strategy, concurrency level), converts
 * wall-clock durations into per-operation times, and accumulates named
 * series. Trials are strictly sequential, so each trial's contention comes
 * only from its own workers, and the controller settles the heap between
 * trials by dropping the previous trial's store before the next begins.
 */

use crate::core::errors::TrialError;
use crate::core::types::Key;
use crate::exec::{run_trial, OperationMix, TrialStreams};
use crate::store::{populate, SharedStore};
use crate::strategy::CriticalSection;
use crate::sweep::SeriesSet;
use crate::values::RandValues;
use std::num::NonZeroUsize;
use std::thread;
use tracing::info;

/// Sweep parameters.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Stream length per role; also the base key set size and the per-op
    /// normalization divisor.
    pub entries: usize,
    /// Upper concurrency bound for single-role mixes; multi-role mixes sweep
    /// to half of this so total worker count stays bounded.
    pub max_level: usize,
    /// Retry bound for the transactional strategy.
    pub htm_retries: u32,
    /// Fixed stream seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            entries: 300_000,
            max_level: discovered_parallelism(),
            htm_retries: 10,
            seed: None,
        }
    }
}

/// Maximum parallelism the runtime reports for this process.
pub fn discovered_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// One sweep over a store kind: owns the value streams shared by every
/// strategy series so all strategies see identical workloads.
pub struct Sweep {
    config: SweepConfig,
    reads: Vec<Key>,
    writes: Vec<Key>,
}

impl Sweep {
    /// Materialize the read and write streams for this sweep.
    pub fn new(config: SweepConfig) -> Self {
        let (read_builder, write_builder) = match config.seed {
            Some(seed) => (RandValues::seeded(seed), RandValues::seeded(seed ^ 1)),
            None => (RandValues::new(), RandValues::new()),
        };
        let reads = read_builder.add_sparse(config.entries).into_vec();
        let writes = write_builder.add_sparse(config.entries).into_vec();
        Self {
            config,
            reads,
            writes,
        }
    }

    /// Base keys every trial in this sweep pre-populates.
    pub fn base_keys(&self) -> &[Key] {
        &self.reads
    }

    /// Sweep one strategy across concurrency levels, recording
    /// `(level * multiplier, per-op time)` into the named series.
    ///
    /// Every level gets a fresh store, fully pre-populated before its
    /// workers launch; pre-population is never timed.
    pub fn run_strategy<S, C, F>(
        &self,
        set: &mut SeriesSet,
        name: &str,
        mix: OperationMix,
        make_store: F,
        strategy: &C,
    ) -> Result<(), TrialError>
    where
        S: SharedStore,
        C: CriticalSection,
        F: Fn() -> S,
    {
        let max_level = self.max_level_for(mix);
        info!(
            series = name,
            strategy = strategy.name(),
            max_level,
            entries = self.config.entries,
            "running experiment"
        );

        for level in 1..=max_level {
            let store = make_store();
            populate(&store, &self.reads);

            let streams = TrialStreams {
                reads: &self.reads,
                writes: &self.writes,
            };
            let elapsed = run_trial(level, mix, &store, strategy, streams)?;
            let per_op = elapsed / self.reads.len().max(1) as u32;

            let x = (level * mix.multiplier()) as u64;
            set.record(name, x, per_op);
            info!(
                series = name,
                level,
                workers = level * mix.multiplier(),
                elapsed_ms = elapsed.as_millis() as u64,
                per_op_ns = per_op.as_nanos() as u64,
                "trial recorded"
            );

            // Heap-settling pass between trials: release the previous
            // trial's store before the next one allocates, and yield so the
            // allocator's bookkeeping is off the timed path.
            drop(store);
            thread::yield_now();
        }
        Ok(())
    }

    /// Level bound for a mix: multi-role mixes halve the sweep so total
    /// worker count stays within the single-role bound.
    fn max_level_for(&self, mix: OperationMix) -> usize {
        if mix.multiplier() > 1 {
            (self.config.max_level / 2).max(1)
        } else {
            self.config.max_level.max(1)
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HashStore;
    use crate::strategy::Uncoordinated;

    fn small_config(max_level: usize) -> SweepConfig {
        SweepConfig {
            entries: 500,
            max_level,
            htm_retries: 4,
            seed: Some(11),
        }
    }

    #[test]
    fn records_one_point_per_level() {
        let sweep = Sweep::new(small_config(3));
        let mut set = SeriesSet::new();
        sweep
            .run_strategy(
                &mut set,
                "NoMutex",
                OperationMix::READ_ONLY,
                HashStore::new,
                &Uncoordinated,
            )
            .unwrap();
        let series = set.iter().next().unwrap();
        let levels: Vec<u64> = series.points().map(|(level, _)| level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn multi_role_mix_halves_the_sweep_and_scales_x() {
        let sweep = Sweep::new(small_config(4));
        let mut set = SeriesSet::new();
        sweep
            .run_strategy(
                &mut set,
                "SystemLock",
                OperationMix::READ_UPDATE,
                HashStore::new,
                &crate::strategy::BlockingMutex::new(),
            )
            .unwrap();
        let series = set.iter().next().unwrap();
        let levels: Vec<u64> = series.points().map(|(level, _)| level).collect();
        // Levels 1..=2, two workers per level.
        assert_eq!(levels, vec![2, 4]);
    }

    #[test]
    fn single_core_multi_role_still_produces_a_point() {
        let sweep = Sweep::new(small_config(1));
        let mut set = SeriesSet::new();
        sweep
            .run_strategy(
                &mut set,
                "SystemLock",
                OperationMix::READ_UPDATE,
                HashStore::new,
                &crate::strategy::BlockingMutex::new(),
            )
            .unwrap();
        assert_eq!(set.iter().next().unwrap().len(), 1);
    }

    #[test]
    fn per_op_times_are_finite_and_recorded() {
        let sweep = Sweep::new(small_config(2));
        let mut set = SeriesSet::new();
        sweep
            .run_strategy(
                &mut set,
                "NoMutex",
                OperationMix::READ_ONLY,
                HashStore::new,
                &Uncoordinated,
            )
            .unwrap();
        for series in set.iter() {
            for (_, per_op) in series.points() {
                assert!(per_op.as_nanos() < u128::from(u64::MAX));
            }
        }
    }
}
