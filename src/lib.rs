/*!
 * syncbench Library
 *
 * Concurrent-access benchmark driver: measures per-operation latency of a
 * hash table and an ordered tree under pluggable synchronization strategies
 * (uncoordinated, blocking mutex, elision spin lock, hardware transactional
 * memory with fallback), swept across concurrency levels and operation
 * mixes, accumulating named series for external plotting.
 */

pub mod core;
pub mod exec;
pub mod report;
pub mod store;
pub mod strategy;
pub mod sweep;
pub mod telemetry;
pub mod values;

// Re-exports
pub use crate::core::errors::{BenchError, ReportError, TrialError};
pub use crate::core::types::{Key, Role, Value};
pub use exec::{run_trial, OperationMix, TrialStreams};
pub use report::{ChartSpec, JsonSink, MemorySink, SeriesSink};
pub use store::{populate, HashStore, SharedStore, TreeStore};
pub use strategy::{
    AbortReason, BlockingMutex, CriticalSection, ElisionSpin, HtmFallback, RtmEngine, TxEngine,
    TxStatus, Uncoordinated,
};
pub use sweep::{run_store_sweeps, MetricSeries, SeriesSet, Sweep, SweepConfig};
pub use telemetry::init_tracing;
pub use values::RandValues;
