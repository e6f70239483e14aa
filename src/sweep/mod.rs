/*!
 * Sweep & Aggregation
 * Drives trials across strategies and concurrency levels into named series
 */

mod controller;
mod driver;
mod series;

pub use controller::{Sweep, SweepConfig};
pub use driver::run_store_sweeps;
pub use series::{MetricSeries, SeriesSet};
