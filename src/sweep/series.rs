/*!
 * Metric Series
 * Named (concurrency level -> per-operation duration) mappings for one chart
 */

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// One named series of measurements across concurrency levels.
///
/// The independent variable is kept strictly increasing by construction
/// (ordered map), and recording at an existing level overwrites rather than
/// duplicates the point.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricSeries {
    name: String,
    points: BTreeMap<u64, Duration>,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record the per-operation duration measured at `level`, overwriting
    /// any earlier point at the same level.
    pub fn record(&mut self, level: u64, per_op: Duration) {
        self.points.insert(level, per_op);
    }

    /// Points in increasing level order.
    pub fn points(&self) -> impl Iterator<Item = (u64, Duration)> + '_ {
        self.points.iter().map(|(&level, &per_op)| (level, per_op))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// All series destined for one chart, in insertion order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeriesSet {
    series: Vec<MetricSeries>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a point in the named series, creating the series on first use.
    pub fn record(&mut self, name: &str, level: u64, per_op: Duration) {
        match self.series.iter_mut().find(|s| s.name() == name) {
            Some(series) => series.record(level, per_op),
            None => {
                let mut series = MetricSeries::new(name);
                series.record(level, per_op);
                self.series.push(series);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
