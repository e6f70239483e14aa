/*!
 * Report Sink
 *
 * Boundary to the external plotting collaborator. The core hands a finished
 * [`ChartSpec`] with named series, axis labels, title, and log-scale flags to a
 * [`SeriesSink`] and has no dependency on the rendered artifact's format.
 */

mod json;

pub use json::JsonSink;

use crate::core::errors::ReportError;
use crate::sweep::SeriesSet;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a plotting collaborator needs for one chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartSpec {
    /// Filename stem for the artifact (prefix applied by the sink).
    pub slug: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub log_x: bool,
    pub log_y: bool,
    pub series: SeriesSet,
}

/// Sink for finished charts; implementations decide the artifact format.
pub trait SeriesSink {
    /// Render `chart` and return the path of the produced artifact.
    fn render(&self, chart: &ChartSpec) -> Result<PathBuf, ReportError>;
}

/// In-memory sink recording every chart it receives; used by tests and by
/// embedders that post-process series themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    charts: Mutex<Vec<ChartSpec>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charts received so far, in render order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        self.charts.lock().clone()
    }
}

impl SeriesSink for MemorySink {
    fn render(&self, chart: &ChartSpec) -> Result<PathBuf, ReportError> {
        self.charts.lock().push(chart.clone());
        Ok(PathBuf::from(format!("<memory>/{}", chart.slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        for slug in ["a", "b"] {
            let mut series = SeriesSet::new();
            series.record("s", 1, Duration::from_nanos(1));
            let chart = ChartSpec {
                slug: slug.to_string(),
                title: slug.to_string(),
                x_label: "x".into(),
                y_label: "y".into(),
                log_x: false,
                log_y: true,
                series,
            };
            sink.render(&chart).unwrap();
        }
        let charts = sink.charts();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].slug, "a");
        assert_eq!(charts[1].slug, "b");
    }
}
