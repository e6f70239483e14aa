/*!
 * JSON Chart Artifact
 *
 * Writes each chart as `<prefix><slug>.json`: the structured artifact an
 * external plotter turns into an image. Per-operation durations are
 * flattened to integer nanoseconds so any plotting tool can consume them.
 */

use super::{ChartSpec, SeriesSink};
use crate::core::errors::ReportError;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// File-writing sink producing one JSON artifact per chart.
#[derive(Debug, Clone)]
pub struct JsonSink {
    prefix: String,
    dir: PathBuf,
}

impl JsonSink {
    /// Sink writing `<prefix><slug>.json` into `dir`.
    pub fn new(prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: dir.into(),
        }
    }

    fn artifact_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, slug))
    }
}

impl SeriesSink for JsonSink {
    fn render(&self, chart: &ChartSpec) -> Result<PathBuf, ReportError> {
        let series: Vec<_> = chart
            .series
            .iter()
            .map(|s| {
                json!({
                    "name": s.name(),
                    "points": s
                        .points()
                        .map(|(level, per_op)| json!({
                            "x": level,
                            "per_op_ns": per_op.as_nanos() as u64,
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let body = json!({
            "title": chart.title,
            "x_label": chart.x_label,
            "y_label": chart.y_label,
            "log_x": chart.log_x,
            "log_y": chart.log_y,
            "series": series,
        });

        let path = self.artifact_path(&chart.slug);
        let encoded = serde_json::to_vec_pretty(&body)?;
        fs::write(&path, encoded).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "chart artifact written");
        Ok(path)
    }
}
