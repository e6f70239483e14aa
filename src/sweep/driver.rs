/*!
 * Fixed Sweep Driver
 *
 * The hardcoded benchmark sequence for one store kind: a pure-read chart
 * over all four strategies, then read+update and read+write charts over the
 * three locking strategies (the uncoordinated baseline is only meaningful
 * on the pure-read mix). Each chart is handed whole to the report sink.
 */

use crate::core::errors::BenchError;
use crate::exec::OperationMix;
use crate::report::{ChartSpec, SeriesSink};
use crate::store::SharedStore;
use crate::strategy::{BlockingMutex, ElisionSpin, HtmFallback, Uncoordinated};
use crate::sweep::{SeriesSet, Sweep, SweepConfig};
use tracing::info;

const X_LABEL: &str = "Number of Workers";
const Y_LABEL: &str = "Duration Per Operation (ns)";

/// Series names follow the original driver's legend.
const SERIES_NONE: &str = "NoMutex";
const SERIES_MUTEX: &str = "SystemLock";
const SERIES_ELISION: &str = "HLESpinLock";
const SERIES_HTM: &str = "RTM";

/// Run the three fixed operation-mix sweeps for one store kind and hand each
/// finished chart to `sink`.
pub fn run_store_sweeps<S, F, K>(
    label: &str,
    slug: &str,
    make_store: F,
    config: SweepConfig,
    sink: &K,
) -> Result<(), BenchError>
where
    S: SharedStore,
    F: Fn() -> S,
    K: SeriesSink,
{
    let entries = config.entries;
    let retries = config.htm_retries;
    let sweep = Sweep::new(config);

    // Pure-read: all four strategies, full level range.
    let mut set = SeriesSet::new();
    let mix = OperationMix::READ_ONLY;
    sweep.run_strategy(&mut set, SERIES_NONE, mix, &make_store, &Uncoordinated)?;
    sweep.run_strategy(&mut set, SERIES_MUTEX, mix, &make_store, &BlockingMutex::new())?;
    sweep.run_strategy(&mut set, SERIES_ELISION, mix, &make_store, &ElisionSpin::new())?;
    sweep.run_strategy(&mut set, SERIES_HTM, mix, &make_store, &HtmFallback::new(retries))?;
    render(
        sink,
        format!("{slug}-reads"),
        format!("{label} {entries}-Read Performance"),
        set,
    )?;

    // Read + update: locking strategies, half level range.
    let mut set = SeriesSet::new();
    let mix = OperationMix::READ_UPDATE;
    sweep.run_strategy(&mut set, SERIES_MUTEX, mix, &make_store, &BlockingMutex::new())?;
    sweep.run_strategy(&mut set, SERIES_ELISION, mix, &make_store, &ElisionSpin::new())?;
    sweep.run_strategy(&mut set, SERIES_HTM, mix, &make_store, &HtmFallback::new(retries))?;
    render(
        sink,
        format!("{slug}-reads-updates"),
        format!("{label} {entries}-Read/{entries}-Update Performance"),
        set,
    )?;

    // Read + write: locking strategies, half level range.
    let mut set = SeriesSet::new();
    let mix = OperationMix::READ_WRITE;
    sweep.run_strategy(&mut set, SERIES_MUTEX, mix, &make_store, &BlockingMutex::new())?;
    sweep.run_strategy(&mut set, SERIES_ELISION, mix, &make_store, &ElisionSpin::new())?;
    sweep.run_strategy(&mut set, SERIES_HTM, mix, &make_store, &HtmFallback::new(retries))?;
    render(
        sink,
        format!("{slug}-reads-puts"),
        format!("{label} {entries}-Read/{entries}-Put Performance"),
        set,
    )?;

    Ok(())
}

fn render<K: SeriesSink>(
    sink: &K,
    slug: String,
    title: String,
    series: SeriesSet,
) -> Result<(), BenchError> {
    let chart = ChartSpec {
        slug,
        title,
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        log_x: false,
        log_y: true,
        series,
    };
    let path = sink.render(&chart)?;
    info!(chart = %chart.title, path = %path.display(), "chart rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;
    use crate::store::TreeStore;

    #[test]
    fn driver_produces_three_charts_with_expected_series() {
        let sink = MemorySink::new();
        let config = SweepConfig {
            entries: 200,
            max_level: 2,
            htm_retries: 2,
            seed: Some(9),
        };
        run_store_sweeps("Tree", "tree", TreeStore::new, config, &sink).unwrap();

        let charts = sink.charts();
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].slug, "tree-reads");
        assert_eq!(charts[0].series.len(), 4);
        assert_eq!(charts[1].slug, "tree-reads-updates");
        assert_eq!(charts[1].series.len(), 3);
        assert_eq!(charts[2].slug, "tree-reads-puts");
        assert_eq!(charts[2].series.len(), 3);
        for chart in &charts {
            assert!(chart.log_y);
            for series in chart.series.iter() {
                assert!(!series.is_empty());
            }
        }
    }
}
