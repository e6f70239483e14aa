/*!
 * Sweep & Report Integration Tests
 *
 * Series shape across a full small sweep and artifact round-trips through
 * the JSON sink.
 */

use pretty_assertions::assert_eq;
use std::time::Duration;
use syncbench::{
    run_store_sweeps, HashStore, JsonSink, MemorySink, OperationMix, SeriesSet, SeriesSink, Sweep,
    SweepConfig, TreeStore, Uncoordinated,
};

fn config(entries: usize, max_level: usize) -> SweepConfig {
    SweepConfig {
        entries,
        max_level,
        htm_retries: 4,
        seed: Some(1234),
    }
}

#[test]
fn sweep_points_are_positive_finite_and_increasing_in_x() {
    let sweep = Sweep::new(config(1_000, 4));
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
    let mut last = 0u64;
    for (x, per_op) in series.points() {
        assert!(x > last, "independent variable must strictly increase");
        last = x;
        assert!(per_op > Duration::ZERO);
        assert!(per_op < Duration::from_secs(3600));
    }
    assert_eq!(series.len(), 4);
}

#[test]
fn seeded_sweeps_share_identical_base_keys() {
    let a = Sweep::new(config(256, 1));
    let b = Sweep::new(config(256, 1));
    assert_eq!(a.base_keys(), b.base_keys());
}

#[test]
fn full_driver_writes_all_artifacts_through_json_sink() {
    let dir = tempfile::tempdir().unwrap();
    let sink = JsonSink::new("t-", dir.path());
    run_store_sweeps("Tree", "tree", TreeStore::new, config(200, 2), &sink).unwrap();

    for slug in ["tree-reads", "tree-reads-updates", "tree-reads-puts"] {
        let path = dir.path().join(format!("t-{slug}.json"));
        let body: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let series = body["series"].as_array().unwrap();
        assert!(!series.is_empty(), "{slug} must carry series");
        for s in series {
            for point in s["points"].as_array().unwrap() {
                assert!(point["per_op_ns"].as_u64().is_some());
                assert!(point["x"].as_u64().unwrap() >= 1);
            }
        }
    }
}

#[test]
fn memory_sink_sees_original_series_names() {
    let sink = MemorySink::new();
    run_store_sweeps("Map", "maps", HashStore::new, config(200, 2), &sink).unwrap();

    let charts = sink.charts();
    let read_chart = &charts[0];
    let names: Vec<&str> = read_chart.series.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["NoMutex", "SystemLock", "HLESpinLock", "RTM"]);
}
