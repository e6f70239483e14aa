/*!
 * syncbench - Main Entry Point
 *
 * Runs the fixed benchmark sequence: hash-store sweeps, then tree sweeps,
 * each over the three operation mixes, writing one chart artifact per mix.
 * The only configuration surface is a filename prefix applied to every
 * artifact.
 */

use syncbench::{
    init_tracing, run_store_sweeps, HashStore, JsonSink, SweepConfig, TreeStore,
};
use tracing::{info, warn};

/// Hash-store streams match the original driver's 3M-entry workload; the
/// tree sweep uses 300k because per-op tree work is an order of magnitude
/// heavier.
const HASH_ENTRIES: usize = 3_000_000;
const TREE_ENTRIES: usize = 300_000;

fn main() -> miette::Result<()> {
    init_tracing();

    let prefix = artifact_prefix();
    info!(prefix = %prefix, "syncbench starting");

    let sink = JsonSink::new(prefix, ".");

    info!("running hash-store sweeps");
    run_store_sweeps(
        "Map",
        "maps",
        || HashStore::with_capacity(HASH_ENTRIES),
        SweepConfig {
            entries: HASH_ENTRIES,
            ..SweepConfig::default()
        },
        &sink,
    )?;

    info!("running tree sweeps");
    run_store_sweeps(
        "Tree",
        "tree",
        TreeStore::new,
        SweepConfig {
            entries: TREE_ENTRIES,
            ..SweepConfig::default()
        },
        &sink,
    )?;

    info!("all sweeps complete");
    Ok(())
}

/// Filename prefix for chart artifacts: `--prefix <p>` / `--prefix=<p>`,
/// falling back to `SYNCBENCH_PREFIX`, then empty.
fn artifact_prefix() -> String {
    cli_prefix(std::env::args().skip(1))
        .or_else(|| std::env::var("SYNCBENCH_PREFIX").ok())
        .unwrap_or_default()
}

/// Parse the prefix out of the argument list. A dangling `--prefix` and any
/// unrecognized argument are reported rather than silently swallowed.
fn cli_prefix(mut args: impl Iterator<Item = String>) -> Option<String> {
    let mut prefix = None;
    while let Some(arg) = args.next() {
        if arg == "--prefix" {
            match args.next() {
                Some(value) => prefix = Some(value),
                None => warn!("--prefix given without a value; ignoring it"),
            }
        } else if let Some(value) = arg.strip_prefix("--prefix=") {
            prefix = Some(value.to_string());
        } else {
            warn!(argument = %arg, "ignoring unrecognized argument");
        }
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(list: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
        list.iter().map(|s| s.to_string())
    }

    #[test]
    fn prefix_from_separate_value() {
        assert_eq!(
            cli_prefix(args(&["--prefix", "run1-"])),
            Some("run1-".to_string())
        );
    }

    #[test]
    fn prefix_from_equals_form() {
        assert_eq!(
            cli_prefix(args(&["--prefix=run2-"])),
            Some("run2-".to_string())
        );
    }

    #[test]
    fn dangling_prefix_flag_yields_no_prefix() {
        assert_eq!(cli_prefix(args(&["--prefix"])), None);
    }

    #[test]
    fn unrecognized_arguments_yield_no_prefix() {
        assert_eq!(cli_prefix(args(&["--bogus", "extra"])), None);
    }

    #[test]
    fn later_prefix_wins() {
        assert_eq!(
            cli_prefix(args(&["--prefix=a-", "--prefix", "b-"])),
            Some("b-".to_string())
        );
    }
}
