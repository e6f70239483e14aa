/*!
 * Error Types
 * Centralized error handling with thiserror and miette support
 */

use crate::core::types::{Key, Role};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal trial errors.
///
/// Every variant signals a broken benchmark precondition, never a transient
/// runtime condition. Nothing here is retried or suppressed: the error is
/// surfaced at the top of the trial and terminates the process with full
/// context.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TrialError {
    #[error("base key {key} missing during {role} role under {strategy} strategy")]
    #[diagnostic(
        code(trial::missing_base_key),
        help(
            "Base keys must remain present for the whole trial. A missing key means \
             pre-population did not complete or a removal path crept into a worker."
        )
    )]
    MissingBaseKey {
        key: Key,
        role: Role,
        strategy: String,
    },

    #[error("trial requires a concurrency level of at least 1 (got {level})")]
    #[diagnostic(
        code(trial::invalid_level),
        help("Sweep bounds must stay within 1..=max_level.")
    )]
    InvalidLevel { level: usize },

    #[error("operation mix selects no roles")]
    #[diagnostic(
        code(trial::empty_mix),
        help("At least one of reads/writes/updates must be active.")
    )]
    EmptyMix,
}

impl TrialError {
    /// Missing-base-key error with full worker context attached.
    pub fn missing_base_key(key: Key, role: Role, strategy: &str) -> Self {
        TrialError::MissingBaseKey {
            key,
            role,
            strategy: strategy.to_string(),
        }
    }
}

/// Errors from the report sink writing a chart artifact.
#[derive(Error, Debug, Diagnostic)]
pub enum ReportError {
    #[error("failed to write chart artifact {path}")]
    #[diagnostic(
        code(report::write_failed),
        help("Check that the output directory exists and is writable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode series data")]
    #[diagnostic(code(report::encode_failed))]
    Encode(#[from] serde_json::Error),
}

/// Top-level error for the benchmark binary.
#[derive(Error, Debug, Diagnostic)]
pub enum BenchError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Trial(#[from] TrialError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),
}
