/*!
 * Core Types and Errors
 * Shared building blocks used by every benchmark subsystem
 */

pub mod errors;
pub mod types;

pub use errors::{BenchError, ReportError, TrialError};
pub use types::{Key, Role, Value};
