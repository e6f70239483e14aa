/*!
 * Common Types
 * Key/value aliases and worker roles shared across the benchmark
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key type for the stores under test.
///
/// 32-bit signed keys drawn sparsely from the full range make base-key and
/// write-target collisions effectively impossible at the stream lengths the
/// driver uses.
pub type Key = i32;

/// Value type bound to each key (0 at pre-population, incremented by updates).
pub type Value = i32;

/// Worker role within a trial.
///
/// Each concurrency slot spawns one worker per active role; the role decides
/// which stream the worker drains and which store operation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Lookup of a base key; the key must be found.
    Read,
    /// Insertion of a fresh sparse key.
    Write,
    /// Read-modify-write of a base key; the key must be found.
    Update,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Read => write!(f, "read"),
            Role::Write => write!(f, "write"),
            Role::Update => write!(f, "update"),
        }
    }
}
