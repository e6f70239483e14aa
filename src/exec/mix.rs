/*!
 * Operation Mix
 * Which worker roles participate in a trial
 */

use crate::core::types::Role;
use serde::{Deserialize, Serialize};

/// Active-role selection for one trial.
///
/// Each concurrency slot spawns one worker per active role, so a trial at
/// level N launches `N * multiplier()` workers in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMix {
    pub reads: bool,
    pub writes: bool,
    pub updates: bool,
}

impl OperationMix {
    /// Lookup-only workload.
    pub const READ_ONLY: Self = Self {
        reads: true,
        writes: false,
        updates: false,
    };

    /// Lookups racing read-modify-write increments of the same base keys.
    pub const READ_UPDATE: Self = Self {
        reads: true,
        writes: false,
        updates: true,
    };

    /// Lookups racing insertions of fresh sparse keys.
    pub const READ_WRITE: Self = Self {
        reads: true,
        writes: true,
        updates: false,
    };

    /// Number of active roles (0..=3); the per-slot worker multiplier.
    pub fn multiplier(&self) -> usize {
        self.reads as usize + self.writes as usize + self.updates as usize
    }

    /// Active roles in spawn order (read, write, update: the order the
    /// original driver launches them in each slot).
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        [
            (self.reads, Role::Read),
            (self.writes, Role::Write),
            (self.updates, Role::Update),
        ]
        .into_iter()
        .filter_map(|(active, role)| active.then_some(role))
    }
}
