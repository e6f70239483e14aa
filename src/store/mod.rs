/*!
 * Shared Store Adapters
 *
 * Uniform {get, put, contains, add} capability over the structures under
 * test: a hash map and an ordered tree. The adapters provide no
 * synchronization of their own; exclusion is delegated entirely to the
 * wrapping strategy, and under the uncoordinated baseline the resulting race
 * is exactly what the benchmark measures.
 *
 * There is deliberately no removal operation: base keys pre-loaded before a
 * trial must remain present for its whole duration, and the write/update
 * roles only ever add or overwrite.
 */

mod hash;
mod tree;

pub use hash::HashStore;
pub use tree::TreeStore;

use crate::core::types::{Key, Value};

/// Key/value container under test.
///
/// Implementations use interior mutability behind `&self` so workers can
/// share one instance across threads; callers are responsible for wrapping
/// every operation in a strategy's critical section (or knowingly not, for
/// the baseline).
pub trait SharedStore: Sync {
    /// Value bound to `key`, if present.
    fn get(&self, key: Key) -> Option<Value>;

    /// Bind `key` to `value`, inserting or overwriting.
    fn put(&self, key: Key, value: Value);

    /// Whether `key` is present.
    fn contains(&self, key: Key) -> bool;

    /// Insert `key` with the sentinel value 0.
    fn add(&self, key: Key) {
        self.put(key, 0);
    }

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry, for reuse between trials.
    fn clear(&self);
}

/// Pre-populate `store` with the base key set, every key bound to 0.
///
/// Runs to completion before any worker starts and is never part of a
/// trial's timed window.
pub fn populate<S: SharedStore>(store: &S, keys: &[Key]) {
    for &key in keys {
        store.put(key, 0);
    }
}
