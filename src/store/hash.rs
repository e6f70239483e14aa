/*!
 * Hash-Backed Store
 * HashMap with ahash, exclusion delegated to the wrapping strategy
 */

use super::SharedStore;
use crate::core::types::{Key, Value};
use ahash::RandomState;
use std::cell::UnsafeCell;
use std::collections::HashMap;

/// Hash-table store under test.
pub struct HashStore {
    inner: UnsafeCell<HashMap<Key, Value, RandomState>>,
}

// Safety: the map itself is not thread-safe. Concurrent access is mediated by
// the synchronization strategy wrapping every operation; the uncoordinated
// baseline opts out of that mediation and its races are the measured subject.
// Read-only operations go through a shared view, so the one unsynchronized
// workload the driver runs (pure reads) is plain concurrent reading.
unsafe impl Sync for HashStore {}

impl HashStore {
    pub fn new() -> Self {
        Self {
            inner: UnsafeCell::new(HashMap::with_hasher(RandomState::new())),
        }
    }

    /// Pre-size the table so pre-population does not rehash mid-stream.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: UnsafeCell::new(HashMap::with_capacity_and_hasher(
                capacity,
                RandomState::new(),
            )),
        }
    }

    /// Shared view for the read-only operations, so concurrent readers never
    /// hold aliased exclusive references.
    #[inline]
    fn map(&self) -> &HashMap<Key, Value, RandomState> {
        unsafe { &*self.inner.get() }
    }

    #[allow(clippy::mut_from_ref)]
    #[inline]
    fn map_mut(&self) -> &mut HashMap<Key, Value, RandomState> {
        unsafe { &mut *self.inner.get() }
    }
}

impl Default for HashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore for HashStore {
    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.map().get(&key).copied()
    }

    #[inline]
    fn put(&self, key: Key, value: Value) {
        self.map_mut().insert(key, value);
    }

    #[inline]
    fn contains(&self, key: Key) -> bool {
        self.map().contains_key(&key)
    }

    fn len(&self) -> usize {
        self.map().len()
    }

    fn clear(&self) {
        self.map_mut().clear();
    }
}
