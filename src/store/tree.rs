/*!
 * Tree-Backed Store
 * Ordered container under test; balanced B-tree behind the same contract
 */

use super::SharedStore;
use crate::core::types::{Key, Value};
use std::cell::UnsafeCell;
use std::collections::BTreeMap;

/// Ordered-tree store under test.
pub struct TreeStore {
    inner: UnsafeCell<BTreeMap<Key, Value>>,
}

// Safety: same contract as HashStore; exclusion comes from the wrapping
// strategy, the uncoordinated baseline races by design, and read-only
// operations take a shared view.
unsafe impl Sync for TreeStore {}

impl TreeStore {
    pub fn new() -> Self {
        Self {
            inner: UnsafeCell::new(BTreeMap::new()),
        }
    }

    /// Shared view for the read-only operations.
    #[inline]
    fn tree(&self) -> &BTreeMap<Key, Value> {
        unsafe { &*self.inner.get() }
    }

    #[allow(clippy::mut_from_ref)]
    #[inline]
    fn tree_mut(&self) -> &mut BTreeMap<Key, Value> {
        unsafe { &mut *self.inner.get() }
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore for TreeStore {
    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.tree().get(&key).copied()
    }

    #[inline]
    fn put(&self, key: Key, value: Value) {
        self.tree_mut().insert(key, value);
    }

    #[inline]
    fn contains(&self, key: Key) -> bool {
        self.tree().contains_key(&key)
    }

    fn len(&self) -> usize {
        self.tree().len()
    }

    fn clear(&self) {
        self.tree_mut().clear();
    }
}
