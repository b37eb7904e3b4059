// Lazy Cache Module
//
// A keyed cache of lazily loaded values with an at-most-one-load-per-key
// guarantee under concurrent access. Each key owns a cell that moves from
// empty to loaded exactly once; the map lock is held only to find or insert
// the cell, so loads for unrelated keys never serialize against each other.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

/// A map from key to lazily initialized `Arc<V>`. Entries are never evicted;
/// the map only grows for the lifetime of its owner.
pub(crate) struct LazyMap<K, V> {
    slots: RwLock<HashMap<K, Arc<OnceCell<Arc<V>>>>>,
}

impl<K, V> LazyMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new() -> Self {
        LazyMap {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cached value for `key`, if a load has already completed.
    pub(crate) fn get(&self, key: &K) -> Option<Arc<V>> {
        self.slots.read().get(key).and_then(|cell| cell.get().cloned())
    }

    /// Get the value for `key`, running `init` to load it if no load has
    /// completed yet. If several threads race on the same key, exactly one
    /// runs `init` and the rest block until the value is published. A failed
    /// load leaves the cell empty, so the next caller retries.
    pub(crate) fn get_or_try_init<E>(
        &self,
        key: &K,
        init: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let cell = {
            let slots = self.slots.read();
            match slots.get(key) {
                Some(cell) => cell.clone(),
                None => {
                    drop(slots);
                    self.slots
                        .write()
                        .entry(key.clone())
                        .or_insert_with(|| Arc::new(OnceCell::new()))
                        .clone()
                }
            }
        };
        let value = cell.get_or_try_init(|| init().map(Arc::new))?;
        Ok(value.clone())
    }
}
