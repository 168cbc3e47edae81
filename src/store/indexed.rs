//! `IndexMap` as an object store.
//!
//! Keeps insertion order like [`LinkedMap`](super::LinkedMap) but looks keys
//! up through a hash index, so it scales to large objects.
//!
//! The cursor is a position together with the key found there. Erasing uses
//! an order-preserving shift, which moves every later entry down by one, so
//! erasing at position `p` invalidates the cursors of all entries after `p`,
//! not only the erased one. A cursor whose key no longer sits at its position
//! resolves to nothing, so a stale cursor never reaches the entry that
//! shifted into its place. The cursor returned by `erase` is valid.

use std::hash::Hash;

use indexmap::map;
use indexmap::IndexMap;

use super::ObjectStore;
use crate::error::{ErrorCode, JsonResult};

/// Position of an entry in an `IndexMap`, checked against its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCursor<K> {
    index: usize,
    key: K,
}

impl<K> IndexCursor<K> {
    /// Position the cursor was taken at.
    pub fn index(&self) -> usize {
        self.index
    }
}

fn cursor_at<K: Clone, V>(map: &IndexMap<K, V>, index: usize) -> Option<IndexCursor<K>> {
    map.get_index(index).map(|(key, _)| IndexCursor {
        index,
        key: key.clone(),
    })
}

/// Slot index of `cursor` if its key is still at that position.
fn resolve<K: Eq, V>(map: &IndexMap<K, V>, cursor: &IndexCursor<K>) -> Option<usize> {
    let (key, _) = map.get_index(cursor.index)?;
    (*key == cursor.key).then_some(cursor.index)
}

impl<K: Hash + Eq + Clone, V> ObjectStore<K, V> for IndexMap<K, V> {
    type Cursor = IndexCursor<K>;
    type Iter<'a>
        = map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = map::IterMut<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn max_len(&self) -> usize {
        isize::MAX as usize
    }

    fn iter(&self) -> map::Iter<'_, K, V> {
        IndexMap::iter(self)
    }

    fn iter_mut(&mut self) -> map::IterMut<'_, K, V> {
        IndexMap::iter_mut(self)
    }

    fn get_or_insert_default(&mut self, key: K) -> JsonResult<&mut V>
    where
        V: Default,
    {
        let len = IndexMap::len(self);
        if len >= ObjectStore::<K, V>::max_len(self) && !self.contains_key(&key) {
            return Err(ErrorCode::E116_CapacityExceeded(
                len as u64 + 1,
                ObjectStore::<K, V>::max_len(self) as u64,
            ));
        }
        Ok(self.entry(key).or_default())
    }

    fn first_cursor(&self) -> Option<IndexCursor<K>> {
        cursor_at(self, 0)
    }

    fn next_cursor(&self, cursor: &IndexCursor<K>) -> Option<IndexCursor<K>> {
        let index = resolve(self, cursor)?;
        cursor_at(self, index.checked_add(1)?)
    }

    fn entry_at(&self, cursor: &IndexCursor<K>) -> Option<(&K, &V)> {
        self.get_index(resolve(self, cursor)?)
    }

    fn erase(&mut self, cursor: &IndexCursor<K>) -> Option<IndexCursor<K>> {
        let index = resolve(self, cursor)?;
        self.shift_remove_index(index)?;
        // The follower has shifted into the erased position.
        cursor_at(self, index)
    }

    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: PartialEq + 'a,
        V: 'a,
    {
        IndexMap::get(self, key)
    }
}
