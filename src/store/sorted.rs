//! `BTreeMap` as an object store.
//!
//! Entries iterate in key order regardless of insertion order. This is the
//! store behind the default binding, so a parse/serialize round trip through
//! it sorts object members.
//!
//! The cursor is a clone of the entry's key. Erasing one entry never
//! invalidates the cursor of another. A cursor names a key, not an entry:
//! once an erased key is inserted again, its old cursor reaches the new
//! entry.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound;

use super::ObjectStore;
use crate::error::{ErrorCode, JsonResult};

/// First key after `key` in sort order.
fn successor<K: Ord + Clone, V>(map: &BTreeMap<K, V>, key: &K) -> Option<K> {
    map.range::<K, _>((Bound::Excluded(key), Bound::Unbounded))
        .next()
        .map(|(k, _)| k.clone())
}

impl<K: Ord + Clone, V> ObjectStore<K, V> for BTreeMap<K, V> {
    type Cursor = K;
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = btree_map::IterMut<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn max_len(&self) -> usize {
        isize::MAX as usize
    }

    fn iter(&self) -> btree_map::Iter<'_, K, V> {
        BTreeMap::iter(self)
    }

    fn iter_mut(&mut self) -> btree_map::IterMut<'_, K, V> {
        BTreeMap::iter_mut(self)
    }

    fn get_or_insert_default(&mut self, key: K) -> JsonResult<&mut V>
    where
        V: Default,
    {
        let len = BTreeMap::len(self);
        if len >= ObjectStore::<K, V>::max_len(self) && !self.contains_key(&key) {
            return Err(ErrorCode::E116_CapacityExceeded(
                len as u64 + 1,
                ObjectStore::<K, V>::max_len(self) as u64,
            ));
        }
        Ok(self.entry(key).or_default())
    }

    fn first_cursor(&self) -> Option<K> {
        self.keys().next().cloned()
    }

    fn next_cursor(&self, cursor: &K) -> Option<K> {
        if !self.contains_key(cursor) {
            return None;
        }
        successor(self, cursor)
    }

    fn entry_at(&self, cursor: &K) -> Option<(&K, &V)> {
        self.get_key_value(cursor)
    }

    fn erase(&mut self, cursor: &K) -> Option<K> {
        self.remove(cursor)?;
        successor(self, cursor)
    }

    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: PartialEq + 'a,
        V: 'a,
    {
        BTreeMap::get(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(keys: &[&str]) -> BTreeMap<String, u8> {
        let mut map = BTreeMap::new();
        for key in keys {
            *ObjectStore::get_or_insert_default(&mut map, key.to_string()).unwrap() += 1;
        }
        map
    }

    #[test]
    fn test_iterates_in_key_order() {
        let map = map_of(&["name", "id", "age"]);
        let keys: Vec<&str> = ObjectStore::iter(&map).map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["age", "id", "name"]);
    }

    #[test]
    fn test_repeat_key_fetches_existing() {
        let map = map_of(&["a", "a", "b"]);
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(ObjectStore::len(&map), 2);
    }

    #[test]
    fn test_erase_returns_following_key() {
        let mut map = map_of(&["a", "b", "c"]);
        let next = ObjectStore::erase(&mut map, &"b".to_string());
        assert_eq!(next, Some("c".to_string()));
        assert_eq!(ObjectStore::erase(&mut map, &"c".to_string()), None);
        assert_eq!(ObjectStore::erase(&mut map, &"zz".to_string()), None);
        assert_eq!(ObjectStore::len(&map), 1);
    }

    #[test]
    fn test_key_cursor_follows_reinserted_key() {
        let mut map = map_of(&["a", "b"]);
        let cursor = ObjectStore::first_cursor(&map).unwrap();
        ObjectStore::erase(&mut map, &cursor);
        assert_eq!(ObjectStore::entry_at(&map, &cursor), None);
        assert_eq!(ObjectStore::next_cursor(&map, &cursor), None);

        *ObjectStore::get_or_insert_default(&mut map, "a".to_string()).unwrap() = 9;
        assert_eq!(ObjectStore::entry_at(&map, &cursor), Some((&"a".to_string(), &9)));
    }

    #[test]
    fn test_cursor_walk() {
        let map = map_of(&["b", "a"]);
        let first = ObjectStore::first_cursor(&map).unwrap();
        assert_eq!(first, "a");
        let second = ObjectStore::next_cursor(&map, &first).unwrap();
        assert_eq!(ObjectStore::entry_at(&map, &second), Some((&"b".to_string(), &1)));
        assert_eq!(ObjectStore::next_cursor(&map, &second), None);
    }
}
