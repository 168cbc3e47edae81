//! Insertion-ordered map backed by a doubly-linked list.
//!
//! `LinkedMap` exists to exercise the object store customization point with
//! a container whose iteration order is the order keys were first inserted.
//! It is not a general purpose map: lookup is a linear scan comparing keys
//! with `==`, so it is only suitable for small objects (tens of keys). Use
//! [`IndexMap`](indexmap::IndexMap) when lookup speed matters.
//!
//! Nodes live in an arena `Vec` and link to each other by slot index. Erased
//! slots go on a free list and their generation is bumped, so a cursor to an
//! erased entry stays detectably stale even after the slot is reused.
//!
//! # Cursor invalidation
//!
//! - `get_or_insert_default` never invalidates a cursor (it only appends).
//! - `erase` invalidates only the erased entry's cursor.

use std::fmt;

use super::ObjectStore;
use crate::error::{ErrorCode, JsonResult};

struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<K, V> {
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Position of an entry in a [`LinkedMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
    generation: u32,
}

/// Map that iterates in insertion order, with O(n) lookup.
pub struct LinkedMap<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    max_len: usize,
}

impl<K, V> LinkedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::with_max_len(Self::arena_limit())
    }

    /// Create an empty map that refuses to grow beyond `max_len` entries.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            max_len: max_len.min(Self::arena_limit()),
        }
    }

    fn arena_limit() -> usize {
        isize::MAX as usize / std::mem::size_of::<Slot<K, V>>().max(1)
    }

    fn node(&self, index: usize) -> Option<&Node<K, V>> {
        self.slots.get(index).and_then(|slot| slot.node.as_ref())
    }

    fn cursor(&self, index: usize) -> Option<Cursor> {
        self.slots.get(index).map(|slot| Cursor {
            index,
            generation: slot.generation,
        })
    }

    /// Resolve a cursor to its slot index if it still names a live entry.
    fn resolve(&self, cursor: &Cursor) -> Option<usize> {
        let slot = self.slots.get(cursor.index)?;
        if slot.generation == cursor.generation && slot.node.is_some() {
            Some(cursor.index)
        } else {
            None
        }
    }

    fn find(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        let mut current = self.head;
        while let Some(index) = current {
            let node = self.node(index)?;
            if node.key == *key {
                return Some(index);
            }
            current = node.next;
        }
        None
    }

    /// Append a node at the tail and return its slot index.
    fn push_back(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: self.tail,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.slots[tail].node.as_mut()) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        index
    }

    /// Unlink the node at `index`, returning the index that followed it.
    fn unlink(&mut self, index: usize) -> Option<usize> {
        let slot = &mut self.slots[index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;

        match node.prev.and_then(|prev| self.slots[prev].node.as_mut()) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.slots[next].node.as_mut()) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        node.next
    }

    /// Slot indices in list order.
    fn order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.head;
        while let Some(index) = current {
            order.push(index);
            current = self.node(index).and_then(|node| node.next);
        }
        order
    }
}

impl<K, V> Default for LinkedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for LinkedMap<K, V> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_max_len(self.max_len);
        for (key, value) in self.iter() {
            copy.push_back(key.clone(), value.clone());
        }
        copy
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LinkedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Order-sensitive: equal maps hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for LinkedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for LinkedMap<K, V> {
    /// Collect with insert-or-fetch semantics: a repeated key keeps its first
    /// position and takes the last value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            match map.find(&key) {
                Some(index) => {
                    if let Some(node) = map.slots[index].node.as_mut() {
                        node.value = value;
                    }
                }
                None => {
                    map.push_back(key, value);
                }
            }
        }
        map
    }
}

impl<'a, K, V> IntoIterator for &'a LinkedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V> ObjectStore<K, V> for LinkedMap<K, V> {
    type Cursor = Cursor;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = IterMut<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        self.len
    }

    fn max_len(&self) -> usize {
        self.max_len
    }

    fn iter(&self) -> Iter<'_, K, V> {
        LinkedMap::iter(self)
    }

    fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.order();
        let entries = self
            .slots
            .iter_mut()
            .map(|slot| slot.node.as_mut().map(|node| (&node.key, &mut node.value)))
            .collect();
        IterMut {
            order: order.into_iter(),
            entries,
        }
    }

    fn get_or_insert_default(&mut self, key: K) -> JsonResult<&mut V>
    where
        V: Default,
    {
        let index = match self.find(&key) {
            Some(index) => index,
            None => {
                if self.len >= self.max_len {
                    return Err(ErrorCode::E116_CapacityExceeded(
                        self.len as u64 + 1,
                        self.max_len as u64,
                    ));
                }
                self.push_back(key, V::default())
            }
        };
        match self.slots[index].node.as_mut() {
            Some(node) => Ok(&mut node.value),
            None => Err(ErrorCode::E199_InternalError(format!(
                "linked map slot {} is vacant",
                index
            ))),
        }
    }

    fn first_cursor(&self) -> Option<Cursor> {
        self.head.and_then(|index| self.cursor(index))
    }

    fn next_cursor(&self, cursor: &Cursor) -> Option<Cursor> {
        let index = self.resolve(cursor)?;
        let next = self.node(index)?.next?;
        self.cursor(next)
    }

    fn entry_at(&self, cursor: &Cursor) -> Option<(&K, &V)> {
        let node = self.node(self.resolve(cursor)?)?;
        Some((&node.key, &node.value))
    }

    fn erase(&mut self, cursor: &Cursor) -> Option<Cursor> {
        let index = self.resolve(cursor)?;
        let next = self.unlink(index)?;
        self.cursor(next)
    }
}

impl<K, V> LinkedMap<K, V> {
    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            next: self.head,
            remaining: self.len,
        }
    }
}

/// Iterator over a [`LinkedMap`] in insertion order.
pub struct Iter<'a, K, V> {
    map: &'a LinkedMap<K, V>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.map.node(self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Mutable iterator over a [`LinkedMap`] in insertion order.
///
/// List order is captured up front, then each slot's borrow is handed out
/// once.
pub struct IterMut<'a, K, V> {
    order: std::vec::IntoIter<usize>,
    entries: Vec<Option<(&'a K, &'a mut V)>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for index in self.order.by_ref() {
            if let Some(entry) = self.entries.get_mut(index).and_then(Option::take) {
                return Some(entry);
            }
        }
        None
    }
}
