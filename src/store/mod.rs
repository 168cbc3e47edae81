//! Object backing stores.
//!
//! A JSON object is not tied to one map implementation. Any container that
//! implements [`ObjectStore`] can hold an object's members, and the parser
//! and serializer only ever talk to that trait. The order in which a store
//! yields its entries is therefore the order in which members are printed.
//!
//! # Implementations
//!
//! - [`LinkedMap`] - insertion order, linear-scan lookup, stable cursors
//! - `BTreeMap` - sorted by key (see [`sorted`])
//! - `IndexMap` - insertion order with a hashed index (see [`indexed`])
//!
//! # Contract
//!
//! - Each key appears at most once.
//! - [`ObjectStore::get_or_insert_default`] serves both "read existing" and
//!   "create new" call sites. A repeated key returns the existing slot, so the
//!   key keeps its first position.
//! - [`ObjectStore::erase`] removes exactly one entry and returns a cursor to
//!   the entry that followed it, or `None` at the end.
//! - A cursor to an erased entry never reaches another entry:
//!
//!   | Store | Cursor | After its entry is erased | After the key is re-inserted |
//!   |---|---|---|---|
//!   | `LinkedMap` | slot and generation | stale | stale |
//!   | `BTreeMap` | the key | stale | names the new entry |
//!   | `IndexMap` | position and key | stale | stale |
//!
//! - Stores are not synchronized. One store must not be mutated from several
//!   threads at once.

pub mod indexed;
pub mod linked;
pub mod sorted;

pub use linked::LinkedMap;

use crate::error::JsonResult;

/// The operations a container must provide to back a JSON object.
///
/// `K` is the key type (a `String` for JSON objects) and `V` the member
/// value type.
pub trait ObjectStore<K, V> {
    /// Position of a single entry, used for stepping and erasing.
    ///
    /// Which operations invalidate a cursor depends on the store.
    type Cursor: Clone + PartialEq;

    /// Read-only iterator over entries in store order.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Mutable iterator over entries in store order.
    type IterMut<'a>: Iterator<Item = (&'a K, &'a mut V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Upper bound on the number of entries this store can hold.
    fn max_len(&self) -> usize;

    /// Returns true if the store has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over entries in store order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Iterate over entries in store order with mutable values.
    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    /// Insert-or-fetch.
    ///
    /// Returns the slot for `key`. If the key is absent, a new entry holding
    /// `V::default()` is inserted where the store's insertion policy puts it.
    ///
    /// Fails with `E116_CapacityExceeded` only when a new entry would exceed
    /// [`max_len`](Self::max_len). Fetching an existing key never fails.
    fn get_or_insert_default(&mut self, key: K) -> JsonResult<&mut V>
    where
        V: Default;

    /// Cursor to the first entry, or `None` if empty.
    fn first_cursor(&self) -> Option<Self::Cursor>;

    /// Cursor to the entry after `cursor`, or `None` at the end or if
    /// `cursor` no longer names an entry.
    fn next_cursor(&self, cursor: &Self::Cursor) -> Option<Self::Cursor>;

    /// The entry at `cursor`, or `None` if the cursor is stale.
    fn entry_at(&self, cursor: &Self::Cursor) -> Option<(&K, &V)>;

    /// Remove the entry at `cursor`.
    ///
    /// Returns a cursor to the entry that followed the erased one, or `None`
    /// if it was the last. A cursor to an erased entry removes nothing and
    /// returns `None`. Whether such a cursor names an entry again after its
    /// key is re-inserted is up to the store.
    fn erase(&mut self, cursor: &Self::Cursor) -> Option<Self::Cursor>;

    /// Keys in store order.
    fn keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(k, _)| k)
    }

    /// Look up a value by key.
    ///
    /// The default is a linear scan over [`iter`](Self::iter); stores with an
    /// index override it.
    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: PartialEq + 'a,
        V: 'a,
    {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}
