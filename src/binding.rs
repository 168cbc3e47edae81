//! Object binding: which store backs a JSON object.
//!
//! [`JsonValue`](crate::JsonValue) is generic over an [`ObjectTraits`]
//! marker. The marker maps a member value type to the concrete store that
//! holds an object's members. It carries no state and does no runtime work.
//!
//! To back objects with your own container, implement [`ObjectStore`] for it
//! and add a marker:
//!
//! ```
//! use jsonstore::binding::ObjectTraits;
//! use jsonstore::store::LinkedMap;
//! use jsonstore::JsonValue;
//!
//! struct MyBinding;
//!
//! impl ObjectTraits for MyBinding {
//!     type Object<V> = LinkedMap<String, V>;
//!     const NAME: &'static str = "mine";
//!
//!     fn clone_object<V: Clone>(object: &Self::Object<V>) -> Self::Object<V> {
//!         object.clone()
//!     }
//! }
//!
//! let value = JsonValue::<MyBinding>::parse(r#"{"b":1,"a":2}"#).unwrap();
//! assert_eq!(value.dump(), r#"{"b":1,"a":2}"#);
//! ```
//!
//! Collections on stable Rust allocate from the global allocator, so the
//! binding has no allocator parameter.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::json::JsonValue;
use crate::store::{LinkedMap, ObjectStore};

/// Type-level mapping from a member value type to an object store type.
pub trait ObjectTraits: Sized + 'static {
    /// The store holding an object's members.
    type Object<V>: ObjectStore<String, V> + Default;

    /// Short name used in logs and by the CLI.
    const NAME: &'static str;

    /// Copy a store, members and settings such as capacity included.
    ///
    /// Cloning a [`JsonValue`] goes through here, so a store built with
    /// non-default settings keeps them in the copy.
    fn clone_object<V: Clone>(object: &Self::Object<V>) -> Self::Object<V>;
}

/// Objects backed by `BTreeMap`: members come out sorted by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sorted;

impl ObjectTraits for Sorted {
    type Object<V> = BTreeMap<String, V>;
    const NAME: &'static str = "sorted";

    fn clone_object<V: Clone>(object: &Self::Object<V>) -> Self::Object<V> {
        object.clone()
    }
}

/// Objects backed by [`LinkedMap`]: members come out in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsertionOrdered;

impl ObjectTraits for InsertionOrdered {
    type Object<V> = LinkedMap<String, V>;
    const NAME: &'static str = "insertion";

    fn clone_object<V: Clone>(object: &Self::Object<V>) -> Self::Object<V> {
        object.clone()
    }
}

/// Objects backed by `IndexMap`: input order with hashed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indexed;

impl ObjectTraits for Indexed {
    type Object<V> = IndexMap<String, V>;
    const NAME: &'static str = "indexed";

    fn clone_object<V: Clone>(object: &Self::Object<V>) -> Self::Object<V> {
        object.clone()
    }
}

/// The object type a binding selects for JSON values.
pub type ObjectOf<B> = <B as ObjectTraits>::Object<JsonValue<B>>;

/// JSON value with key-sorted objects.
pub type SortedJson = JsonValue<Sorted>;

/// JSON value with insertion-ordered objects.
pub type OrderedJson = JsonValue<InsertionOrdered>;

/// JSON value with insertion-ordered, hash-indexed objects.
pub type IndexedJson = JsonValue<Indexed>;
