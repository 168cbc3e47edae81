//! JSON value type, generic over the object binding.
//!
//! `JsonValue<B>` stores objects in whatever container the binding `B`
//! selects (see [`binding`](crate::binding)). All object handling in this
//! module goes through [`ObjectStore`], never through a concrete map type.
//!
//! # Equality
//!
//! Object equality ignores member order: two objects are equal when they hold
//! the same keys with equal values. Use [`JsonValue::dump`] to compare order.

use std::fmt;

use crate::binding::{ObjectOf, ObjectTraits, Sorted};
use crate::error::{ErrorCode, JsonResult};
use crate::store::ObjectStore;

/// A JSON number.
///
/// Integers that fit in `i64` are kept exact; everything else is `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integer without fraction or exponent
    Int(i64),
    /// Any other finite number
    Float(f64),
}

impl Number {
    /// Returns the value as i64 if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Float(_) => None,
        }
    }

    /// Returns the value as f64.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(f) => *f,
        }
    }
}

/// Integers and floats compare by numeric value.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

/// A JSON value whose objects are backed by the store `B` selects.
pub enum JsonValue<B: ObjectTraits = Sorted> {
    /// JSON null literal
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue<B>>),
    /// JSON object in the binding's store
    Object(ObjectOf<B>),
}

impl<B: ObjectTraits> JsonValue<B> {
    /// Create an empty object.
    pub fn object() -> Self {
        JsonValue::Object(<ObjectOf<B> as Default>::default())
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is an integer Number, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as f64 if this is a Number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Vec<JsonValue<B>>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object store if this is an Object.
    pub fn as_object(&self) -> Option<&ObjectOf<B>> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object store if this is an Object.
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectOf<B>> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue<B>> {
        match self {
            JsonValue::Object(map) => map.get(&key.to_owned()),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue<B>> {
        match self {
            JsonValue::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Insert-or-fetch a member of this object.
    ///
    /// A null value is first turned into an empty object. Any other
    /// non-object value fails with `E120_NotAnObject`.
    pub fn entry(&mut self, key: impl Into<String>) -> JsonResult<&mut JsonValue<B>> {
        if self.is_null() {
            *self = Self::object();
        }
        match self {
            JsonValue::Object(map) => map.get_or_insert_default(key.into()),
            other => Err(ErrorCode::E120_NotAnObject(other.type_name().to_string())),
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Convert into a value using another binding.
    ///
    /// Object members are replayed in this store's iteration order through
    /// the target store's insert-or-fetch, so the target decides the final
    /// order. Fails only if a target store runs out of capacity.
    pub fn rebind<C: ObjectTraits>(&self) -> JsonResult<JsonValue<C>> {
        Ok(match self {
            JsonValue::Null => JsonValue::Null,
            JsonValue::Bool(b) => JsonValue::Bool(*b),
            JsonValue::Number(n) => JsonValue::Number(*n),
            JsonValue::String(s) => JsonValue::String(s.clone()),
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| item.rebind::<C>())
                    .collect::<JsonResult<_>>()?,
            ),
            JsonValue::Object(map) => {
                let mut target = <ObjectOf<C> as Default>::default();
                for (key, value) in map.iter() {
                    *target.get_or_insert_default(key.clone())? = value.rebind::<C>()?;
                }
                JsonValue::Object(target)
            }
        })
    }
}

impl<B: ObjectTraits> Default for JsonValue<B> {
    fn default() -> Self {
        JsonValue::Null
    }
}

impl<B: ObjectTraits> Clone for JsonValue<B> {
    fn clone(&self) -> Self {
        match self {
            JsonValue::Null => JsonValue::Null,
            JsonValue::Bool(b) => JsonValue::Bool(*b),
            JsonValue::Number(n) => JsonValue::Number(*n),
            JsonValue::String(s) => JsonValue::String(s.clone()),
            JsonValue::Array(items) => JsonValue::Array(items.clone()),
            JsonValue::Object(map) => JsonValue::Object(B::clone_object(map)),
        }
    }
}

impl<B: ObjectTraits> PartialEq for JsonValue<B> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value == other))
            }
            _ => false,
        }
    }
}

impl<B: ObjectTraits> fmt::Debug for JsonValue<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("Null"),
            JsonValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            JsonValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            JsonValue::String(s) => f.debug_tuple("String").field(s).finish(),
            JsonValue::Array(items) => f.debug_tuple("Array").field(items).finish(),
            JsonValue::Object(map) => {
                f.write_str("Object(")?;
                f.debug_map().entries(map.iter()).finish()?;
                f.write_str(")")
            }
        }
    }
}

impl<B: ObjectTraits> From<bool> for JsonValue<B> {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl<B: ObjectTraits> From<i64> for JsonValue<B> {
    fn from(n: i64) -> Self {
        JsonValue::Number(Number::Int(n))
    }
}

impl<B: ObjectTraits> From<f64> for JsonValue<B> {
    fn from(f: f64) -> Self {
        JsonValue::Number(Number::Float(f))
    }
}

impl<B: ObjectTraits> From<&str> for JsonValue<B> {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl<B: ObjectTraits> From<String> for JsonValue<B> {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl<B: ObjectTraits> From<Vec<JsonValue<B>>> for JsonValue<B> {
    fn from(items: Vec<JsonValue<B>>) -> Self {
        JsonValue::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Indexed, InsertionOrdered};
    use crate::store::LinkedMap;

    type Ordered = JsonValue<InsertionOrdered>;

    fn keys<B: ObjectTraits>(value: &JsonValue<B>) -> Vec<String> {
        value
            .as_object()
            .map(|map| map.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_json_value_types() {
        assert!(Ordered::Null.is_null());
        assert!(Ordered::Bool(true).is_bool());
        assert!(Ordered::from(42).is_number());
        assert!(Ordered::from("test").is_string());
        assert!(Ordered::Array(vec![]).is_array());
        assert!(Ordered::object().is_object());
    }

    #[test]
    fn test_json_value_accessors() {
        assert_eq!(Ordered::Bool(true).as_bool(), Some(true));
        assert_eq!(Ordered::from(42).as_i64(), Some(42));
        assert_eq!(Ordered::from(1.5).as_i64(), None);
        assert_eq!(Ordered::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Ordered::from("test").as_str(), Some("test"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Ordered::Null.type_name(), "null");
        assert_eq!(Ordered::Bool(false).type_name(), "boolean");
        assert_eq!(Ordered::from(0).type_name(), "number");
        assert_eq!(Ordered::from(String::new()).type_name(), "string");
        assert_eq!(Ordered::Array(vec![]).type_name(), "array");
        assert_eq!(Ordered::object().type_name(), "object");
    }

    #[test]
    fn test_entry_promotes_null() {
        let mut value = Ordered::Null;
        *value.entry("name").unwrap() = Ordered::from(1);
        *value.entry("id").unwrap() = Ordered::from(2);
        assert_eq!(keys(&value), vec!["name", "id"]);
        assert_eq!(value.get("id").and_then(JsonValue::as_i64), Some(2));
    }

    #[test]
    fn test_entry_on_scalar_fails() {
        let mut value = Ordered::from(3);
        let err = value.entry("x").unwrap_err();
        assert_eq!(err.code(), 120);
        assert_eq!(err, ErrorCode::E120_NotAnObject("number".to_string()));
    }

    #[test]
    fn test_clone_keeps_store_capacity() {
        let mut map = LinkedMap::with_max_len(1);
        *map.get_or_insert_default("a".to_string()).unwrap() = Ordered::from(1);
        let value = Ordered::Object(map);

        let mut copy = value.clone();
        assert_eq!(copy, value);
        assert_eq!(copy.as_object().map(|m| m.max_len()), Some(1));
        assert_eq!(copy.entry("b").unwrap_err().code(), 116);
        assert_eq!(keys(&copy), vec!["a"]);
    }

    #[test]
    fn test_object_equality_ignores_order() {
        let mut a = Ordered::object();
        *a.entry("x").unwrap() = Ordered::from(1);
        *a.entry("y").unwrap() = Ordered::from(2);
        let mut b = Ordered::object();
        *b.entry("y").unwrap() = Ordered::from(2);
        *b.entry("x").unwrap() = Ordered::from(1);
        assert_eq!(a, b);

        *b.entry("x").unwrap() = Ordered::from(5);
        assert_ne!(a, b);
    }

    #[test]
    fn test_number_equality_across_kinds() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Float(1.5));
    }

    #[test]
    fn test_clone_keeps_order() {
        let mut value = Ordered::object();
        for key in ["c", "a", "b"] {
            value.entry(key).unwrap();
        }
        assert_eq!(keys(&value.clone()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rebind_reorders_through_target() {
        let mut value = Ordered::object();
        for key in ["name", "id"] {
            value.entry(key).unwrap();
        }
        let sorted: JsonValue<Sorted> = value.rebind().unwrap();
        let indexed: JsonValue<Indexed> = value.rebind().unwrap();
        assert_eq!(keys(&sorted), vec!["id", "name"]);
        assert_eq!(keys(&indexed), vec!["name", "id"]);
        assert_eq!(sorted.rebind::<InsertionOrdered>().unwrap(), value);
    }

    #[test]
    fn test_debug_shows_members_in_store_order() {
        let mut value = Ordered::object();
        *value.entry("b").unwrap() = Ordered::Bool(true);
        *value.entry("a").unwrap() = Ordered::Null;
        assert_eq!(format!("{:?}", value), r#"Object({"b": Bool(true), "a": Null})"#);
    }
}
