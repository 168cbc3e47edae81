//! jsonstore - JSON values over pluggable object stores.
//!
//! A JSON value type whose objects are held in whatever container a binding
//! selects. Any container implementing the [`ObjectStore`] contract can back
//! objects; parsing, serialization and equality go through the contract
//! only, so swapping the container changes member order and nothing else.
//!
//! # Architecture
//!
//! - [`store`] - The `ObjectStore` contract and its three containers
//! - [`binding`] - Type-level selection of the store behind `JsonValue`
//! - [`json`] - Value type, lexer, parser, limits and serializer
//! - [`error`] - Error codes
//!
//! # Example
//!
//! ```
//! use jsonstore::{OrderedJson, SortedJson};
//!
//! let input = r#"{"name":1,"id":2}"#;
//! assert_eq!(OrderedJson::parse(input).unwrap().dump(), input);
//! assert_eq!(SortedJson::parse(input).unwrap().dump(), r#"{"id":2,"name":1}"#);
//! ```

// Library code reports failures as error codes, never by panicking.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod binding;
pub mod error;
pub mod json;
pub mod store;

// Re-export commonly used types
pub use binding::{
    Indexed, IndexedJson, InsertionOrdered, ObjectOf, ObjectTraits, OrderedJson, Sorted,
    SortedJson,
};
pub use error::{ErrorCode, JsonResult};
pub use json::{
    dump, dump_pretty, dump_with, parse, parse_with_limits, DumpOptions, JsonValue, Limits,
    Number,
};
pub use store::{LinkedMap, ObjectStore};
