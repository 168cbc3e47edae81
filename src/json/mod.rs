//! JSON parsing and serialization over pluggable object stores.
//!
//! # Architecture
//!
//! - [`value`] - `JsonValue<B>`, generic over the object binding
//! - [`limits`] - Resource limits and their TOML configuration
//! - [`lexer`] - Tokenizer with UTF-8/escape handling
//! - [`parser`] - Recursive descent parser building objects through the store contract
//! - [`dump`] - Compact and pretty serialization in store order
//!
//! # Example
//!
//! ```
//! use jsonstore::binding::{InsertionOrdered, Sorted};
//! use jsonstore::json::{dump, parse};
//!
//! let input = br#"{"name":1,"id":2}"#;
//!
//! let ordered = parse::<InsertionOrdered>(input).unwrap();
//! assert_eq!(dump(&ordered), r#"{"name":1,"id":2}"#);
//!
//! let sorted = parse::<Sorted>(input).unwrap();
//! assert_eq!(dump(&sorted), r#"{"id":2,"name":1}"#);
//! ```

pub mod dump;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod value;

pub use dump::{dump, dump_pretty, dump_with, DumpOptions};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits};
pub use value::{JsonValue, Number};
