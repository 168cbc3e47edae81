//! Parse limits and their configuration.
//!
//! Limits bound the resources a single parse may consume. Two profiles are
//! built in; either can be adjusted field by field, or loaded from TOML:
//!
//! ```toml
//! max_nesting_depth = 16
//! reject_duplicate_keys = true
//! ```
//!
//! Fields left out of a TOML document keep their [`Limits::lenient`] value.
//!
//! # Error codes
//!
//! - E110_InputTooLarge: Total input size limit
//! - E111_NestingTooDeep: Maximum nesting depth
//! - E112_StringTooLong: Maximum string length
//! - E113_TooManyFields: Maximum object members
//! - E114_ArrayTooLong: Maximum array length
//! - E115_NonASCIICharacter: ASCII-only strings
//! - E101_DuplicateKey: Duplicate rejection (when enabled)

use std::path::Path;

use serde::Deserialize;

use crate::error::{ErrorCode, JsonResult};

/// Resource limits and strictness switches for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum total input size in bytes (E110)
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects (E111)
    pub max_nesting_depth: u64,
    /// Maximum string length in bytes (E112)
    pub max_string_length: u64,
    /// Maximum number of members in an object, duplicates included (E113)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E114)
    pub max_array_length: u64,
    /// Whether to enforce ASCII-only strings (E115)
    pub ascii_only: bool,
    /// Fail on a repeated object key instead of keeping the last value (E101)
    pub reject_duplicate_keys: bool,
}

impl Limits {
    /// Tight limits for untrusted input.
    ///
    /// Duplicate keys and non-ASCII strings are rejected.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 32,        // 32 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
            ascii_only: true,
            reject_duplicate_keys: true,
        }
    }

    /// Generous limits accepting any well-formed JSON of practical size.
    ///
    /// Duplicate keys resolve to the last value at the first position.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024, // 64 MiB
            max_nesting_depth: 512,           // 512 levels
            max_string_length: 16 * 1024 * 1024,
            max_object_fields: 1_000_000,
            max_array_length: 10_000_000,
            ascii_only: false,
            reject_duplicate_keys: false,
        }
    }

    /// Parse limits from a TOML document.
    pub fn from_toml_str(text: &str) -> JsonResult<Self> {
        let limits: Limits =
            toml::from_str(text).map_err(|e| ErrorCode::E130_InvalidConfig(e.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Load limits from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> JsonResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ErrorCode::E130_InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject limits that would refuse every input.
    pub fn validate(&self) -> JsonResult<()> {
        let zero = [
            ("max_input_size", self.max_input_size),
            ("max_nesting_depth", self.max_nesting_depth),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);
        match zero {
            Some((name, _)) => Err(ErrorCode::E130_InvalidConfig(format!(
                "{} must be greater than zero",
                name
            ))),
            None => Ok(()),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::lenient()
    }
}
