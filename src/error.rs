//! Error codes for parsing, serialization and object stores.
//!
//! Every failure the crate can report is a variant of [`ErrorCode`]. Each
//! variant carries a stable numeric code so that callers (and the CLI) can
//! match on failures without parsing messages.
//!
//! # Ranges
//!
//! - 100..=115: malformed or over-limit JSON input
//! - 116: object store capacity
//! - 120..=130: value access and configuration
//! - 199: internal invariant violations

use thiserror::Error;

/// All error codes reported by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// E100_InvalidJSON (code 100)
    #[error("E100_InvalidJSON")]
    E100_InvalidJSON,

    /// E101_DuplicateKey (code 101)
    #[error("E101_DuplicateKey({0})")]
    E101_DuplicateKey(/* key */ String),

    /// E105_InvalidUTF8 (code 105)
    #[error("E105_InvalidUTF8")]
    E105_InvalidUTF8,

    /// E109_NumberOutOfRange (code 109)
    #[error("E109_NumberOutOfRange({0})")]
    E109_NumberOutOfRange(/* value */ String),

    /// E110_InputTooLarge (code 110)
    #[error("E110_InputTooLarge({0}, {1})")]
    E110_InputTooLarge(/* size */ u64, /* limit */ u64),

    /// E111_NestingTooDeep (code 111)
    #[error("E111_NestingTooDeep({0}, {1})")]
    E111_NestingTooDeep(/* depth */ u64, /* limit */ u64),

    /// E112_StringTooLong (code 112)
    #[error("E112_StringTooLong({0}, {1})")]
    E112_StringTooLong(/* length */ u64, /* limit */ u64),

    /// E113_TooManyFields (code 113)
    #[error("E113_TooManyFields({0}, {1})")]
    E113_TooManyFields(/* count */ u64, /* limit */ u64),

    /// E114_ArrayTooLong (code 114)
    #[error("E114_ArrayTooLong({0}, {1})")]
    E114_ArrayTooLong(/* length */ u64, /* limit */ u64),

    /// E115_NonASCIICharacter (code 115)
    #[error("E115_NonASCIICharacter({0})")]
    E115_NonASCIICharacter(/* codepoint */ u64),

    /// E116_CapacityExceeded (code 116)
    ///
    /// Raised by an object store when inserting a new key would exceed its
    /// `max_len()`. Nothing is inserted.
    #[error("E116_CapacityExceeded({0}, {1})")]
    E116_CapacityExceeded(/* count */ u64, /* limit */ u64),

    /// E120_NotAnObject (code 120)
    #[error("E120_NotAnObject({0})")]
    E120_NotAnObject(/* type */ String),

    /// E130_InvalidConfig (code 130)
    #[error("E130_InvalidConfig({0})")]
    E130_InvalidConfig(/* reason */ String),

    /// E199_InternalError (code 199)
    ///
    /// A broken internal invariant, reported instead of panicking.
    #[error("E199_InternalError({0})")]
    E199_InternalError(/* context */ String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_InvalidJSON => 100,
            ErrorCode::E101_DuplicateKey(_) => 101,
            ErrorCode::E105_InvalidUTF8 => 105,
            ErrorCode::E109_NumberOutOfRange(_) => 109,
            ErrorCode::E110_InputTooLarge(_, _) => 110,
            ErrorCode::E111_NestingTooDeep(_, _) => 111,
            ErrorCode::E112_StringTooLong(_, _) => 112,
            ErrorCode::E113_TooManyFields(_, _) => 113,
            ErrorCode::E114_ArrayTooLong(_, _) => 114,
            ErrorCode::E115_NonASCIICharacter(_) => 115,
            ErrorCode::E116_CapacityExceeded(_, _) => 116,
            ErrorCode::E120_NotAnObject(_) => 120,
            ErrorCode::E130_InvalidConfig(_) => 130,
            ErrorCode::E199_InternalError(_) => 199,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_InvalidJSON => "E100_InvalidJSON",
            ErrorCode::E101_DuplicateKey(_) => "E101_DuplicateKey",
            ErrorCode::E105_InvalidUTF8 => "E105_InvalidUTF8",
            ErrorCode::E109_NumberOutOfRange(_) => "E109_NumberOutOfRange",
            ErrorCode::E110_InputTooLarge(_, _) => "E110_InputTooLarge",
            ErrorCode::E111_NestingTooDeep(_, _) => "E111_NestingTooDeep",
            ErrorCode::E112_StringTooLong(_, _) => "E112_StringTooLong",
            ErrorCode::E113_TooManyFields(_, _) => "E113_TooManyFields",
            ErrorCode::E114_ArrayTooLong(_, _) => "E114_ArrayTooLong",
            ErrorCode::E115_NonASCIICharacter(_) => "E115_NonASCIICharacter",
            ErrorCode::E116_CapacityExceeded(_, _) => "E116_CapacityExceeded",
            ErrorCode::E120_NotAnObject(_) => "E120_NotAnObject",
            ErrorCode::E130_InvalidConfig(_) => "E130_InvalidConfig",
            ErrorCode::E199_InternalError(_) => "E199_InternalError",
        }
    }
}

/// Result type for JSON and object store operations.
pub type JsonResult<T> = Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_names() {
        let cases = [
            (ErrorCode::E100_InvalidJSON, 100),
            (ErrorCode::E101_DuplicateKey("a".to_string()), 101),
            (ErrorCode::E116_CapacityExceeded(3, 2), 116),
            (ErrorCode::E130_InvalidConfig("x".to_string()), 130),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code);
            assert!(err.name().starts_with(&format!("E{}_", code)));
        }
    }

    #[test]
    fn test_display_includes_params() {
        let err = ErrorCode::E113_TooManyFields(5, 4);
        assert_eq!(err.to_string(), "E113_TooManyFields(5, 4)");
    }
}
