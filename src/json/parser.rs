//! JSON parser building values for any object binding.
//!
//! Recursive descent over the lexer's tokens. Objects are built through the
//! [`ObjectStore`] contract alone: one empty store per object, then
//! insert-or-fetch for each member in input order with the parsed value
//! assigned into the returned slot.
//!
//! # Duplicate keys
//!
//! By default a repeated key keeps its first position and takes the last
//! value, because insert-or-fetch returns the existing slot. With
//! [`Limits::reject_duplicate_keys`] the parser fails with
//! `E101_DuplicateKey` instead.
//!
//! # Limits
//!
//! - E111: Nesting depth limit
//! - E113: Object member count limit
//! - E114: Array length limit
//! - E116: Store capacity, raised by the store itself

use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use super::lexer::{Lexer, Token};
use super::limits::Limits;
use super::value::{JsonValue, Number};
use crate::binding::{ObjectOf, ObjectTraits};
use crate::error::{ErrorCode, JsonResult};
use crate::store::ObjectStore;

/// JSON parser producing values bound to `B`.
pub struct Parser<'a, B: ObjectTraits> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: u64,
    max_depth_seen: u64,
    _binding: PhantomData<B>,
}

impl<'a, B: ObjectTraits> Parser<'a, B> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
            max_depth_seen: 0,
            _binding: PhantomData,
        })
    }

    /// Parse the input and return a JsonValue.
    pub fn parse(&mut self) -> JsonResult<JsonValue<B>> {
        let value = self.parse_value()?;

        if self.current != Token::Eof {
            return Err(ErrorCode::E100_InvalidJSON);
        }

        debug!(
            bytes = self.lexer.position(),
            depth = self.max_depth_seen,
            binding = B::NAME,
            "parse complete"
        );
        Ok(value)
    }

    fn advance(&mut self) -> JsonResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn enter(&mut self) -> JsonResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ErrorCode::E111_NestingTooDeep(
                self.depth,
                self.limits.max_nesting_depth,
            ));
        }
        self.max_depth_seen = self.max_depth_seen.max(self.depth);
        Ok(())
    }

    fn parse_value(&mut self) -> JsonResult<JsonValue<B>> {
        let value = match &self.current {
            Token::Null => JsonValue::Null,
            Token::True => JsonValue::Bool(true),
            Token::False => JsonValue::Bool(false),
            Token::String(s) => JsonValue::String(s.clone()),
            Token::Number(s) => JsonValue::Number(parse_number(s)?),
            Token::LeftBrace => return self.parse_object(),
            Token::LeftBracket => return self.parse_array(),
            _ => return Err(ErrorCode::E100_InvalidJSON),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_object(&mut self) -> JsonResult<JsonValue<B>> {
        self.enter()?;
        self.advance()?;

        let mut map = <ObjectOf<B> as Default>::default();
        let mut field_count: u64 = 0;
        let mut collapsed: u64 = 0;

        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            let key = match &self.current {
                Token::String(s) => s.clone(),
                _ => return Err(ErrorCode::E100_InvalidJSON),
            };
            self.advance()?;

            if self.current != Token::Colon {
                return Err(ErrorCode::E100_InvalidJSON);
            }
            self.advance()?;

            field_count += 1;
            if field_count > self.limits.max_object_fields {
                return Err(ErrorCode::E113_TooManyFields(
                    field_count,
                    self.limits.max_object_fields,
                ));
            }

            let before = map.len();
            let duplicate_key = self.limits.reject_duplicate_keys.then(|| key.clone());
            let slot = map.get_or_insert_default(key)?;
            *slot = self.parse_value()?;
            if map.len() == before {
                if let Some(key) = duplicate_key {
                    return Err(ErrorCode::E101_DuplicateKey(key));
                }
                collapsed += 1;
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBrace {
                        return Err(ErrorCode::E100_InvalidJSON);
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(ErrorCode::E100_InvalidJSON),
            }
        }

        if collapsed > 0 {
            warn!(collapsed, "duplicate object keys collapsed, last value kept");
        }
        trace!(fields = map.len(), depth = self.depth, "object parsed");

        self.depth -= 1;
        Ok(JsonValue::Object(map))
    }

    fn parse_array(&mut self) -> JsonResult<JsonValue<B>> {
        self.enter()?;
        self.advance()?;

        let mut arr = Vec::new();

        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Array(arr));
        }

        loop {
            arr.push(self.parse_value()?);

            if arr.len() as u64 > self.limits.max_array_length {
                return Err(ErrorCode::E114_ArrayTooLong(
                    arr.len() as u64,
                    self.limits.max_array_length,
                ));
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBracket {
                        return Err(ErrorCode::E100_InvalidJSON);
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(ErrorCode::E100_InvalidJSON),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(arr))
    }
}

/// Convert number text (grammar already checked) into a [`Number`].
///
/// Integers that fit in i64 stay exact. Anything else becomes f64; a value
/// that overflows to infinity is rejected.
fn parse_number(text: &str) -> JsonResult<Number> {
    let integral = !text.contains(['.', 'e', 'E']);
    if integral {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Number::Int(n));
        }
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Number::Float(f)),
        _ => Err(ErrorCode::E109_NumberOutOfRange(text.to_string())),
    }
}

/// Parse JSON into a value bound to `B`, with lenient limits.
pub fn parse<B: ObjectTraits>(input: &[u8]) -> JsonResult<JsonValue<B>> {
    parse_with_limits(input, Limits::lenient())
}

/// Parse JSON into a value bound to `B`, with custom limits.
pub fn parse_with_limits<B: ObjectTraits>(
    input: &[u8],
    limits: Limits,
) -> JsonResult<JsonValue<B>> {
    let mut parser = Parser::<B>::new(input, limits)?;
    parser.parse()
}

impl<B: ObjectTraits> JsonValue<B> {
    /// Parse JSON text with lenient limits.
    pub fn parse(input: impl AsRef<[u8]>) -> JsonResult<Self> {
        parse(input.as_ref())
    }

    /// Parse JSON text with custom limits.
    pub fn parse_with_limits(input: impl AsRef<[u8]>, limits: Limits) -> JsonResult<Self> {
        parse_with_limits(input.as_ref(), limits)
    }
}
