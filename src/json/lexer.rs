//! JSON lexer/tokenizer.
//!
//! Converts raw JSON input bytes into a stream of tokens for the parser.
//! Handles UTF-8 validation, escape sequences, surrogate pairs and the
//! optional ASCII-only restriction. Numbers are checked against the RFC 8259
//! grammar here and converted by the parser.

use super::limits::Limits;
use crate::error::{ErrorCode, JsonResult};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value (raw text, grammar already checked)
    Number(String),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(ErrorCode::E110_InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        if std::str::from_utf8(input).is_err() {
            return Err(ErrorCode::E105_InvalidUTF8);
        }

        Ok(Self {
            input,
            pos: 0,
            limits,
        })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> JsonResult<Token> {
        self.skip_whitespace();

        let token = match self.peek() {
            None => return Ok(Token::Eof),
            Some(b'"') => return self.read_string(),
            Some(b'-' | b'0'..=b'9') => return self.read_number(),
            Some(b't') => return self.read_literal(b"true", Token::True),
            Some(b'f') => return self.read_literal(b"false", Token::False),
            Some(b'n') => return self.read_literal(b"null", Token::Null),
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b':') => Token::Colon,
            Some(b',') => Token::Comma,
            Some(_) => return Err(ErrorCode::E100_InvalidJSON),
        };
        self.pos += 1;
        Ok(token)
    }

    /// Read a string token, handling escape sequences.
    fn read_string(&mut self) -> JsonResult<Token> {
        // Opening quote
        self.advance();

        let mut result = String::new();
        loop {
            match self.advance() {
                None => return Err(ErrorCode::E100_InvalidJSON),
                Some(b'"') => break,
                Some(b'\\') => {
                    let escaped = self.read_escape_sequence()?;
                    result.push(escaped);
                }
                Some(b) if b < 0x20 => return Err(ErrorCode::E100_InvalidJSON),
                Some(b) if b <= 0x7F => result.push(b as char),
                Some(_) => {
                    // Multi-byte sequence; input is already known to be UTF-8
                    self.pos -= 1;
                    let ch = self.read_utf8_char()?;
                    if self.limits.ascii_only {
                        return Err(ErrorCode::E115_NonASCIICharacter(ch as u64));
                    }
                    result.push(ch);
                }
            }

            if result.len() as u64 > self.limits.max_string_length {
                return Err(ErrorCode::E112_StringTooLong(
                    result.len() as u64,
                    self.limits.max_string_length,
                ));
            }
        }

        Ok(Token::String(result))
    }

    /// Read one multi-byte UTF-8 character from the current position.
    fn read_utf8_char(&mut self) -> JsonResult<char> {
        let rest = &self.input[self.pos..];
        let width = match rest.first() {
            Some(b) if b & 0xE0 == 0xC0 => 2,
            Some(b) if b & 0xF0 == 0xE0 => 3,
            Some(b) if b & 0xF8 == 0xF0 => 4,
            _ => return Err(ErrorCode::E105_InvalidUTF8),
        };
        let ch = rest
            .get(..width)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next())
            .ok_or(ErrorCode::E105_InvalidUTF8)?;
        self.pos += width;
        Ok(ch)
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> JsonResult<char> {
        match self.advance() {
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            _ => Err(ErrorCode::E100_InvalidJSON),
        }
    }

    /// Read a \uXXXX escape, combining a surrogate pair if present.
    fn read_unicode_escape(&mut self) -> JsonResult<char> {
        let unit = self.read_hex4()? as u32;

        let codepoint = match unit {
            0xD800..=0xDBFF => {
                if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                    return Err(ErrorCode::E105_InvalidUTF8);
                }
                let low = self.read_hex4()? as u32;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ErrorCode::E105_InvalidUTF8);
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(ErrorCode::E105_InvalidUTF8),
            _ => unit,
        };

        if self.limits.ascii_only && codepoint > 0x7F {
            return Err(ErrorCode::E115_NonASCIICharacter(codepoint as u64));
        }
        char::from_u32(codepoint).ok_or(ErrorCode::E105_InvalidUTF8)
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self.advance().ok_or(ErrorCode::E100_InvalidJSON)?;
            let digit = (b as char).to_digit(16).ok_or(ErrorCode::E100_InvalidJSON)?;
            value = (value << 4) | digit as u16;
        }
        Ok(value)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a number token.
    fn read_number(&mut self) -> JsonResult<Token> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part: a single zero or a non-zero digit run
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(ErrorCode::E100_InvalidJSON);
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(ErrorCode::E100_InvalidJSON),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(ErrorCode::E100_InvalidJSON);
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(ErrorCode::E100_InvalidJSON);
            }
        }

        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| ErrorCode::E100_InvalidJSON)?;
        Ok(Token::Number(text.to_string()))
    }

    /// Read a `true`, `false` or `null` literal.
    fn read_literal(&mut self, expected: &[u8], token: Token) -> JsonResult<Token> {
        for &b in expected {
            if self.advance() != Some(b) {
                return Err(ErrorCode::E100_InvalidJSON);
            }
        }
        Ok(token)
    }
}
