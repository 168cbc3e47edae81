//! JSON serialization.
//!
//! Object members are written in the order the store's iterator yields them,
//! in a single pass. There is no sorting and no deduplication here: a
//! sorted binding produces sorted output, an insertion-ordered binding
//! reproduces input order.
//!
//! Output formats:
//!
//! - Compact: `{"a":1,"b":[true,null]}`
//! - Pretty: newline and indentation per level, `": "` between key and value,
//!   empty containers stay `{}` and `[]`
//!
//! Floats are written with the shortest representation that reads back to the
//! same value, always carrying a fraction or exponent (`1.0`, `1e100`).
//! Non-finite floats cannot be produced by the parser; if built by hand they
//! are written as `null`.

use std::fmt::Write;

use super::value::{JsonValue, Number};
use crate::binding::{ObjectOf, ObjectTraits};
use crate::store::ObjectStore;

/// Serialization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpOptions {
    /// Spaces per nesting level; `None` writes compact output
    pub indent: Option<usize>,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ensure_ascii: bool,
}

impl DumpOptions {
    /// Compact output.
    pub const fn compact() -> Self {
        Self {
            indent: None,
            ensure_ascii: false,
        }
    }

    /// Pretty output with the given indent width.
    pub const fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ensure_ascii: false,
        }
    }
}

/// Serialize a value to compact JSON.
pub fn dump<B: ObjectTraits>(value: &JsonValue<B>) -> String {
    dump_with(value, &DumpOptions::compact())
}

/// Serialize a value to indented JSON.
pub fn dump_pretty<B: ObjectTraits>(value: &JsonValue<B>, indent: usize) -> String {
    dump_with(value, &DumpOptions::pretty(indent))
}

/// Serialize a value with explicit options.
pub fn dump_with<B: ObjectTraits>(value: &JsonValue<B>, options: &DumpOptions) -> String {
    let mut writer = Writer {
        output: String::new(),
        options,
    };
    writer.value(value, 0);
    writer.output
}

struct Writer<'o> {
    output: String,
    options: &'o DumpOptions,
}

impl Writer<'_> {
    fn value<B: ObjectTraits>(&mut self, value: &JsonValue<B>, level: usize) {
        match value {
            JsonValue::Null => self.output.push_str("null"),
            JsonValue::Bool(true) => self.output.push_str("true"),
            JsonValue::Bool(false) => self.output.push_str("false"),
            JsonValue::Number(n) => self.number(n),
            JsonValue::String(s) => self.string(s),
            JsonValue::Array(arr) => self.array(arr, level),
            JsonValue::Object(map) => self.object::<B>(map, level),
        }
    }

    fn number(&mut self, n: &Number) {
        match *n {
            Number::Int(i) => {
                let _ = write!(self.output, "{}", i);
            }
            Number::Float(f) if f.is_finite() => {
                let _ = write!(self.output, "{:?}", f);
            }
            Number::Float(_) => self.output.push_str("null"),
        }
    }

    fn string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\x08' => self.output.push_str("\\b"),
                '\x0C' => self.output.push_str("\\f"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c < '\x20' => {
                    let _ = write!(self.output, "\\u{:04x}", c as u32);
                }
                c if self.options.ensure_ascii && !c.is_ascii() => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        let _ = write!(self.output, "\\u{:04x}", unit);
                    }
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn array<B: ObjectTraits>(&mut self, arr: &[JsonValue<B>], level: usize) {
        if arr.is_empty() {
            self.output.push_str("[]");
            return;
        }
        self.output.push('[');
        for (i, value) in arr.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(level + 1);
            self.value(value, level + 1);
        }
        self.newline(level);
        self.output.push(']');
    }

    fn object<B: ObjectTraits>(&mut self, map: &ObjectOf<B>, level: usize) {
        if map.is_empty() {
            self.output.push_str("{}");
            return;
        }
        self.output.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(level + 1);
            self.string(key);
            self.output.push(':');
            if self.options.indent.is_some() {
                self.output.push(' ');
            }
            self.value(value, level + 1);
        }
        self.newline(level);
        self.output.push('}');
    }

    fn newline(&mut self, level: usize) {
        if let Some(width) = self.options.indent {
            self.output.push('\n');
            self.output.push_str(&" ".repeat(width * level));
        }
    }
}

impl<B: ObjectTraits> JsonValue<B> {
    /// Serialize to compact JSON.
    pub fn dump(&self) -> String {
        dump(self)
    }

    /// Serialize to indented JSON.
    pub fn dump_pretty(&self, indent: usize) -> String {
        dump_pretty(self, indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Indexed, InsertionOrdered, Sorted};

    type Ordered = JsonValue<InsertionOrdered>;

    fn ordered(input: &str) -> Ordered {
        Ordered::parse(input).unwrap()
    }

    #[test]
    fn test_dump_primitives() {
        assert_eq!(dump(&Ordered::Null), "null");
        assert_eq!(dump(&Ordered::Bool(true)), "true");
        assert_eq!(dump(&Ordered::Bool(false)), "false");
        assert_eq!(dump(&Ordered::from(42)), "42");
        assert_eq!(dump(&Ordered::from(-7)), "-7");
    }

    #[test]
    fn test_dump_floats() {
        assert_eq!(dump(&Ordered::from(1.5)), "1.5");
        assert_eq!(dump(&Ordered::from(2.0)), "2.0");
        assert_eq!(dump(&Ordered::from(1e100)), "1e100");
        assert_eq!(dump(&Ordered::from(f64::NAN)), "null");
        assert_eq!(dump(&Ordered::from(f64::INFINITY)), "null");
    }

    #[test]
    fn test_dump_string_escapes() {
        assert_eq!(dump(&Ordered::from("a\nb")), "\"a\\nb\"");
        assert_eq!(dump(&Ordered::from("a\tb")), "\"a\\tb\"");
        assert_eq!(dump(&Ordered::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(dump(&Ordered::from("a\\b")), "\"a\\\\b\"");
        assert_eq!(dump(&Ordered::from("\x01")), "\"\\u0001\"");
        assert_eq!(dump(&Ordered::from("é")), "\"é\"");
    }

    #[test]
    fn test_dump_ensure_ascii() {
        let options = DumpOptions {
            indent: None,
            ensure_ascii: true,
        };
        assert_eq!(dump_with(&Ordered::from("é"), &options), "\"\\u00e9\"");
        assert_eq!(
            dump_with(&Ordered::from("\u{1F600}"), &options),
            "\"\\ud83d\\ude00\""
        );
    }

    #[test]
    fn test_dump_follows_store_order() {
        let input = r#"{"name":1,"id":2}"#;
        assert_eq!(ordered(input).dump(), input);
        assert_eq!(JsonValue::<Indexed>::parse(input).unwrap().dump(), input);
        assert_eq!(
            JsonValue::<Sorted>::parse(input).unwrap().dump(),
            r#"{"id":2,"name":1}"#
        );
    }

    #[test]
    fn test_dump_empty_containers() {
        assert_eq!(ordered("{}").dump(), "{}");
        assert_eq!(ordered("[]").dump(), "[]");
        assert_eq!(ordered("{}").dump_pretty(2), "{}");
        assert_eq!(ordered(r#"{"a":[]}"#).dump_pretty(2), "{\n  \"a\": []\n}");
    }

    #[test]
    fn test_dump_pretty() {
        let value = ordered(r#"{"b":[1,{"c":null}],"a":true}"#);
        let expected = "{\n  \"b\": [\n    1,\n    {\n      \"c\": null\n    }\n  ],\n  \"a\": true\n}";
        assert_eq!(value.dump_pretty(2), expected);
    }

    #[test]
    fn test_dump_pretty_zero_indent() {
        let value = ordered(r#"{"a":1}"#);
        assert_eq!(value.dump_pretty(0), "{\n\"a\": 1\n}");
    }

    #[test]
    fn test_dump_nested_compact() {
        let input = r#"{"arr":[1,2.5,"x"],"obj":{"z":1,"y":2}}"#;
        assert_eq!(ordered(input).dump(), input);
    }
}
