// src/core/protocol/request.rs

//! The inbound half of the wire model: a method line plus an ordered
//! attribute bag.
//!
//! Attributes are opaque strings; numeric interpretation happens only through
//! the explicit accessors on this type, never implicitly. The serialized text
//! form (method line, `name: value` lines, blank-line terminator) is what
//! crosses the host boundary, so attribute order is preserved.

use crate::core::CommandError;
use indexmap::IndexMap;
use std::fmt;

/// A single inbound command: a method line naming the command, plus its
/// string attributes in arrival order.
///
/// A `Request` is immutable once handed to a command; handlers read it and
/// write their result into a [`Response`](super::Response).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method_line: String,
    attributes: IndexMap<String, String>,
}

impl Request {
    /// Creates an empty request for the given method line.
    pub fn new(method_line: impl Into<String>) -> Self {
        Self {
            method_line: method_line.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute insertion, mostly useful in tests and hosts.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn method_line(&self) -> &str {
        &self.method_line
    }

    /// Returns the attribute value, or the empty string when absent.
    /// A missing attribute is never an error.
    pub fn get(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Sets an attribute. Re-setting an existing name overwrites the value
    /// in place, keeping its original position in the serialized order.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Numeric coercion: absent or empty attributes yield `default`;
    /// anything else is read as a leading integer (`0` when no digits lead).
    /// Range clamping is the caller's responsibility.
    pub fn calc(&self, name: &str, default: i64) -> i64 {
        let raw = self.get(name);
        if raw.is_empty() {
            return default;
        }
        leading_i64(raw)
    }

    /// The attributes in arrival order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses the wire text form: method line, `name: value` lines, and an
    /// optional blank-line terminator.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut lines = text.lines();
        let method_line = lines
            .next()
            .map(|l| l.trim_end_matches('\r').trim())
            .unwrap_or("");
        if method_line.is_empty() {
            return Err(CommandError::MissingAttribute("methodLine".to_string()));
        }

        let mut request = Request::new(method_line);
        for line in lines {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                request.set(name.trim(), value);
            }
        }
        Ok(request)
    }
}

/// Serializes to the wire text form.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method_line)?;
        for (name, value) in &self.attributes {
            writeln!(f, "{name}: {value}")?;
        }
        writeln!(f)
    }
}

/// Reads a leading (optionally signed) integer from `s`, saturating on
/// overflow rather than wrapping. Returns `0` when no digits lead.
fn leading_i64(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return 0;
    }

    let mut literal = String::with_capacity(digits.len() + 1);
    if negative {
        literal.push('-');
    }
    literal.push_str(digits);

    literal
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}
