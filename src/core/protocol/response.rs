// src/core/protocol/response.rs

//! The outbound half of the wire model: a status line plus an ordered
//! attribute bag, built incrementally by a command's two phases.

use indexmap::IndexMap;
use std::fmt;

/// The result of one dispatched command.
///
/// A `Response` has no existence before command execution; the dispatcher
/// hands it to the host and discards it afterwards. On failure the dispatcher
/// substitutes a freshly generated error response, so a half-populated
/// success-shaped response is never observable at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    status_message: String,
    attributes: IndexMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// A fresh `200 OK` response with no attributes.
    pub fn new() -> Self {
        Self {
            status_code: 200,
            status_message: "OK".to_string(),
            attributes: IndexMap::new(),
        }
    }

    /// A response carrying only an error status line.
    pub fn error(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The wire status line, e.g. `200 OK`.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status_code, self.status_message)
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn set_status(&mut self, status_code: u16, status_message: impl Into<String>) {
        self.status_code = status_code;
        self.status_message = status_message.into();
    }

    /// Returns the attribute value, or the empty string when absent.
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

    /// The attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes set so far.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Serializes to the wire text form: status line, `name: value` lines, and a
/// blank-line terminator.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status_line())?;
        for (name, value) in &self.attributes {
            writeln!(f, "{name}: {value}")?;
        }
        writeln!(f)
    }
}
