//! Field validation and sanitization
//!
//! Every handler declares its inputs against a [`Validator`], which trims
//! and escapes each value and collects one [`FieldError`] per rejected
//! field. Nothing reaches the database unless [`Validator::finish`] is `Ok`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Message attached to every failed "required" check
const INVALID_VALUE: &str = "Invalid value";

/// Where a validated input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
    Query,
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The raw value as received (`null` when absent)
    pub value: Value,
    pub msg: &'static str,
    pub param: &'static str,
    pub location: Location,
}

/// All fields rejected for one request, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Names of the rejected fields
    pub fn params(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.param).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} ({:?})", e.param, e.location))
            .collect();
        write!(f, "invalid value for {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects per-field checks for a single request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the "required" rule to a text input.
    ///
    /// Returns the sanitized value. On failure the error is recorded and an
    /// empty string is returned; callers must not use it unless
    /// [`finish`](Self::finish) succeeds.
    pub fn required(&mut self, location: Location, param: &'static str, raw: Option<&str>) -> String {
        let value = raw.map(|s| Value::String(s.to_owned())).unwrap_or(Value::Null);
        self.required_value(location, param, &value)
    }

    /// Apply the "required" rule without escaping.
    ///
    /// For values forwarded verbatim to another service rather than stored
    /// or rendered; the value is only trimmed.
    pub fn present(&mut self, location: Location, param: &'static str, raw: Option<&str>) -> String {
        match raw.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
            _ => {
                self.errors.push(FieldError {
                    value: raw.map(|s| Value::String(s.to_owned())).unwrap_or(Value::Null),
                    msg: INVALID_VALUE,
                    param,
                    location,
                });
                String::new()
            }
        }
    }

    /// Apply the "required" rule to a JSON input.
    ///
    /// Strings are taken as-is, numbers and booleans by their text form.
    /// `null`, arrays and objects are rejected.
    pub fn required_value(&mut self, location: Location, param: &'static str, raw: &Value) -> String {
        let text = match raw {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        };

        match text.as_deref().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => escape(trimmed),
            _ => {
                self.errors.push(FieldError {
                    value: raw.clone(),
                    msg: INVALID_VALUE,
                    param,
                    location,
                });
                String::new()
            }
        }
    }

    /// Finish validation, failing if any field was rejected.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Replace characters that change meaning when the value is rendered as HTML.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}
