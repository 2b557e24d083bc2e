//! Shape-tolerant lookups over `serde_json::Value`
//!
//! A [`Lookup`] is a cursor that may point at nothing. Every step returns
//! another cursor, and every terminal read returns a typed default when the
//! path is absent or has the wrong type.

use serde_json::{Map, Value};

/// Optional-chaining cursor into a JSON document
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a>(Option<&'a Value>);

impl<'a> Lookup<'a> {
    /// Start a lookup at `value`
    pub fn new(value: &'a Value) -> Self {
        Lookup(Some(value))
    }

    /// A cursor that points at nothing
    pub fn missing() -> Self {
        Lookup(None)
    }

    /// Step into an object member; absent or non-object yields a missing cursor
    pub fn get(self, key: &str) -> Self {
        Lookup(self.0.and_then(|v| v.as_object()).and_then(|m| m.get(key)))
    }

    /// Step through several object members
    pub fn path(self, keys: &[&str]) -> Self {
        keys.iter().fold(self, |cursor, key| cursor.get(key))
    }

    /// Use `other` when this cursor is missing or null
    pub fn or(self, other: Lookup<'a>) -> Self {
        if self.is_present() {
            self
        } else {
            other
        }
    }

    /// The underlying value, if present and not null
    pub fn value(self) -> Option<&'a Value> {
        self.0.filter(|v| !v.is_null())
    }

    /// Whether the cursor points at a non-null value
    pub fn is_present(self) -> bool {
        self.value().is_some()
    }

    /// Read a scalar as display text
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON form.
    /// Missing values, nulls, arrays and objects read as `""`.
    pub fn text(self) -> String {
        self.text_or("")
    }

    /// Like [`Lookup::text`], but with a caller-chosen default for absent values
    pub fn text_or(self, default: &str) -> String {
        match self.value() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Read an array; anything else reads as empty
    pub fn array(self) -> &'a [Value] {
        match self.value() {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Read an object; anything else reads as `None`
    pub fn object(self) -> Option<&'a Map<String, Value>> {
        self.value().and_then(Value::as_object)
    }
}
