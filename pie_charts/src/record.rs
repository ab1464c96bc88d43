// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input records.
//!
//! A pie takes an ordered sequence of loosely-typed records: each carries at least an id
//! field and a value field, plus arbitrary extra fields that label accessors and color
//! resolvers may read.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use smallvec::SmallVec;

/// A single field value in a raw [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Missing / null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(Arc<str>),
}

impl Value {
    /// Returns the numeric interpretation of this value, if any.
    ///
    /// Text is parsed after trimming whitespace. Non-finite results are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Returns the string form used for ids, or `None` for [`Value::Null`].
    pub fn to_id(&self) -> Option<Arc<str>> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Bool(b) => Some(Arc::from(if *b { "true" } else { "false" })),
            Self::Number(v) => Some(Arc::from(v.to_string())),
        }
    }

    /// Returns the text content if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Arc::from(v))
    }
}

/// An ordered bag of named fields.
///
/// Field order is preserved; setting an existing field replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: SmallVec<[(Arc<str>, Value); 4]>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common `{ id, value }` shape.
    pub fn id_value(id: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self::new().with("id", id).with("value", value)
    }

    /// Sets a field and returns the record.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, replacing an existing field of the same name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| &**k == name) {
            slot.1 = value;
        } else {
            self.fields.push((Arc::from(name), value));
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(k, v)| (&**k == name).then_some(v))
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (&**k, v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reads one logical attribute (id, value, color, ...) out of a [`Record`].
#[derive(Clone)]
pub enum Accessor {
    /// Read a named field.
    Field(Arc<str>),
    /// Compute the value from the whole record.
    Custom(Arc<dyn Fn(&Record) -> Value + Send + Sync>),
}

impl Accessor {
    /// Accessor for a named field.
    pub fn field(name: &str) -> Self {
        Self::Field(Arc::from(name))
    }

    /// Accessor backed by a closure.
    pub fn custom(f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Applies the accessor. Missing fields read as [`Value::Null`].
    pub fn get(&self, record: &Record) -> Value {
        match self {
            Self::Field(name) => record.get(name).cloned().unwrap_or(Value::Null),
            Self::Custom(f) => f(record),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn set_replaces_existing_field_in_place() {
        let mut r = Record::new().with("id", "a").with("value", 1);
        r.set("id", "b");
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("id"), Some(&Value::from("b")));
        let names: std::vec::Vec<_> = r.fields().map(|(k, _)| k).collect();
        assert_eq!(names, ["id", "value"]);
    }

    #[test]
    fn numeric_text_parses_but_garbage_does_not() {
        assert_eq!(Value::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(Value::from("twelve").as_f64(), None);
        assert_eq!(Value::Number(f64::NAN).as_f64(), None);
        assert_eq!(Value::Bool(true).as_f64(), None);
    }

    #[test]
    fn ids_coerce_to_strings() {
        assert_eq!(Value::from(3).to_id().as_deref(), Some("3"));
        assert_eq!(Value::from(true).to_id().as_deref(), Some("true"));
        assert_eq!(Value::Null.to_id(), None);
    }

    #[test]
    fn custom_accessor_sees_whole_record() {
        let acc = Accessor::custom(|r| {
            let a = r.get("a").and_then(Value::as_f64).unwrap_or(0.0);
            let b = r.get("b").and_then(Value::as_f64).unwrap_or(0.0);
            Value::Number(a + b)
        });
        let r = Record::new().with("a", 2).with("b", 3);
        assert_eq!(acc.get(&r), Value::Number(5.0));
        assert_eq!(Accessor::field("missing").get(&r), Value::Null);
    }
}
