// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The capability shape every storable component exposes.
//!
//! The engine never looks at concrete component types. It only asks a
//! [`Subject`] for its type name, its scalar properties, its child collections
//! and its string arrays, always by name.

use std::fmt;

/// Scalar property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A named scalar property together with its declared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: Value,
    pub default: Option<Value>,
}

impl Property {
    /// Property without a declared default; always rendered.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            default: None,
        }
    }

    /// Property that is omitted from output while it equals `default`.
    pub fn with_default(
        name: impl Into<String>,
        value: impl Into<Value>,
        default: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            default: Some(default.into()),
        }
    }

    pub fn is_default(&self) -> bool {
        self.default.as_ref() == Some(&self.value)
    }
}

/// A live component-tree node that can be stored.
pub trait Subject {
    /// Stable runtime type name, e.g. `org.apache.catalina.core.StandardHost`.
    fn type_name(&self) -> &str;

    /// Interface-like family used as a last lookup fallback, e.g.
    /// `org.apache.catalina.LifecycleListener` for arbitrary listener classes.
    fn family(&self) -> Option<&str> {
        None
    }

    /// Scalar properties in declared order.
    fn properties(&self) -> Vec<Property>;

    /// Child collection named `property`, or `None` if the subject has no such
    /// collection.
    fn children(&self, _property: &str) -> Option<Vec<&dyn Subject>> {
        None
    }

    /// String array named `property`, or `None` if the subject has no such array.
    fn string_array(&self, _property: &str) -> Option<&[String]> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("HTTP/1.1").to_string(), "HTTP/1.1");
        assert_eq!(Value::from(8080).to_string(), "8080");
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn test_property_default_detection() {
        assert!(Property::with_default("maxThreads", 200, 200).is_default());
        assert!(!Property::with_default("maxThreads", 150, 200).is_default());
        assert!(!Property::new("name", "tomcatThreadPool").is_default());
    }
}
