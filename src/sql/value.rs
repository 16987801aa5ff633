//! Bound parameter values.
//!
//! A [`Value`] is what travels next to the SQL text in a compiled result.
//! Values never appear in the SQL itself except through
//! [`CompiledQuery::to_inline_sql`](crate::compiler::CompiledQuery::to_inline_sql).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dialect::{helpers, DialectProfile};

/// A backend-agnostic bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Render this value as a literal for the given dialect.
    pub fn to_literal(&self, profile: &DialectProfile) -> String {
        match self {
            Value::Null => "NULL".into(),
            Value::Bool(b) => profile.format_bool(*b).into(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => helpers::format_float(*f),
            Value::String(s) => profile.quote_string(s),
            Value::Bytes(bytes) => format!(
                "{}{}{}",
                profile.bytes_prefix,
                helpers::hex_bytes(bytes),
                profile.bytes_suffix
            ),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(bytes) => write!(f, "0x{}", helpers::hex_bytes(bytes)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
