//! Scalar values crossing the column boundary
//!
//! `ScalarValue` is what a driver hands to the read path. `EnumValue` is the
//! underlying value an enum member is declared with. Both compare by their
//! canonical text form, which is also what the write path stores.

use std::fmt;

/// Raw column value as read from a driver
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl ScalarValue {
    /// Canonical text form
    ///
    /// Integers render in decimal; reals use the shortest round-trip form,
    /// so `1.0` renders as `1`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Real(r) => write!(f, "{}", r),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Real(value)
    }
}

/// Underlying value of an enum member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    Str(&'static str),
    Int(i64),
}

impl EnumValue {
    /// Whether a raw column value denotes this member
    pub fn matches(&self, raw: &ScalarValue) -> bool {
        match (self, raw) {
            (EnumValue::Str(s), ScalarValue::Text(t)) => *s == t.as_str(),
            (EnumValue::Int(i), ScalarValue::Integer(r)) => i == r,
            _ => self.to_string() == raw.to_text(),
        }
    }

    /// Equality usable in constant evaluation
    pub const fn const_eq(&self, other: &EnumValue) -> bool {
        match (self, other) {
            (EnumValue::Str(a), EnumValue::Str(b)) => {
                let (a, b) = (a.as_bytes(), b.as_bytes());
                if a.len() != b.len() {
                    return false;
                }
                let mut i = 0;
                while i < a.len() {
                    if a[i] != b[i] {
                        return false;
                    }
                    i += 1;
                }
                true
            }
            (EnumValue::Int(a), EnumValue::Int(b)) => *a == *b,
            _ => false,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Str(s) => f.write_str(s),
            EnumValue::Int(i) => write!(f, "{}", i),
        }
    }
}
