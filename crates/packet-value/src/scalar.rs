//! Scalar leaves: numbers, strings, booleans, timestamps and the absence marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single leaf value inside a record.
///
/// Equality is strict: two scalars are equal only when they hold the same
/// variant and the same value. `Integer(2)` and `Float(2.0)` differ. Floats
/// are compared by bit pattern, which keeps equality reflexive for `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    /// Explicit absence marker, e.g. a camera slot with no frame.
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    pub fn is_none(&self) -> bool {
        matches!(self, Scalar::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of integer and float scalars.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::None, Scalar::None) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn integer_and_float_are_distinct() {
        assert_ne!(Scalar::Integer(2), Scalar::Float(2.0));
    }

    #[test]
    fn nan_equals_itself() {
        assert_eq!(Scalar::Float(f64::NAN), Scalar::Float(f64::NAN));
    }

    #[test]
    fn signed_zeroes_differ() {
        assert_ne!(Scalar::Float(0.0), Scalar::Float(-0.0));
    }

    #[test]
    fn none_only_equals_none() {
        assert_eq!(Scalar::None, Scalar::None);
        assert_ne!(Scalar::None, Scalar::Bool(false));
        assert_ne!(Scalar::None, Scalar::Integer(0));
        assert_ne!(Scalar::None, Scalar::Str(String::new()));
    }

    #[test]
    fn timestamps_compare_by_instant() {
        let a = Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 1).unwrap();
        assert_eq!(Scalar::from(a), Scalar::from(a));
        assert_ne!(Scalar::from(a), Scalar::from(b));
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Scalar::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Scalar::Float(1.5).as_i64(), None);
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
    }
}
