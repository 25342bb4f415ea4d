//! The closed three-case value type and the record map built from it.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::deep_equal::deep_equal;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// One recorded packet: string keys mapped to values.
///
/// Insertion order is kept for readable output, but equality ignores it.
pub type Record = IndexMap<String, Value>;

/// A field of a [`Record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Mapping(Record),
    Scalar(Scalar),
    Array(Tensor),
}

/// Discriminant of a [`Value`], used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Mapping,
    Scalar,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Mapping => "mapping",
            ValueKind::Scalar => "scalar",
            ValueKind::Array => "array",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// True for the explicit absence marker `Scalar::None`.
    pub fn is_none_marker(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::None))
    }

    pub fn as_mapping(&self) -> Option<&Record> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Tensor> {
        match self {
            Value::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Tensor> {
        match self {
            Value::Array(t) => Some(t),
            _ => None,
        }
    }

    /// Follows a path of mapping keys, returning the value at its end.
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        let mut current = self;
        for key in path {
            current = current.as_mapping()?.get(*key)?;
        }
        Some(current)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl Eq for Value {}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Mapping(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Tensor> for Value {
    fn from(value: Tensor) -> Self {
        Value::Array(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, f64, &str, String, chrono::DateTime<chrono::Utc>);
