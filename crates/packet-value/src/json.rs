//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! JSON has no tensor type, so rectangular arrays of numbers become
//! [`Tensor`]s (`i64` when every element is an integer, `f64` otherwise).
//! Going back, tensors become nested arrays and timestamps become RFC 3339
//! strings, so `to_json` is meant for fixtures and diagnostics rather than
//! lossless storage; use the serde impls for that.
//!
//! Integers between `i64::MAX` and `u64::MAX` are rejected with
//! [`ValueError::IntegerOutOfRange`] instead of being rounded to a float.

use serde_json::{Map, Number, Value as Json};

use crate::error::{ValueError, ValueResult};
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorData};
use crate::value::{Record, Value};

impl Value {
    /// Converts a JSON document into a value.
    pub fn from_json(json: &Json) -> ValueResult<Value> {
        Ok(match json {
            Json::Object(obj) => Value::Mapping(record_from_map(obj)?),
            Json::Array(items) => Value::Array(tensor_from_json(items)?),
            Json::Null => Value::Scalar(Scalar::None),
            Json::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
            Json::Number(n) => Value::Scalar(scalar_from_number(n)?),
            Json::String(s) => Value::Scalar(Scalar::Str(s.clone())),
        })
    }

    /// Renders the value as JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Mapping(record) => record_to_json(record),
            Value::Scalar(scalar) => scalar_to_json(scalar),
            Value::Array(tensor) => tensor_to_json(tensor),
        }
    }
}

/// Converts a JSON object into a record; any other JSON root is rejected.
pub fn record_from_json(json: &Json) -> ValueResult<Record> {
    match json {
        Json::Object(obj) => record_from_map(obj),
        _ => Err(ValueError::NotAMapping),
    }
}

pub fn record_to_json(record: &Record) -> Json {
    let mut obj = Map::with_capacity(record.len());
    for (key, value) in record {
        obj.insert(key.clone(), value.to_json());
    }
    Json::Object(obj)
}

fn record_from_map(obj: &Map<String, Json>) -> ValueResult<Record> {
    let mut record = Record::with_capacity(obj.len());
    for (key, value) in obj {
        record.insert(key.clone(), Value::from_json(value)?);
    }
    Ok(record)
}

fn check_integer_range(n: &Number) -> ValueResult<()> {
    match n.as_u64() {
        Some(u) if !n.is_i64() => Err(ValueError::IntegerOutOfRange(u)),
        _ => Ok(()),
    }
}

fn scalar_from_number(n: &Number) -> ValueResult<Scalar> {
    check_integer_range(n)?;
    Ok(match n.as_i64() {
        Some(i) => Scalar::Integer(i),
        None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
    })
}

fn float_to_json(f: f64) -> Json {
    Number::from_f64(f).map(Json::Number).unwrap_or(Json::Null)
}

fn scalar_to_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::None => Json::Null,
        Scalar::Bool(b) => Json::Bool(*b),
        Scalar::Integer(i) => Json::Number((*i).into()),
        Scalar::Float(f) => float_to_json(*f),
        Scalar::Str(s) => Json::String(s.clone()),
        Scalar::Timestamp(t) => Json::String(t.to_rfc3339()),
    }
}

/// Walks a nested JSON array, recording the extent of each dimension and
/// collecting the numeric leaves in row-major order.
struct ShapeCollector<'a> {
    shape: Vec<usize>,
    leaf_depth: Option<usize>,
    leaves: Vec<&'a Number>,
}

impl<'a> ShapeCollector<'a> {
    fn visit(&mut self, items: &'a [Json], depth: usize) -> ValueResult<()> {
        match self.shape.get(depth) {
            Some(&dim) if dim != items.len() => return Err(ValueError::RaggedArray),
            Some(_) => {}
            None => self.shape.push(items.len()),
        }
        for item in items {
            match item {
                Json::Array(inner) => {
                    if matches!(self.leaf_depth, Some(leaf) if depth + 1 > leaf) {
                        return Err(ValueError::RaggedArray);
                    }
                    self.visit(inner, depth + 1)?;
                }
                Json::Number(n) => {
                    match self.leaf_depth {
                        Some(leaf) if leaf != depth + 1 => return Err(ValueError::RaggedArray),
                        Some(_) => {}
                        None => self.leaf_depth = Some(depth + 1),
                    }
                    check_integer_range(n)?;
                    self.leaves.push(n);
                }
                _ => return Err(ValueError::NonNumericArray),
            }
        }
        Ok(())
    }
}

fn tensor_from_json(items: &[Json]) -> ValueResult<Tensor> {
    let mut collector = ShapeCollector {
        shape: Vec::new(),
        leaf_depth: None,
        leaves: Vec::new(),
    };
    collector.visit(items, 0)?;
    if matches!(collector.leaf_depth, Some(leaf) if leaf != collector.shape.len()) {
        return Err(ValueError::RaggedArray);
    }

    let data = if collector.leaves.iter().all(|n| n.is_i64()) {
        TensorData::I64(collector.leaves.iter().filter_map(|n| n.as_i64()).collect())
    } else {
        TensorData::F64(
            collector
                .leaves
                .iter()
                .map(|n| n.as_f64().unwrap_or(f64::NAN))
                .collect(),
        )
    };
    Tensor::new(collector.shape, data).map_err(|_| ValueError::RaggedArray)
}

fn nest(values: &[Json], shape: &[usize]) -> Json {
    match shape {
        [] => values.first().cloned().unwrap_or(Json::Null),
        [_] => Json::Array(values.to_vec()),
        [outer, inner @ ..] => {
            let chunk: usize = inner.iter().product();
            Json::Array(
                (0..*outer)
                    .map(|i| nest(&values[i * chunk..(i + 1) * chunk], inner))
                    .collect(),
            )
        }
    }
}

fn tensor_to_json(tensor: &Tensor) -> Json {
    let flat: Vec<Json> = match tensor.data() {
        TensorData::U8(v) => v.iter().map(|&x| Json::from(x)).collect(),
        TensorData::I32(v) => v.iter().map(|&x| Json::from(x)).collect(),
        TensorData::I64(v) => v.iter().map(|&x| Json::from(x)).collect(),
        TensorData::F32(v) => v.iter().map(|&x| float_to_json(f64::from(x))).collect(),
        TensorData::F64(v) => v.iter().map(|&x| float_to_json(x)).collect(),
    };
    nest(&flat, tensor.shape())
}
