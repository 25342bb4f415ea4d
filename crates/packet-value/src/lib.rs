//! packet-value - Value model for recorded telemetry packets.
//!
//! A packet is a [`Record`]: string keys mapped to [`Value`]s. A value is
//! exactly one of three kinds:
//!
//! - [`Value::Mapping`] - a nested record,
//! - [`Value::Scalar`] - a number, string, boolean, timestamp or the explicit
//!   absence marker [`Scalar::None`],
//! - [`Value::Array`] - a fixed-shape numeric [`Tensor`] such as a camera
//!   frame.
//!
//! Equality is total and strict (see [`deep_equal`]): comparing values of
//! different kinds yields `false`, never an error.

mod deep_equal;
mod error;
mod json;
mod scalar;
mod tensor;
mod value;

pub use deep_equal::{deep_equal, records_equal};
pub use error::{ValueError, ValueResult};
pub use json::{record_from_json, record_to_json};
pub use scalar::Scalar;
pub use tensor::{Element, ElementType, Tensor, TensorData};
pub use value::{Record, Value, ValueKind};
