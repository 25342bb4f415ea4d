use crate::value::{Record, Value};

/// Performs a deep equality check between two values.
///
/// - Mappings are equal when they have the same key set and every value is
///   deep-equal, regardless of key order.
/// - Scalars are equal when they hold the same variant and value.
/// - Arrays are equal when shape, element type and every element match.
/// - Values of different kinds are never equal.
///
/// # Examples
///
/// ```
/// use packet_value::{deep_equal, Scalar, Tensor, Value};
///
/// let a = Value::from(Tensor::from_elem(&[2, 2], 1u8));
/// let b = Value::from(Tensor::from_elem(&[2, 2], 1u8));
/// let c = Value::Scalar(Scalar::None);
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Mapping(a), Value::Mapping(b)) => records_equal(a, b),
        (Value::Scalar(a), Value::Scalar(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a == b,

        // Different kinds are never equal
        _ => false,
    }
}

/// Key-by-key deep equality of two records.
pub fn records_equal(a: &Record, b: &Record) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (key, val_a) in a {
        match b.get(key) {
            Some(val_b) => {
                if !deep_equal(val_a, val_b) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}
