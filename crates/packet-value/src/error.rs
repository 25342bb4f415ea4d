use thiserror::Error;

use crate::tensor::ElementType;

/// Errors raised while building or converting values.
///
/// Comparing and copying values never fails; these only come from
/// constructors and from JSON interchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("tensor shape {shape:?} holds {expected} elements, buffer has {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("tensor index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },
    #[error("tensor holds {actual} elements, requested {expected}")]
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },
    #[error("tensor shape {shape:?} overflows usize")]
    ShapeOverflow { shape: Vec<usize> },
    #[error("integer {0} does not fit in i64")]
    IntegerOutOfRange(u64),
    #[error("array is not rectangular")]
    RaggedArray,
    #[error("array contains a non-numeric element")]
    NonNumericArray,
    #[error("expected a mapping at the record root")]
    NotAMapping,
}

pub type ValueResult<T> = Result<T, ValueError>;
