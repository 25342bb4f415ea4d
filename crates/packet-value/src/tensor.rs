//! Fixed-shape numeric tensors, used for camera frames and other dense arrays.
//!
//! A [`Tensor`] is a row-major flat buffer plus a shape. Equality is exact:
//! same shape, same element type, every element identical (floats by bit
//! pattern). There is no partial comparison; a single differing element makes
//! the whole tensor unequal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValueError, ValueResult};

/// Element type of a tensor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    U8,
    I32,
    I64,
    F32,
    F64,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed flat storage behind a [`Tensor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "values", rename_all = "snake_case")]
pub enum TensorData {
    U8(Vec<u8>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl TensorData {
    pub fn len(&self) -> usize {
        match self {
            TensorData::U8(v) => v.len(),
            TensorData::I32(v) => v.len(),
            TensorData::I64(v) => v.len(),
            TensorData::F32(v) => v.len(),
            TensorData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            TensorData::U8(_) => ElementType::U8,
            TensorData::I32(_) => ElementType::I32,
            TensorData::I64(_) => ElementType::I64,
            TensorData::F32(_) => ElementType::F32,
            TensorData::F64(_) => ElementType::F64,
        }
    }
}

impl PartialEq for TensorData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TensorData::U8(a), TensorData::U8(b)) => a == b,
            (TensorData::I32(a), TensorData::I32(b)) => a == b,
            (TensorData::I64(a), TensorData::I64(b)) => a == b,
            (TensorData::F32(a), TensorData::F32(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (TensorData::F64(a), TensorData::F64(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            _ => false,
        }
    }
}

impl Eq for TensorData {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Numeric types a [`Tensor`] can hold.
pub trait Element: Copy + sealed::Sealed {
    const TYPE: ElementType;

    fn into_data(values: Vec<Self>) -> TensorData;
    fn slice(data: &TensorData) -> Option<&[Self]>;
    fn slice_mut(data: &mut TensorData) -> Option<&mut [Self]>;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl Element for $ty {
            const TYPE: ElementType = ElementType::$variant;

            fn into_data(values: Vec<Self>) -> TensorData {
                TensorData::$variant(values)
            }

            fn slice(data: &TensorData) -> Option<&[Self]> {
                match data {
                    TensorData::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn slice_mut(data: &mut TensorData) -> Option<&mut [Self]> {
                match data {
                    TensorData::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(u8, U8);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(f32, F32);
impl_element!(f64, F64);

/// Number of elements a shape describes, `None` on overflow.
fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// A fixed-shape, row-major numeric tensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTensor")]
pub struct Tensor {
    shape: Vec<usize>,
    data: TensorData,
}

/// Unvalidated wire form; deserialization goes through [`Tensor::new`].
#[derive(Deserialize)]
struct RawTensor {
    shape: Vec<usize>,
    data: TensorData,
}

impl TryFrom<RawTensor> for Tensor {
    type Error = ValueError;

    fn try_from(raw: RawTensor) -> Result<Self, Self::Error> {
        Tensor::new(raw.shape, raw.data)
    }
}

impl Tensor {
    /// Builds a tensor, checking that `shape` matches the buffer length.
    pub fn new(shape: Vec<usize>, data: TensorData) -> ValueResult<Self> {
        let actual = data.len();
        match element_count(&shape) {
            Some(expected) if expected == actual => Ok(Self { shape, data }),
            expected => Err(ValueError::ShapeMismatch {
                shape,
                expected: expected.unwrap_or(usize::MAX),
                actual,
            }),
        }
    }

    pub fn from_vec<T: Element>(shape: Vec<usize>, values: Vec<T>) -> ValueResult<Self> {
        Self::new(shape, T::into_data(values))
    }

    /// A tensor of the given shape with every element set to `elem`.
    ///
    /// # Panics
    ///
    /// Panics if the element count of `shape` overflows `usize`; use
    /// [`Tensor::try_from_elem`] for shapes that are not known up front.
    pub fn from_elem<T: Element>(shape: &[usize], elem: T) -> Self {
        match Self::try_from_elem(shape, elem) {
            Ok(tensor) => tensor,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`Tensor::from_elem`].
    pub fn try_from_elem<T: Element>(shape: &[usize], elem: T) -> ValueResult<Self> {
        let count = element_count(shape).ok_or_else(|| ValueError::ShapeOverflow {
            shape: shape.to_vec(),
        })?;
        Ok(Self {
            shape: shape.to_vec(),
            data: T::into_data(vec![elem; count]),
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn into_data(self) -> TensorData {
        self.data
    }

    /// Flat row-major view, `None` if `T` is not the element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    pub fn as_slice_mut<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(&mut self.data)
    }

    fn flat_index(&self, index: &[usize]) -> ValueResult<usize> {
        let out_of_bounds = || ValueError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: self.shape.clone(),
        };
        if index.len() != self.shape.len() {
            return Err(out_of_bounds());
        }
        let mut flat = 0usize;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return Err(out_of_bounds());
            }
            flat = flat * dim + i;
        }
        Ok(flat)
    }

    fn type_mismatch<T: Element>(&self) -> ValueError {
        ValueError::ElementTypeMismatch {
            expected: T::TYPE,
            actual: self.element_type(),
        }
    }

    /// Reads the element at a multi-dimensional index.
    pub fn get<T: Element>(&self, index: &[usize]) -> ValueResult<T> {
        let flat = self.flat_index(index)?;
        let values = self.as_slice::<T>().ok_or_else(|| self.type_mismatch::<T>())?;
        Ok(values[flat])
    }

    /// Writes the element at a multi-dimensional index.
    pub fn set<T: Element>(&mut self, index: &[usize], value: T) -> ValueResult<()> {
        let flat = self.flat_index(index)?;
        let mismatch = self.type_mismatch::<T>();
        let values = self.as_slice_mut::<T>().ok_or(mismatch)?;
        values[flat] = value;
        Ok(())
    }
}
