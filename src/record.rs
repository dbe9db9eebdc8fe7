//! The decoded value handed back by [`ReprReader::read_matrix`]: a tagged
//! layout (dense or sparse) carrying a type-tagged payload, so callers can
//! inspect shape and element type without generics at the API boundary.
//!
//! [`ReprReader::read_matrix`]: crate::ReprReader::read_matrix

use crate::element::{Element, ElementType};

/// A type-erased buffer of decoded elements. One variant per entry in
/// [`ElementType`], holding the values of a single record (dense) or the
/// stored values of a sparse map.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValues {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ElementValues {
    /// The element type of the stored payload.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::U8(_) => ElementType::U8,
            Self::U16(_) => ElementType::U16,
            Self::U32(_) => ElementType::U32,
            Self::U64(_) => ElementType::U64,
            Self::I8(_) => ElementType::I8,
            Self::I16(_) => ElementType::I16,
            Self::I32(_) => ElementType::I32,
            Self::I64(_) => ElementType::I64,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the payload as a typed slice, or `None` when `T` does not
    /// match the stored element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::from_values(self)
    }
}

/// A row-major dense matrix record of shape `(rows, cols)`.
///
/// Invariant: `values.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    pub rows: u64,
    pub cols: u64,
    pub values: ElementValues,
}

impl DenseMatrix {
    pub fn shape(&self) -> (u64, u64) {
        (self.rows, self.cols)
    }
}

/// A sparse record: the non-default entries of a flattened vector of
/// logical length `len` (the file's `rows * cols`).
///
/// Keys are widened to `u64` flat indices on decode regardless of the
/// on-disk key width. `keys` and `values` are parallel, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub len: u64,
    pub keys: Vec<u64>,
    pub values: ElementValues,
}

impl SparseVector {
    /// Number of stored (non-default) entries.
    pub fn nnz(&self) -> usize {
        self.keys.len()
    }
}

/// One decoded matrix record, owned by the caller. The reader keeps no
/// cache; every [`read_matrix`](crate::ReprReader::read_matrix) call decodes
/// fresh from the file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Dense(DenseMatrix),
    Sparse(SparseVector),
}

impl Record {
    /// The element type of the record's values.
    pub fn value_type(&self) -> ElementType {
        match self {
            Self::Dense(m) => m.values.element_type(),
            Self::Sparse(v) => v.values.element_type(),
        }
    }

    pub fn as_dense(&self) -> Option<&DenseMatrix> {
        match self {
            Self::Dense(m) => Some(m),
            Self::Sparse(_) => None,
        }
    }

    pub fn as_sparse(&self) -> Option<&SparseVector> {
        match self {
            Self::Sparse(v) => Some(v),
            Self::Dense(_) => None,
        }
    }
}
