//! The element-type registry: the closed set of numeric kinds a repr file can
//! store, and the bridge from a runtime type tag to a compile-time concrete
//! type.
//!
//! The format is self-describing — the writer picks an element type at write
//! time and records it as a one-byte tag — but decoding needs a concrete,
//! sized type for correct arithmetic and layout. [`ElementType`] is the
//! runtime side, the [`Element`] trait is the compile-time side, and
//! [`with_element_type!`] connects the two with a total `match`.

use std::fmt;
use std::io::{Read, Write};

use crate::record::ElementValues;

/// Element kinds storable in a repr file, tagged on disk as a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ElementType {
    /// Parse an on-disk tag byte. Returns `None` for a tag outside the
    /// supported set; callers report that as an invalid-format error.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::U8),
            1 => Some(Self::U16),
            2 => Some(Self::U32),
            3 => Some(Self::U64),
            4 => Some(Self::I8),
            5 => Some(Self::I16),
            6 => Some(Self::I32),
            7 => Some(Self::I64),
            8 => Some(Self::F32),
            9 => Some(Self::F64),
            _ => None,
        }
    }

    /// The tag byte stored in file headers.
    pub const fn to_tag(self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::U16 => 1,
            Self::U32 => 2,
            Self::U64 => 3,
            Self::I8 => 4,
            Self::I16 => 5,
            Self::I32 => 6,
            Self::I64 => 7,
            Self::F32 => 8,
            Self::F64 => 9,
        }
    }

    /// Width of one element of this type in bytes.
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        write!(f, "{s}")
    }
}

/// A concrete numeric type that can live in a repr file.
///
/// Implemented for exactly the ten primitives enumerated by [`ElementType`];
/// the two stay in lockstep via the same macro invocation.
pub trait Element: Copy + Send + Sync + 'static {
    /// The runtime tag this type corresponds to.
    const TYPE: ElementType;
    /// Byte width of one value.
    const SIZE: usize;

    /// Read one little-endian value from the stream, advancing it by
    /// exactly [`SIZE`](Self::SIZE) bytes.
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self>;

    /// Write one value little-endian. The encode half exists for external
    /// writers and the test suite; the reader never calls it.
    fn write_le<W: Write>(self, writer: &mut W) -> std::io::Result<()>;

    /// Widen to a `u64` flat index. Sparse-map keys are stored with a
    /// per-file width but always denote positions in a flattened vector.
    fn to_index(self) -> u64;

    /// Move a decoded buffer into the type-erased payload enum.
    fn into_values(values: Vec<Self>) -> ElementValues;

    /// Borrow a typed slice back out of the payload enum, or `None` if the
    /// payload holds a different element type.
    fn from_values(values: &ElementValues) -> Option<&[Self]>;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const TYPE: ElementType = ElementType::$variant;
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    reader.read_exact(&mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }

                fn write_le<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
                    writer.write_all(&self.to_le_bytes())
                }

                fn to_index(self) -> u64 {
                    self as u64
                }

                fn into_values(values: Vec<Self>) -> ElementValues {
                    ElementValues::$variant(values)
                }

                fn from_values(values: &ElementValues) -> Option<&[Self]> {
                    match values {
                        ElementValues::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

/// Run `$body` with `$T` bound to the concrete primitive type named by the
/// [`ElementType`] value `$ty`.
///
/// ```
/// use mmrepr::{with_element_type, Element, ElementType};
///
/// let ty = ElementType::U32;
/// let width = with_element_type!(ty, T => T::SIZE);
/// assert_eq!(width, 4);
/// ```
#[macro_export]
macro_rules! with_element_type {
    ($ty:expr, $T:ident => $body:expr) => {
        match $ty {
            $crate::ElementType::U8 => {
                type $T = u8;
                $body
            }
            $crate::ElementType::U16 => {
                type $T = u16;
                $body
            }
            $crate::ElementType::U32 => {
                type $T = u32;
                $body
            }
            $crate::ElementType::U64 => {
                type $T = u64;
                $body
            }
            $crate::ElementType::I8 => {
                type $T = i8;
                $body
            }
            $crate::ElementType::I16 => {
                type $T = i16;
                $body
            }
            $crate::ElementType::I32 => {
                type $T = i32;
                $body
            }
            $crate::ElementType::I64 => {
                type $T = i64;
                $body
            }
            $crate::ElementType::F32 => {
                type $T = f32;
                $body
            }
            $crate::ElementType::F64 => {
                type $T = f64;
                $body
            }
        }
    };
}
