//! Reader for the mm-repr binary matrix interchange format.
//!
//! A repr file holds `count` same-shaped numeric matrices back to back
//! behind one self-describing header: a 7-byte signature, a dense/sparse
//! layout flag, one-byte element-type tags for keys and values, and the
//! shared `count`/`rows`/`cols`. Dense records are fixed-stride row-major
//! blocks; sparse records are variable-length key→value maps located via a
//! per-record size table that follows the header.
//!
//! [`ReprReader`] gives random access to individual records — only the
//! requested record is read and decoded — and may be shared across threads
//! behind an `Arc`; physical file access is serialized internally.
//!
//! ```no_run
//! use mmrepr::ReprReader;
//!
//! # fn main() -> Result<(), mmrepr::ReprError> {
//! let reader = ReprReader::open("counts.mm-repr")?;
//! println!(
//!     "{} records of {}x{} {}",
//!     reader.header().count,
//!     reader.header().rows,
//!     reader.header().cols,
//!     reader.header().value_type,
//! );
//! let record = reader.read_matrix(0)?;
//! # let _ = record;
//! # Ok(())
//! # }
//! ```

pub mod element;
pub mod error;
pub mod format;
pub mod io;
pub mod reader;
pub mod record;

pub use element::{Element, ElementType};
pub use error::ReprError;
pub use format::{ReprHeader, HEADER_SIZE, SIGNATURE};
pub use reader::ReprReader;
pub use record::{DenseMatrix, ElementValues, Record, SparseVector};
