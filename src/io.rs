//! Binary primitive reads: fixed-width scalars, contiguous arrays, and
//! packed key→value maps, all little-endian, all advancing the stream by
//! exactly the bytes consumed.
//!
//! Nothing here knows about the repr layout; the format modules compose
//! these primitives. Hitting end-of-stream mid-value is reported as
//! [`ReprError::TruncatedData`]; every other I/O failure passes through as
//! [`ReprError::Io`].

use std::io::Read;

use crate::element::Element;
use crate::error::ReprError;

/// Classify a raw read failure: EOF means the file is shorter than its
/// header promised, anything else is a genuine I/O fault.
fn classify(err: std::io::Error) -> ReprError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        ReprError::TruncatedData
    } else {
        ReprError::Io(err)
    }
}

/// Fill `buf` exactly from the stream.
pub fn read_bytes<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), ReprError> {
    reader.read_exact(buf).map_err(classify)
}

/// Read one little-endian scalar.
pub fn read_scalar<T: Element, R: Read>(reader: &mut R) -> Result<T, ReprError> {
    T::read_le(reader).map_err(classify)
}

/// Read `len` contiguous little-endian scalars.
pub fn read_array<T: Element, R: Read>(reader: &mut R, len: usize) -> Result<Vec<T>, ReprError> {
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(read_scalar(reader)?);
    }
    Ok(values)
}

/// Read a packed key→value map occupying exactly `byte_len` bytes: a
/// sequence of `(K, V)` pairs with no length prefix, padding, or framing.
///
/// `byte_len` must be a whole number of pairs; a remainder means the byte
/// length and the pair width disagree, which only a malformed file can
/// produce.
pub fn read_map<K: Element, V: Element, R: Read>(
    reader: &mut R,
    byte_len: u64,
) -> Result<Vec<(K, V)>, ReprError> {
    let pair_size = (K::SIZE + V::SIZE) as u64;
    if byte_len % pair_size != 0 {
        return Err(ReprError::InvalidFormat(format!(
            "map of {byte_len} bytes is not a whole number of {pair_size}-byte pairs"
        )));
    }
    let pairs = byte_len / pair_size;
    let mut entries = Vec::with_capacity(pairs as usize);
    for _ in 0..pairs {
        let key = read_scalar::<K, R>(reader)?;
        let value = read_scalar::<V, R>(reader)?;
        entries.push((key, value));
    }
    Ok(entries)
}
