//! On-disk constants and the header codec for mm-repr files.

use crate::element::ElementType;
use crate::error::ReprError;

/// Magic bytes opening every repr file. The trailing byte doubles as the
/// format version (currently 0).
pub const SIGNATURE: [u8; 7] = *b"MMREPR\0";

/// Fixed size of the repr file header in bytes.
///   signature[7] + is_sparse:u8 + key_type:u8 + value_type:u8
///   + count:u64 + rows:u64 + cols:u64
///   = 7 + 1 + 1 + 1 + 8 + 8 + 8 = 34
///
/// All record offset arithmetic is anchored on this constant. For sparse
/// files the size table (`count` × u64) follows the header directly, with
/// no padding.
pub const HEADER_SIZE: u64 = 34;

/// Decoded representation of the 34-byte repr file header.
///
/// One per open file, immutable after parse. Every record in a file shares
/// the same shape (`rows` × `cols`), layout (`is_sparse`), and element
/// types; only record content varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprHeader {
    /// Physical layout of every record: dense row-major blocks when false,
    /// variable-length key→value maps when true.
    pub is_sparse: bool,
    /// Storage width of sparse-map keys. Parsed and retained for dense
    /// files too, where no record ever consults it.
    pub key_type: ElementType,
    /// Element type of every matrix entry.
    pub value_type: ElementType,
    /// Number of matrix records in the file.
    pub count: u64,
    pub rows: u64,
    pub cols: u64,
}

impl ReprHeader {
    /// Serialize to exactly `HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut buf = [0u8; HEADER_SIZE as usize];
        buf[..7].copy_from_slice(&SIGNATURE);
        buf[7] = self.is_sparse as u8;
        buf[8] = self.key_type.to_tag();
        buf[9] = self.value_type.to_tag();
        buf[10..18].copy_from_slice(&self.count.to_le_bytes());
        buf[18..26].copy_from_slice(&self.rows.to_le_bytes());
        buf[26..34].copy_from_slice(&self.cols.to_le_bytes());
        buf
    }

    /// Deserialize from `HEADER_SIZE` bytes.
    ///
    /// The signature is compared byte-for-byte before any other field is
    /// interpreted; a wrong-format file may hold arbitrary bytes past it.
    /// Any nonzero sparsity byte means sparse (a conforming writer only
    /// emits 0 or 1). Both type tags must name a supported element type,
    /// the unused-by-dense `key_type` included.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE as usize]) -> Result<Self, ReprError> {
        if buf[..7] != SIGNATURE {
            return Err(ReprError::InvalidFormat(
                "signature mismatch, not a repr file".into(),
            ));
        }
        let key_type = ElementType::from_tag(buf[8])
            .ok_or_else(|| ReprError::InvalidFormat(format!("unknown key type tag {}", buf[8])))?;
        let value_type = ElementType::from_tag(buf[9]).ok_or_else(|| {
            ReprError::InvalidFormat(format!("unknown value type tag {}", buf[9]))
        })?;
        Ok(Self {
            is_sparse: buf[7] != 0,
            key_type,
            value_type,
            count: u64_at(buf, 10),
            rows: u64_at(buf, 18),
            cols: u64_at(buf, 26),
        })
    }

    /// Logical length of one record's flattened vector.
    pub fn record_len(&self) -> u64 {
        self.rows * self.cols
    }
}

fn u64_at(buf: &[u8; HEADER_SIZE as usize], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
