use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use crate::element::Element;
use crate::error::ReprError;
use crate::format::{ReprHeader, HEADER_SIZE, SIGNATURE};
use crate::io;
use crate::record::{DenseMatrix, Record, SparseVector};
use crate::with_element_type;

/// Random-access reader for repr files.
///
/// # Open sequence
/// 1. Read the 34-byte header (signature check, layout flag, element types,
///    count, rows, cols).
/// 2. If the file is sparse, read the size table (`count` × u64 byte
///    lengths) that directly follows the header, and precompute each
///    record's absolute byte offset as a running sum.
/// 3. Validate that the file is long enough to hold every record the
///    header promises. A short file fails at open, not on the first
///    unlucky [`read_matrix`] call.
///
/// Construction is all-or-nothing: any failure above returns an error and
/// no reader.
///
/// # Access pattern
/// [`read_matrix`] seeks straight to the requested record and decodes only
/// it. Dense records sit at a fixed stride from the header; sparse records
/// are variable-length, located via the precomputed offsets.
///
/// # Concurrency
/// The header and offset tables are immutable after open and read without
/// locking. The file cursor is the one piece of shared mutable state, so
/// each [`read_matrix`] call holds the file mutex across its whole
/// seek+read+decode sequence; the guard drops on every exit path. A
/// `ReprReader` can therefore be shared across threads behind an `Arc`.
///
/// [`read_matrix`]: Self::read_matrix
pub struct ReprReader {
    file: Mutex<File>,
    header: ReprHeader,
    /// Encoded byte length of each sparse record; empty for dense files.
    record_sizes: Vec<u64>,
    /// Absolute file offset of each sparse record; empty for dense files.
    record_offsets: Vec<u64>,
}

impl ReprReader {
    /// Open a repr file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReprError> {
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();

        // The signature is judged before the rest of the header is pulled,
        // so a wrong-format file is rejected as such even when it is too
        // short to hold a full header.
        let mut header_buf = [0u8; HEADER_SIZE as usize];
        io::read_bytes(&mut file, &mut header_buf[..7])?;
        if header_buf[..7] != SIGNATURE {
            return Err(ReprError::InvalidFormat(
                "signature mismatch, not a repr file".into(),
            ));
        }
        io::read_bytes(&mut file, &mut header_buf[7..])?;
        let header = ReprHeader::from_bytes(&header_buf)?;

        let record_len = header
            .rows
            .checked_mul(header.cols)
            .ok_or_else(size_overflow)?;

        let mut record_sizes = Vec::new();
        let mut record_offsets = Vec::new();

        if header.is_sparse {
            // Bound the table read by the real file length before
            // allocating `count` slots from an untrusted header.
            let table_bytes = header
                .count
                .checked_mul(8)
                .ok_or_else(size_overflow)?;
            let data_start = HEADER_SIZE
                .checked_add(table_bytes)
                .ok_or_else(size_overflow)?;
            if data_start > file_len {
                return Err(ReprError::TruncatedData);
            }

            record_sizes = io::read_array::<u64, _>(&mut file, header.count as usize)?;

            record_offsets.reserve_exact(record_sizes.len());
            let mut offset = data_start;
            for &size in &record_sizes {
                record_offsets.push(offset);
                offset = offset.checked_add(size).ok_or_else(size_overflow)?;
            }
            if offset > file_len {
                return Err(ReprError::TruncatedData);
            }
        } else {
            let record_bytes = record_len
                .checked_mul(header.value_type.size_in_bytes() as u64)
                .ok_or_else(size_overflow)?;
            let data_end = header
                .count
                .checked_mul(record_bytes)
                .and_then(|data| HEADER_SIZE.checked_add(data))
                .ok_or_else(size_overflow)?;
            if data_end > file_len {
                return Err(ReprError::TruncatedData);
            }
        }

        Ok(Self {
            file: Mutex::new(file),
            header,
            record_sizes,
            record_offsets,
        })
    }

    /// The parsed file header. Immutable for the reader's lifetime.
    pub fn header(&self) -> &ReprHeader {
        &self.header
    }

    /// Decode record `index` into a caller-owned [`Record`].
    ///
    /// Either a full, correctly shaped record comes back or an error does;
    /// no partial result ever escapes, and a failed call leaves the reader
    /// usable for further calls.
    pub fn read_matrix(&self, index: u64) -> Result<Record, ReprError> {
        // Judged before any seek or read touches the file.
        if index >= self.header.count {
            return Err(ReprError::IndexOutOfRange {
                index,
                count: self.header.count,
            });
        }

        // Seek and read are two operations on one shared cursor; the lock
        // spans the full seek+read+decode sequence and drops on every exit
        // path, error paths included.
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());

        with_element_type!(self.header.value_type, V => {
            if self.header.is_sparse {
                with_element_type!(self.header.key_type, K => {
                    self.read_sparse::<K, V>(&mut file, index)
                })
            } else {
                self.read_dense::<V>(&mut file, index)
            }
        })
    }

    fn read_dense<V: Element>(&self, file: &mut File, index: u64) -> Result<Record, ReprError> {
        let record_len = self.header.record_len();
        let offset = HEADER_SIZE + index * record_len * V::SIZE as u64;
        file.seek(SeekFrom::Start(offset))?;
        let values = io::read_array::<V, _>(file, record_len as usize)?;
        Ok(Record::Dense(DenseMatrix {
            rows: self.header.rows,
            cols: self.header.cols,
            values: V::into_values(values),
        }))
    }

    fn read_sparse<K: Element, V: Element>(
        &self,
        file: &mut File,
        index: u64,
    ) -> Result<Record, ReprError> {
        file.seek(SeekFrom::Start(self.record_offsets[index as usize]))?;
        let entries = io::read_map::<K, V, _>(file, self.record_sizes[index as usize])?;

        let mut keys = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            keys.push(key.to_index());
            values.push(value);
        }
        Ok(Record::Sparse(SparseVector {
            len: self.header.record_len(),
            keys,
            values: V::into_values(values),
        }))
    }
}

fn size_overflow() -> ReprError {
    ReprError::InvalidFormat("header sizes overflow the addressable range".into())
}
