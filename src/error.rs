use thiserror::Error;

/// Errors surfaced by header parsing and record reads.
///
/// Every variant is raised synchronously from the call that detected it;
/// nothing is retried internally. A failed [`read_matrix`] leaves the reader
/// usable for subsequent calls.
///
/// [`read_matrix`]: crate::ReprReader::read_matrix
#[derive(Debug, Error)]
pub enum ReprError {
    /// The file is not a valid mm-repr file: bad signature, an element-type
    /// tag outside the supported set, or internally inconsistent sizes.
    #[error("not a valid mm-repr file: {0}")]
    InvalidFormat(String),

    /// The file ends before an expected field, array, or map was fully read.
    #[error("mm-repr file is truncated")]
    TruncatedData,

    /// A record index at or past `header.count` was requested.
    #[error("record index {index} out of range (file holds {count} records)")]
    IndexOutOfRange { index: u64, count: u64 },

    /// An underlying open/seek/read failure unrelated to file content.
    /// End-of-file hit while decoding content is reported as
    /// [`TruncatedData`](Self::TruncatedData), not as this variant.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
