//! Error taxonomy shared by every blob format.

use mdr_buffers::BufferError;
use thiserror::Error;

/// Failures raised by entry-point validation and record scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The blob is smaller than the smallest valid header for its format.
    #[error("buffer smaller than the format's minimum header")]
    BufferTooSmall,

    /// A header was read but its fields are not usable, for example a
    /// length that cannot cover the header itself.
    #[error("malformed record header")]
    MalformedHeader,

    /// A checksummed range did not sum to zero modulo 256.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// A read or record span would cross the end of its region.
    #[error("read crosses the end of the buffer")]
    OutOfBounds,

    /// An ACPI table carried a signature outside the supported set.
    #[error("unknown table signature: {0}")]
    UnknownSignature(String),
}

impl From<BufferError> for DecodeError {
    fn from(_: BufferError) -> Self {
        DecodeError::OutOfBounds
    }
}

/// Umbrella error for callers that decode more than one blob format.
#[derive(Debug, Error)]
pub enum MdrError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("FRU error: {0}")]
    Fru(#[from] crate::fru::FruError),

    #[error("DCPMEM error: {0}")]
    Dcpmem(#[from] crate::dcpmem::DcpmemError),
}
