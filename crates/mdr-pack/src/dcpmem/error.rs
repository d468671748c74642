//! DCPMEM-specific failures.

use thiserror::Error;

use crate::error::DecodeError;

/// Failures raised while decoding a DCPMEM response stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DcpmemError {
    /// The first response header declares a payload length that is not
    /// a multiple of the 64 byte transfer chunk.
    #[error("response length is not a multiple of 64")]
    UnalignedResponseLength,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
