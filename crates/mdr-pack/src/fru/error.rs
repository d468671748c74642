//! FRU-specific failures.

use thiserror::Error;

use crate::error::DecodeError;

/// Failures raised while decoding a FRU EEPROM blob.
///
/// Any of these is a hard failure for the whole blob. A malformed area
/// never yields a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FruError {
    /// The common header or an area header carries a format version
    /// other than the one supported revision.
    #[error("unsupported area format version")]
    UnsupportedAreaFormat,

    /// An area offset is present in the common header but the area's
    /// length byte is zero.
    #[error("area is declared but empty")]
    AreaDefinedButEmpty,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
