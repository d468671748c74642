//! Zero-sum checksum arithmetic.
//!
//! Firmware tables close a checksummed range with a byte chosen so that
//! the whole range, that byte included, sums to zero modulo 256.

use crate::error::DecodeError;

/// Sums `bytes` with wrapping arithmetic.
pub fn sum8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Verifies that `bytes` sums to zero modulo 256.
pub fn verify_zero_sum(bytes: &[u8]) -> Result<(), DecodeError> {
    if sum8(bytes) != 0 {
        return Err(DecodeError::ChecksumMismatch);
    }
    Ok(())
}

/// Returns the byte that closes `bytes` so the range sums to zero.
pub fn complement(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(sum8(bytes))
}
