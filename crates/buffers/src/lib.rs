//! Bounds-checked binary buffer utilities for mdr.
//!
//! This crate provides the byte-level reading primitives the mdr decoders
//! are built on, plus a small writer used by test suites to assemble
//! fixture blobs.
//!
//! # Overview
//!
//! - [`SliceReader`] - Reads little-endian binary data from a byte slice
//!   with cursor tracking; every read is bounds-checked and fallible
//! - [`Writer`] - Writes little-endian binary data to an auto-growing
//!   buffer
//!
//! # Example
//!
//! ```
//! use mdr_buffers::{SliceReader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16_le(0x0203);
//! writer.bytes(b"hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = SliceReader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16_le(), Ok(0x0203));
//! assert_eq!(reader.bytes(5), Ok(&b"hello"[..]));
//! ```

mod reader;
mod writer;

pub use reader::SliceReader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
