//! DCPMEM response stream framing.

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::{RecordFormat, RecordHeader};
use crate::region::Region;

use super::error::DcpmemError;

/// Encoded size of a response header.
pub const RESPONSE_HEADER_SIZE: usize = 2;

/// The two byte header opening every firmware command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub command_type: u8,
    /// Payload bytes after the header, in 64 byte transfer chunks.
    pub length: u8,
}

/// Response framing: `u8` command tag, `u8` payload length, record
/// span `2 + length`.
pub struct ResponseFormat;

impl RecordFormat for ResponseFormat {
    const HEADER_SIZE: usize = RESPONSE_HEADER_SIZE;

    fn read_header(reader: &mut SliceReader<'_>) -> Result<RecordHeader, DecodeError> {
        let type_tag = u16::from(reader.u8()?);
        let length = u32::from(reader.u8()?);
        Ok(RecordHeader { type_tag, length })
    }

    fn record_span(header: &RecordHeader) -> usize {
        RESPONSE_HEADER_SIZE + header.length as usize
    }
}

/// Validated framing over a DCPMEM response stream.
///
/// The stream is self-describing, every record carrying its own
/// header, so the indexed region is the whole blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcpmemEntryPoint {
    first: ResponseHeader,
    region: Region,
}

impl DcpmemEntryPoint {
    /// Validates the first response header and frames the blob.
    ///
    /// Fails with [`DcpmemError::UnalignedResponseLength`] before any
    /// record scan when the declared payload length is not a multiple
    /// of the 64 byte transfer chunk.
    pub fn create(blob: &[u8]) -> Result<Self, DcpmemError> {
        if blob.len() < RESPONSE_HEADER_SIZE {
            return Err(DcpmemError::Decode(DecodeError::BufferTooSmall));
        }
        let first = ResponseHeader {
            command_type: blob[0],
            length: blob[1],
        };
        if first.length % 64 != 0 {
            return Err(DcpmemError::UnalignedResponseLength);
        }
        Ok(DcpmemEntryPoint {
            first,
            region: Region::new(0, blob.len()),
        })
    }

    /// Header of the first record in the stream.
    pub fn first_header(&self) -> ResponseHeader {
        self.first
    }

    /// The scannable region, always the whole blob.
    pub fn region(&self) -> Region {
        self.region
    }
}
