//! NFIT and PCAT subtable framing.

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::{RecordFormat, RecordHeader};

/// Subtable header: `u16` type tag and `u16` length, where the length
/// covers the whole subtable including these four bytes.
pub struct SubtableFormat;

impl RecordFormat for SubtableFormat {
    const HEADER_SIZE: usize = 4;

    fn read_header(reader: &mut SliceReader<'_>) -> Result<RecordHeader, DecodeError> {
        let type_tag = reader.u16_le()?;
        let length = u32::from(reader.u16_le()?);
        Ok(RecordHeader { type_tag, length })
    }

    fn record_span(header: &RecordHeader) -> usize {
        header.length as usize
    }
}
