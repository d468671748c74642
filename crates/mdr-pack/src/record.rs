//! Generic scanning of sequential type-tagged records.
//!
//! ACPI subtables and DCPMEM responses share one shape: a small header
//! carrying a type tag and a length, followed by a fixed payload. The
//! [`RecordFormat`] trait captures the header layout and the advance
//! rule, [`Record`] describes one concrete payload shape, and
//! [`RecordReader`] walks a region matching shapes by tag and exact
//! size. Everything a scan needs is in the two traits' associated
//! constants, so adding a shape never touches the scan loop.

use std::fmt;
use std::marker::PhantomData;

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::region::Region;

/// Lowercase hex rendering of an opaque byte array, used by record
/// dump output for GUIDs, unique ids and wide counters.
pub(crate) fn hex_string(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        result.push_str(&format!("{:02x}", byte));
    }
    result
}

/// A record header read at a scan position.
///
/// `length` keeps the format's own semantics: the whole record span for
/// ACPI subtables, the payload size for DCPMEM responses. Scans
/// normalize it through [`RecordFormat::record_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub type_tag: u16,
    pub length: u32,
}

/// Header layout and advance rule for one record-bearing format.
pub trait RecordFormat {
    /// Encoded header size in bytes.
    const HEADER_SIZE: usize;

    /// Reads one header at the reader's position.
    fn read_header(reader: &mut SliceReader<'_>) -> Result<RecordHeader, DecodeError>;

    /// Total bytes the record spans, header included.
    fn record_span(header: &RecordHeader) -> usize;
}

/// One concrete record shape, identified by tag and exact wire size.
pub trait Record: Sized {
    /// The format whose regions carry this shape.
    type Format: RecordFormat;

    /// Tag value that identifies this shape.
    const TYPE_TAG: u16;

    /// Exact on-wire size in bytes, header included. Records with a
    /// matching tag but a different span are skipped, never coerced.
    const WIRE_SIZE: usize;

    /// Name used by dump output.
    const NAME: &'static str;

    /// Decodes the payload. The reader holds exactly the payload bytes.
    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError>;
}

/// A decoded record paired with the header it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord<T> {
    pub header: RecordHeader,
    pub data: T,
}

impl<T: Record + fmt::Display> fmt::Display for DecodedRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [Type = {} Length = {}]{}",
            T::NAME,
            self.header.type_tag,
            self.header.length,
            self.data
        )
    }
}

/// Scans sequential type-tagged records out of a borrowed blob.
pub struct RecordReader<'a, F: RecordFormat> {
    data: &'a [u8],
    _format: PhantomData<F>,
}

impl<'a, F: RecordFormat> RecordReader<'a, F> {
    pub fn new(data: &'a [u8]) -> Self {
        RecordReader {
            data,
            _format: PhantomData,
        }
    }

    /// Decodes exactly one record of shape `T` at `offset`.
    ///
    /// Fails with [`DecodeError::OutOfBounds`] when `offset` plus the
    /// shape's wire size crosses the end of the blob, and with
    /// [`DecodeError::MalformedHeader`] when the header at `offset`
    /// does not carry exactly `T`'s tag and span.
    pub fn read_one<T>(&self, offset: usize) -> Result<DecodedRecord<T>, DecodeError>
    where
        T: Record<Format = F>,
    {
        let end = offset
            .checked_add(T::WIRE_SIZE)
            .ok_or(DecodeError::OutOfBounds)?;
        if end > self.data.len() {
            return Err(DecodeError::OutOfBounds);
        }
        let mut reader = SliceReader::new(&self.data[offset..end]);
        let header = F::read_header(&mut reader)?;
        if header.type_tag != T::TYPE_TAG || F::record_span(&header) != T::WIRE_SIZE {
            return Err(DecodeError::MalformedHeader);
        }
        let data = T::decode(&mut reader)?;
        Ok(DecodedRecord { header, data })
    }

    /// Lazily scans `region` for records of shape `T`.
    ///
    /// Every call starts a fresh scan from `region.start`; the returned
    /// iterator keeps no state in the reader, so scans can be repeated
    /// or interleaved freely. Records whose tag matches but whose span
    /// differs from `T::WIRE_SIZE` are stepped over.
    pub fn read_all<T>(&self, region: Region) -> Records<'a, F, T>
    where
        T: Record<Format = F>,
    {
        Records {
            data: self.data,
            pos: region.start,
            end: region.end,
            done: false,
            _marker: PhantomData,
        }
    }
}

/// Lazy record iterator returned by [`RecordReader::read_all`].
///
/// Fuses on the first error: a header that cannot cover itself stops
/// the scan with [`DecodeError::MalformedHeader`], a span crossing the
/// region end stops it with [`DecodeError::OutOfBounds`].
pub struct Records<'a, F: RecordFormat, T: Record<Format = F>> {
    data: &'a [u8],
    pos: usize,
    end: usize,
    done: bool,
    _marker: PhantomData<(F, T)>,
}

impl<'a, F, T> Iterator for Records<'a, F, T>
where
    F: RecordFormat,
    T: Record<Format = F>,
{
    type Item = Result<DecodedRecord<T>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.end > self.data.len() || self.pos > self.end {
            self.done = true;
            return Some(Err(DecodeError::OutOfBounds));
        }
        // A full header must fit strictly inside the region; a tail of
        // exactly header size cannot start a record and is ignored.
        while self.pos + F::HEADER_SIZE < self.end {
            let mut reader = SliceReader::new(&self.data[self.pos..self.end]);
            let header = match F::read_header(&mut reader) {
                Ok(header) => header,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            let span = F::record_span(&header);
            if span <= F::HEADER_SIZE {
                self.done = true;
                return Some(Err(DecodeError::MalformedHeader));
            }
            if self.pos + span > self.end {
                self.done = true;
                return Some(Err(DecodeError::OutOfBounds));
            }
            let start = self.pos;
            self.pos += span;
            if header.type_tag == T::TYPE_TAG && span == T::WIRE_SIZE {
                let payload = &self.data[start + F::HEADER_SIZE..start + span];
                let mut reader = SliceReader::new(payload);
                return Some(match T::decode(&mut reader) {
                    Ok(data) => Ok(DecodedRecord { header, data }),
                    Err(err) => {
                        self.done = true;
                        Err(err)
                    }
                });
            }
        }
        self.done = true;
        None
    }
}
