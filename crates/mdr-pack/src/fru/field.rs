//! Length-prefixed FRU field decoding.
//!
//! A field is one length byte followed by that many text bytes. The
//! whole byte is the length; the type/language bits the IPMI standard
//! reserves at the top are not interpreted. `0xC1` is the end-of-fields
//! terminator.

use mdr_buffers::SliceReader;

use crate::error::DecodeError;

/// Length byte that terminates an area's field sequence.
pub(crate) const END_OF_FIELDS: u8 = 0xc1;

/// One decoded FRU field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A text field, possibly empty.
    Text(String),
    /// The end-of-fields terminator.
    EndOfFields,
}

impl Field {
    /// The field's text, empty for the terminator.
    pub fn text(&self) -> &str {
        match self {
            Field::Text(text) => text,
            Field::EndOfFields => "",
        }
    }
}

/// Decodes one field at the reader's position.
///
/// Reads the length byte; `0xC1` yields [`Field::EndOfFields`]
/// advancing one byte, any other value copies that many bytes as text.
/// Text is cut at the first NUL and trailing spaces are stripped;
/// non-UTF-8 bytes are replaced, never an error.
pub fn decode_field(reader: &mut SliceReader<'_>) -> Result<Field, DecodeError> {
    let length = reader.u8()?;
    if length == END_OF_FIELDS {
        return Ok(Field::EndOfFields);
    }
    let raw = reader.bytes(length as usize)?;
    let cut = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let text = String::from_utf8_lossy(&raw[..cut])
        .trim_end_matches(' ')
        .to_string();
    Ok(Field::Text(text))
}

/// An area's declared field sequence.
///
/// Yields fields in order until the terminator, after which every
/// remaining declared field decodes as empty text.
pub(crate) struct FieldSeq<'r, 'a> {
    reader: &'r mut SliceReader<'a>,
    terminated: bool,
}

impl<'r, 'a> FieldSeq<'r, 'a> {
    pub(crate) fn new(reader: &'r mut SliceReader<'a>) -> Self {
        FieldSeq {
            reader,
            terminated: false,
        }
    }

    pub(crate) fn next_text(&mut self) -> Result<String, DecodeError> {
        if self.terminated {
            return Ok(String::new());
        }
        match decode_field(self.reader)? {
            Field::Text(text) => Ok(text),
            Field::EndOfFields => {
                self.terminated = true;
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_plain_text_field() {
        let bytes = [5, b'B', b'o', b'a', b'r', b'd'];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(
            decode_field(&mut reader).unwrap(),
            Field::Text("Board".to_string())
        );
        assert_eq!(reader.pos, 6);
    }

    #[test]
    fn strips_trailing_spaces() {
        let bytes = [4, b'A', b'B', b' ', b' '];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(
            decode_field(&mut reader).unwrap(),
            Field::Text("AB".to_string())
        );
    }

    #[test]
    fn cuts_at_the_first_nul() {
        let bytes = [4, b'O', b'K', 0, b'X'];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(
            decode_field(&mut reader).unwrap(),
            Field::Text("OK".to_string())
        );
        // The cursor still advances over the whole declared length.
        assert_eq!(reader.pos, 5);
    }

    #[test]
    fn zero_length_is_an_empty_field() {
        let bytes = [0, 0xff];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(decode_field(&mut reader).unwrap(), Field::Text(String::new()));
        assert_eq!(reader.pos, 1);
    }

    #[test]
    fn terminator_advances_one_byte() {
        let bytes = [END_OF_FIELDS, 0xff];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(decode_field(&mut reader).unwrap(), Field::EndOfFields);
        assert_eq!(reader.pos, 1);
    }

    #[test]
    fn non_utf8_bytes_are_replaced() {
        let bytes = [2, 0xc3, 0x28];
        let mut reader = SliceReader::new(&bytes);
        let field = decode_field(&mut reader).unwrap();
        assert_eq!(field.text(), "\u{fffd}(");
    }

    #[test]
    fn truncated_field_is_out_of_bounds() {
        let bytes = [9, b'a', b'b'];
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(
            decode_field(&mut reader).unwrap_err(),
            DecodeError::OutOfBounds
        );
    }

    #[test]
    fn sequence_continues_over_empty_fields_and_stops_at_the_terminator() {
        let bytes = [0, 4, b'A', b'B', b'C', b'D', END_OF_FIELDS, 3, b'x', b'y', b'z'];
        let mut reader = SliceReader::new(&bytes);
        let mut seq = FieldSeq::new(&mut reader);
        assert_eq!(seq.next_text().unwrap(), "");
        assert_eq!(seq.next_text().unwrap(), "ABCD");
        assert_eq!(seq.next_text().unwrap(), "");
        assert_eq!(seq.next_text().unwrap(), "");
    }
}
