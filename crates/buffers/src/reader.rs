//! Bounds-checked binary reader with cursor tracking.

use crate::BufferError;

/// A binary reader that decodes little-endian data from a byte slice.
///
/// The reader maintains a cursor position; every read validates that the
/// requested bytes exist and returns [`BufferError::EndOfBuffer`] when
/// they do not. The cursor is only advanced on success.
///
/// # Example
///
/// ```
/// use mdr_buffers::SliceReader;
///
/// let data = [0x01, 0x34, 0x12];
/// let mut reader = SliceReader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u16_le(), Ok(0x1234));
/// assert!(reader.u8().is_err());
/// ```
pub struct SliceReader<'a> {
    /// The underlying byte slice.
    pub data: &'a [u8],
    /// Current cursor position.
    pub pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Advances the cursor by `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> Result<(), BufferError> {
        let end = self.pos.checked_add(len).ok_or(BufferError::EndOfBuffer)?;
        if end > self.data.len() {
            return Err(BufferError::EndOfBuffer);
        }
        self.pos = end;
        Ok(())
    }

    /// Reads `len` bytes and advances the cursor.
    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8], BufferError> {
        let end = self.pos.checked_add(len).ok_or(BufferError::EndOfBuffer)?;
        let out = self
            .data
            .get(self.pos..end)
            .ok_or(BufferError::EndOfBuffer)?;
        self.pos = end;
        Ok(out)
    }

    /// Reads a fixed-size byte array and advances the cursor.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let bytes = self.bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        let val = *self.data.get(self.pos).ok_or(BufferError::EndOfBuffer)?;
        self.pos += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self) -> Result<u16, BufferError> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    /// Reads a 24-bit unsigned integer (little-endian), widened to `u32`.
    #[inline]
    pub fn u24_le(&mut self) -> Result<u32, BufferError> {
        let b = self.array::<3>()?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
    }
}
