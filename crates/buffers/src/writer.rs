//! Binary writer over an auto-growing buffer.

/// A binary writer that appends little-endian data to a growable buffer.
///
/// Used by test suites to assemble fixture blobs; the decode path never
/// writes.
///
/// # Example
///
/// ```
/// use mdr_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u32_le(0xcafe);
/// assert_eq!(writer.flush(), vec![0x01, 0xfe, 0xca, 0x00, 0x00]);
/// ```
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new, empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes an unsigned 8-bit integer.
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    pub fn u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    pub fn u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    pub fn u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Appends raw bytes.
    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends `len` copies of `byte`.
    pub fn fill(&mut self, byte: u8, len: usize) {
        self.buf.resize(self.buf.len() + len, byte);
    }

    /// Returns the written bytes and resets the writer for reuse.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
