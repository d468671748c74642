//! ACPI table-of-tables entry point.

use mdr_buffers::SliceReader;

use crate::checksum::verify_zero_sum;
use crate::error::DecodeError;
use crate::region::{Region, RegionIndex};

/// Encoded size of the header every ACPI table starts with.
pub const ACPI_HEADER_SIZE: usize = 40;

/// Table signatures the entry point accepts.
pub const SUPPORTED_SIGNATURES: [&str; 5] = ["NFIT", "PCAT", "SRAT", "HMAT", "PMTT"];

/// The forty byte header opening every ACPI table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcpiTableHeader {
    pub signature: [u8; 4],
    /// Whole table size in bytes, this header included.
    pub length: u32,
    pub revision: u8,
    pub checksum: u8,
    pub oem_id: [u8; 6],
    pub oem_table_id: [u8; 8],
    pub oem_revision: u32,
    pub creator_id: u32,
    pub creator_revision: u32,
}

impl AcpiTableHeader {
    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let signature = reader.array::<4>()?;
        let length = reader.u32_le()?;
        let revision = reader.u8()?;
        let checksum = reader.u8()?;
        let oem_id = reader.array::<6>()?;
        let oem_table_id = reader.array::<8>()?;
        let oem_revision = reader.u32_le()?;
        let creator_id = reader.u32_le()?;
        let creator_revision = reader.u32_le()?;
        // Four reserved bytes close the header.
        reader.skip(4)?;
        Ok(AcpiTableHeader {
            signature,
            length,
            revision,
            checksum,
            oem_id,
            oem_table_id,
            oem_revision,
            creator_id,
            creator_revision,
        })
    }

    /// Signature rendered as text; non-ASCII bytes are replaced.
    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature).into_owned()
    }
}

/// One validated table: its header and the payload range after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcpiTable {
    pub header: AcpiTableHeader,
    pub region: Region,
}

/// Validated table-of-tables framing over an ACPI blob.
#[derive(Debug, Clone)]
pub struct AcpiEntryPoint {
    tables: Vec<AcpiTable>,
    regions: RegionIndex,
}

impl AcpiEntryPoint {
    /// Walks the blob table by table and indexes every payload range.
    ///
    /// Each table must declare a length that covers at least its own
    /// header and fits the remaining bytes, sum to zero over exactly
    /// that length, and carry a signature from
    /// [`SUPPORTED_SIGNATURES`]. A repeated signature keeps the later
    /// table's range.
    pub fn create(blob: &[u8]) -> Result<Self, DecodeError> {
        if blob.len() < ACPI_HEADER_SIZE {
            return Err(DecodeError::BufferTooSmall);
        }
        let mut tables = Vec::new();
        let mut regions = RegionIndex::new();
        let mut offset = 0usize;
        while offset < blob.len() {
            if blob.len() - offset < ACPI_HEADER_SIZE {
                return Err(DecodeError::OutOfBounds);
            }
            let mut reader = SliceReader::new(&blob[offset..]);
            let header = AcpiTableHeader::decode(&mut reader)?;
            let length = header.length as usize;
            if length < ACPI_HEADER_SIZE {
                return Err(DecodeError::MalformedHeader);
            }
            if length > blob.len() - offset {
                return Err(DecodeError::OutOfBounds);
            }
            verify_zero_sum(&blob[offset..offset + length])?;
            let signature = header.signature_str();
            if !SUPPORTED_SIGNATURES.contains(&signature.as_str()) {
                return Err(DecodeError::UnknownSignature(signature));
            }
            let region = Region::new(offset + ACPI_HEADER_SIZE, offset + length);
            regions.insert(&signature, region);
            tables.push(AcpiTable { header, region });
            offset += length;
        }
        Ok(AcpiEntryPoint { tables, regions })
    }

    /// Offset where the named table's payload begins.
    pub fn table_data_offset(&self, signature: &str) -> Option<usize> {
        self.regions.get(signature).map(|region| region.start)
    }

    /// Offset one past the named table's payload.
    pub fn table_data_end_offset(&self, signature: &str) -> Option<usize> {
        self.regions.get(signature).map(|region| region.end)
    }

    /// Payload region for the named table.
    pub fn region(&self, signature: &str) -> Option<Region> {
        self.regions.get(signature)
    }

    /// Per-signature region index, in blob order.
    pub fn regions(&self) -> &RegionIndex {
        &self.regions
    }

    /// Every validated table in blob order, duplicates included.
    pub fn tables(&self) -> &[AcpiTable] {
        &self.tables
    }
}
