//! ACPI parser facade: owned blob, entry point, named accessors.

use std::fmt;

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::{DecodedRecord, Record, RecordFormat, RecordReader};
use crate::region::Region;

use super::entry_point::AcpiEntryPoint;
use super::nfit::{
    BlockDataWindow, ControlRegion, PlatformCapabilities, RegionMapping, SpaRange,
};
use super::pcat::{PlatformCapabilityInfo, SocketSkuInfo};
use super::subtable::SubtableFormat;

/// Decoder over a private copy of an ACPI table-of-tables blob.
///
/// Construction validates the outer framing; the named accessors then
/// scan the indexed regions per shape. An accessor whose table is not
/// in the blob returns an empty collection, never an error.
pub struct AcpiParser {
    blob: Vec<u8>,
    entry_point: AcpiEntryPoint,
}

impl AcpiParser {
    /// Copies `bytes` and validates the table-of-tables framing.
    pub fn new(bytes: &[u8]) -> Result<Self, DecodeError> {
        let blob = bytes.to_vec();
        let entry_point = AcpiEntryPoint::create(&blob)?;
        Ok(AcpiParser { blob, entry_point })
    }

    /// The validated framing and region index.
    pub fn entry_point(&self) -> &AcpiEntryPoint {
        &self.entry_point
    }

    /// Record reader over the owned blob.
    pub fn reader(&self) -> RecordReader<'_, SubtableFormat> {
        RecordReader::new(&self.blob)
    }

    fn collect<T>(&self, signature: &str) -> Result<Vec<DecodedRecord<T>>, DecodeError>
    where
        T: Record<Format = SubtableFormat>,
    {
        match self.entry_point.region(signature) {
            Some(region) => self.reader().read_all::<T>(region).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// NFIT SPA range structures, in table order.
    pub fn spa_ranges(&self) -> Result<Vec<DecodedRecord<SpaRange>>, DecodeError> {
        self.collect("NFIT")
    }

    /// NFIT NVDIMM region mapping structures.
    pub fn region_mappings(&self) -> Result<Vec<DecodedRecord<RegionMapping>>, DecodeError> {
        self.collect("NFIT")
    }

    /// NFIT NVDIMM control region structures, 32 byte short form only.
    pub fn control_regions(&self) -> Result<Vec<DecodedRecord<ControlRegion>>, DecodeError> {
        self.collect("NFIT")
    }

    /// NFIT NVDIMM block data window structures.
    pub fn block_data_windows(&self) -> Result<Vec<DecodedRecord<BlockDataWindow>>, DecodeError> {
        self.collect("NFIT")
    }

    /// NFIT platform capabilities structures.
    pub fn platform_capabilities(
        &self,
    ) -> Result<Vec<DecodedRecord<PlatformCapabilities>>, DecodeError> {
        self.collect("NFIT")
    }

    /// PCAT platform capability information structures.
    pub fn platform_capability_info(
        &self,
    ) -> Result<Vec<DecodedRecord<PlatformCapabilityInfo>>, DecodeError> {
        self.collect("PCAT")
    }

    /// PCAT socket SKU information structures.
    pub fn socket_sku_info(&self) -> Result<Vec<DecodedRecord<SocketSkuInfo>>, DecodeError> {
        self.collect("PCAT")
    }

    fn fmt_record<T>(&self, offset: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: Record<Format = SubtableFormat> + fmt::Display,
    {
        if let Ok(rec) = self.reader().read_one::<T>(offset) {
            writeln!(f, "{}", rec)?;
        }
        Ok(())
    }

    fn fmt_nfit(&self, region: Region, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pos = region.start;
        while pos + SubtableFormat::HEADER_SIZE < region.end {
            let mut reader = SliceReader::new(&self.blob[pos..region.end]);
            let header = match SubtableFormat::read_header(&mut reader) {
                Ok(header) => header,
                Err(_) => break,
            };
            let span = SubtableFormat::record_span(&header);
            if span <= SubtableFormat::HEADER_SIZE || pos + span > region.end {
                break;
            }
            if header.type_tag == SpaRange::TYPE_TAG && span == SpaRange::WIRE_SIZE {
                self.fmt_record::<SpaRange>(pos, f)?;
            } else if header.type_tag == RegionMapping::TYPE_TAG && span == RegionMapping::WIRE_SIZE
            {
                self.fmt_record::<RegionMapping>(pos, f)?;
            } else if header.type_tag == ControlRegion::TYPE_TAG && span == ControlRegion::WIRE_SIZE
            {
                self.fmt_record::<ControlRegion>(pos, f)?;
            } else if header.type_tag == BlockDataWindow::TYPE_TAG
                && span == BlockDataWindow::WIRE_SIZE
            {
                self.fmt_record::<BlockDataWindow>(pos, f)?;
            } else if header.type_tag == PlatformCapabilities::TYPE_TAG
                && span == PlatformCapabilities::WIRE_SIZE
            {
                self.fmt_record::<PlatformCapabilities>(pos, f)?;
            } else {
                writeln!(
                    f,
                    "Unsupported ACPI NFIT Subtable [Type = {} Length = {}]",
                    header.type_tag, header.length
                )?;
            }
            pos += span;
        }
        Ok(())
    }

    fn fmt_pcat(&self, region: Region, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pos = region.start;
        while pos + SubtableFormat::HEADER_SIZE < region.end {
            let mut reader = SliceReader::new(&self.blob[pos..region.end]);
            let header = match SubtableFormat::read_header(&mut reader) {
                Ok(header) => header,
                Err(_) => break,
            };
            let span = SubtableFormat::record_span(&header);
            if span <= SubtableFormat::HEADER_SIZE || pos + span > region.end {
                break;
            }
            if header.type_tag == PlatformCapabilityInfo::TYPE_TAG
                && span == PlatformCapabilityInfo::WIRE_SIZE
            {
                self.fmt_record::<PlatformCapabilityInfo>(pos, f)?;
            } else if header.type_tag == SocketSkuInfo::TYPE_TAG && span == SocketSkuInfo::WIRE_SIZE
            {
                self.fmt_record::<SocketSkuInfo>(pos, f)?;
            } else {
                writeln!(
                    f,
                    "Unsupported ACPI PCAT Subtable [Type = {} Length = {}]",
                    header.type_tag, header.length
                )?;
            }
            pos += span;
        }
        Ok(())
    }
}

impl fmt::Display for AcpiParser {
    /// Prints every table's records in blob order; tables without
    /// decodable record shapes print a single summary line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in self.entry_point.tables() {
            match &table.header.signature {
                b"NFIT" => self.fmt_nfit(table.region, f)?,
                b"PCAT" => self.fmt_pcat(table.region, f)?,
                _ => writeln!(
                    f,
                    "Unsupported ACPI Table [Signature = {} Length = {}]",
                    table.header.signature_str(),
                    table.header.length
                )?,
            }
        }
        Ok(())
    }
}
