//! DCPMEM parser facade: owned blob, entry point, named accessors.

use std::fmt;

use mdr_buffers::SliceReader;

use crate::record::{DecodedRecord, Record, RecordFormat, RecordReader};

use super::commands::{
    IdentifyDimm, MemoryInfo, PartitionInfo, PowerManagementPolicy, SecurityState,
    SmartHealthInfo,
};
use super::entry_point::{DcpmemEntryPoint, ResponseFormat};
use super::error::DcpmemError;

/// Decoder over a private copy of a DCPMEM response stream.
#[derive(Debug)]
pub struct DcpmemParser {
    blob: Vec<u8>,
    entry_point: DcpmemEntryPoint,
}

impl DcpmemParser {
    /// Copies `bytes` and validates the stream framing.
    pub fn new(bytes: &[u8]) -> Result<Self, DcpmemError> {
        let blob = bytes.to_vec();
        let entry_point = DcpmemEntryPoint::create(&blob)?;
        Ok(DcpmemParser { blob, entry_point })
    }

    /// The validated framing.
    pub fn entry_point(&self) -> &DcpmemEntryPoint {
        &self.entry_point
    }

    /// Record reader over the owned blob.
    pub fn reader(&self) -> RecordReader<'_, ResponseFormat> {
        RecordReader::new(&self.blob)
    }

    fn collect<T>(&self) -> Result<Vec<DecodedRecord<T>>, DcpmemError>
    where
        T: Record<Format = ResponseFormat>,
    {
        self.reader()
            .read_all::<T>(self.entry_point.region())
            .collect::<Result<_, _>>()
            .map_err(DcpmemError::from)
    }

    /// Identify DIMM responses in the stream.
    pub fn identify_dimm(&self) -> Result<Vec<DecodedRecord<IdentifyDimm>>, DcpmemError> {
        self.collect()
    }

    /// Security state responses.
    pub fn security_state(&self) -> Result<Vec<DecodedRecord<SecurityState>>, DcpmemError> {
        self.collect()
    }

    /// Power management policy responses.
    pub fn power_management_policy(
        &self,
    ) -> Result<Vec<DecodedRecord<PowerManagementPolicy>>, DcpmemError> {
        self.collect()
    }

    /// DIMM partition info responses.
    pub fn partition_info(&self) -> Result<Vec<DecodedRecord<PartitionInfo>>, DcpmemError> {
        self.collect()
    }

    /// SMART and health info responses.
    pub fn smart_health_info(&self) -> Result<Vec<DecodedRecord<SmartHealthInfo>>, DcpmemError> {
        self.collect()
    }

    /// Memory info responses.
    pub fn memory_info(&self) -> Result<Vec<DecodedRecord<MemoryInfo>>, DcpmemError> {
        self.collect()
    }

    fn fmt_record<T>(&self, offset: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: Record<Format = ResponseFormat> + fmt::Display,
    {
        if let Ok(rec) = self.reader().read_one::<T>(offset) {
            writeln!(f, "{}", rec)?;
        }
        Ok(())
    }
}

impl fmt::Display for DcpmemParser {
    /// Prints every known response in stream order; responses with a
    /// tag outside the catalog are stepped over silently.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = self.entry_point.region();
        let mut pos = region.start;
        while pos + ResponseFormat::HEADER_SIZE < region.end {
            let mut reader = SliceReader::new(&self.blob[pos..region.end]);
            let header = match ResponseFormat::read_header(&mut reader) {
                Ok(header) => header,
                Err(_) => break,
            };
            let span = ResponseFormat::record_span(&header);
            if span <= ResponseFormat::HEADER_SIZE || pos + span > region.end {
                break;
            }
            if header.type_tag == IdentifyDimm::TYPE_TAG && span == IdentifyDimm::WIRE_SIZE {
                self.fmt_record::<IdentifyDimm>(pos, f)?;
            } else if header.type_tag == SecurityState::TYPE_TAG && span == SecurityState::WIRE_SIZE
            {
                self.fmt_record::<SecurityState>(pos, f)?;
            } else if header.type_tag == PowerManagementPolicy::TYPE_TAG
                && span == PowerManagementPolicy::WIRE_SIZE
            {
                self.fmt_record::<PowerManagementPolicy>(pos, f)?;
            } else if header.type_tag == PartitionInfo::TYPE_TAG && span == PartitionInfo::WIRE_SIZE
            {
                self.fmt_record::<PartitionInfo>(pos, f)?;
            } else if header.type_tag == SmartHealthInfo::TYPE_TAG
                && span == SmartHealthInfo::WIRE_SIZE
            {
                self.fmt_record::<SmartHealthInfo>(pos, f)?;
            } else if header.type_tag == MemoryInfo::TYPE_TAG && span == MemoryInfo::WIRE_SIZE {
                self.fmt_record::<MemoryInfo>(pos, f)?;
            }
            pos += span;
        }
        Ok(())
    }
}
