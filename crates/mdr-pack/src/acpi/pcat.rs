//! PCAT subtable record shapes.

use std::fmt;

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::Record;

use super::subtable::SubtableFormat;

/// Platform capability information structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilityInfo {
    pub management_sw_config_input_support: u8,
    pub memory_mode_capabilities: u8,
    pub current_memory_mode: u8,
    pub persistent_memory_ras_capability: u8,
}

impl Record for PlatformCapabilityInfo {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 0;
    const WIRE_SIZE: usize = 16;
    const NAME: &'static str = "PCAT Platform Capability Information Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let management_sw_config_input_support = reader.u8()?;
        let memory_mode_capabilities = reader.u8()?;
        let current_memory_mode = reader.u8()?;
        let persistent_memory_ras_capability = reader.u8()?;
        reader.skip(8)?;
        Ok(PlatformCapabilityInfo {
            management_sw_config_input_support,
            memory_mode_capabilities,
            current_memory_mode,
            persistent_memory_ras_capability,
        })
    }
}

impl fmt::Display for PlatformCapabilityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tIntel NVDIMM Management SW Config Input Support : {:08b}",
            self.management_sw_config_input_support
        )?;
        write!(
            f,
            "\n\tMemory Mode Capabilities : {:08b}",
            self.memory_mode_capabilities
        )?;
        write!(
            f,
            "\n\tCurrent Memory Mode : {:08b}",
            self.current_memory_mode
        )?;
        write!(
            f,
            "\n\tPersistent Memory RAS Capability : {:08b}",
            self.persistent_memory_ras_capability
        )
    }
}

/// Socket SKU information structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketSkuInfo {
    pub socket_id: u16,
    pub mapped_memory_size_limit: u64,
    pub total_memory_size_mapped: u64,
    pub memory_size_excluded_in_2lm: u64,
}

impl Record for SocketSkuInfo {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 6;
    const WIRE_SIZE: usize = 32;
    const NAME: &'static str = "PCAT Socket SKU Information Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let socket_id = reader.u16_le()?;
        reader.skip(2)?;
        let mapped_memory_size_limit = reader.u64_le()?;
        let total_memory_size_mapped = reader.u64_le()?;
        let memory_size_excluded_in_2lm = reader.u64_le()?;
        Ok(SocketSkuInfo {
            socket_id,
            mapped_memory_size_limit,
            total_memory_size_mapped,
            memory_size_excluded_in_2lm,
        })
    }
}

impl fmt::Display for SocketSkuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tSocket ID : {}", self.socket_id)?;
        write!(
            f,
            "\n\tMapped Memory Size Limit : {}",
            self.mapped_memory_size_limit
        )?;
        write!(
            f,
            "\n\tTotal Memory Size Mapped Into SPA : {}",
            self.total_memory_size_mapped
        )?;
        write!(
            f,
            "\n\tMemory Size Excluded In Limit Calculations When In 2LM Mode : {}",
            self.memory_size_excluded_in_2lm
        )
    }
}
