//! NFIT subtable record shapes.
//!
//! Layouts follow the ACPI 6.x NVDIMM Firmware Interface Table
//! structures. The control region is bound to its 32 byte short form,
//! so 80 byte control regions fall to the exact-size skip rule.

use std::fmt;

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::{hex_string, Record};

use super::subtable::SubtableFormat;

/// System physical address range structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaRange {
    pub index: u16,
    pub flags: u16,
    pub proximity_domain: u32,
    pub address_range_type_guid: [u8; 16],
    pub range_base: u64,
    pub range_length: u64,
    pub mapping_attribute: u64,
}

impl Record for SpaRange {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 0;
    const WIRE_SIZE: usize = 56;
    const NAME: &'static str = "NFIT SPA Range Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let index = reader.u16_le()?;
        let flags = reader.u16_le()?;
        reader.skip(4)?;
        let proximity_domain = reader.u32_le()?;
        let address_range_type_guid = reader.array::<16>()?;
        let range_base = reader.u64_le()?;
        let range_length = reader.u64_le()?;
        let mapping_attribute = reader.u64_le()?;
        Ok(SpaRange {
            index,
            flags,
            proximity_domain,
            address_range_type_guid,
            range_base,
            range_length,
            mapping_attribute,
        })
    }
}

impl fmt::Display for SpaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tSPA Range Structure Index : {}", self.index)?;
        write!(f, "\n\tFlags : {:016b}", self.flags)?;
        write!(f, "\n\tProximity Domain : {:08x}", self.proximity_domain)?;
        write!(
            f,
            "\n\tAddress Range Type GUID : {}",
            hex_string(&self.address_range_type_guid)
        )?;
        write!(
            f,
            "\n\tSystem Physical Address Range Base : {:016x}",
            self.range_base
        )?;
        write!(
            f,
            "\n\tSystem Physical Address Range Length : {:016x}",
            self.range_length
        )?;
        write!(
            f,
            "\n\tAddress Range Memory Mapping Attribute : {:016x}",
            self.mapping_attribute
        )
    }
}

/// NVDIMM region mapping structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionMapping {
    pub device_handle: u32,
    pub physical_id: u16,
    pub region_id: u16,
    pub spa_range_index: u16,
    pub control_region_index: u16,
    pub region_size: u64,
    pub region_offset: u64,
    pub physical_address_region_base: u64,
    pub interleave_index: u16,
    pub interleave_ways: u16,
    pub state_flags: u16,
}

impl Record for RegionMapping {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 1;
    const WIRE_SIZE: usize = 48;
    const NAME: &'static str = "NFIT NVDIMM Region Mapping Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let device_handle = reader.u32_le()?;
        let physical_id = reader.u16_le()?;
        let region_id = reader.u16_le()?;
        let spa_range_index = reader.u16_le()?;
        let control_region_index = reader.u16_le()?;
        let region_size = reader.u64_le()?;
        let region_offset = reader.u64_le()?;
        let physical_address_region_base = reader.u64_le()?;
        let interleave_index = reader.u16_le()?;
        let interleave_ways = reader.u16_le()?;
        let state_flags = reader.u16_le()?;
        reader.skip(2)?;
        Ok(RegionMapping {
            device_handle,
            physical_id,
            region_id,
            spa_range_index,
            control_region_index,
            region_size,
            region_offset,
            physical_address_region_base,
            interleave_index,
            interleave_ways,
            state_flags,
        })
    }
}

impl fmt::Display for RegionMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tNFIT Device Handle : {:08x}", self.device_handle)?;
        write!(f, "\n\tNVDIMM Physical ID : {}", self.physical_id)?;
        write!(f, "\n\tNVDIMM Region ID : {}", self.region_id)?;
        write!(f, "\n\tSPA Range Structure Index : {}", self.spa_range_index)?;
        write!(
            f,
            "\n\tNVDIMM Control Region Structure Index : {}",
            self.control_region_index
        )?;
        write!(f, "\n\tNVDIMM Region Size : {:016x}", self.region_size)?;
        write!(f, "\n\tRegion Offset: {:016x}", self.region_offset)?;
        write!(
            f,
            "\n\tNVDIMM Physical Address Region Base : {:016x}",
            self.physical_address_region_base
        )?;
        write!(
            f,
            "\n\tInterleave Structure Index : {}",
            self.interleave_index
        )?;
        write!(f, "\n\tInterleave Ways : {:04x}", self.interleave_ways)?;
        write!(f, "\n\tNVDIMM State Flags : {:016b}", self.state_flags)
    }
}

/// NVDIMM control region structure, 32 byte short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRegion {
    pub index: u16,
    pub vendor_id: u16,
    pub device_id: u16,
    pub revision_id: u16,
    pub subsystem_vendor_id: u16,
    pub subsystem_device_id: u16,
    pub subsystem_revision_id: u16,
    pub valid_fields: u8,
    pub manufacturing_location: u8,
    pub manufacturing_date: u16,
    pub serial_number: u32,
    pub region_format_interface_code: u16,
    pub block_control_window_count: u16,
}

impl Record for ControlRegion {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 4;
    const WIRE_SIZE: usize = 32;
    const NAME: &'static str = "NFIT NVDIMM Control Region Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let index = reader.u16_le()?;
        let vendor_id = reader.u16_le()?;
        let device_id = reader.u16_le()?;
        let revision_id = reader.u16_le()?;
        let subsystem_vendor_id = reader.u16_le()?;
        let subsystem_device_id = reader.u16_le()?;
        let subsystem_revision_id = reader.u16_le()?;
        let valid_fields = reader.u8()?;
        let manufacturing_location = reader.u8()?;
        let manufacturing_date = reader.u16_le()?;
        reader.skip(2)?;
        let serial_number = reader.u32_le()?;
        let region_format_interface_code = reader.u16_le()?;
        let block_control_window_count = reader.u16_le()?;
        Ok(ControlRegion {
            index,
            vendor_id,
            device_id,
            revision_id,
            subsystem_vendor_id,
            subsystem_device_id,
            subsystem_revision_id,
            valid_fields,
            manufacturing_location,
            manufacturing_date,
            serial_number,
            region_format_interface_code,
            block_control_window_count,
        })
    }
}

impl fmt::Display for ControlRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tNVDIMM Control Region Structure Index : {}",
            self.index
        )?;
        write!(f, "\n\tVendor ID : {:04x}", self.vendor_id)?;
        write!(f, "\n\tDevice ID : {:04x}", self.device_id)?;
        write!(f, "\n\tRevision ID : {:04x}", self.revision_id)?;
        write!(f, "\n\tSubsystem Vendor ID : {:04x}", self.subsystem_vendor_id)?;
        write!(f, "\n\tSubsystem Device ID : {:04x}", self.subsystem_device_id)?;
        write!(
            f,
            "\n\tSubsystem Revision ID : {:04x}",
            self.subsystem_revision_id
        )?;
        write!(f, "\n\tValid Fields : {:08b}", self.valid_fields)?;
        write!(
            f,
            "\n\tManufacturing Location : {:02x}",
            self.manufacturing_location
        )?;
        write!(f, "\n\tManufacturing Date : {:04x}", self.manufacturing_date)?;
        write!(f, "\n\tSerial Number : {:04x}", self.serial_number)?;
        write!(
            f,
            "\n\tRegion Format Interface Code : {:04x}",
            self.region_format_interface_code
        )?;
        write!(
            f,
            "\n\tNumber Of Block Control Windows : {}",
            self.block_control_window_count
        )
    }
}

/// NVDIMM block data window region structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDataWindow {
    pub control_region_index: u16,
    pub window_count: u16,
    pub window_start_offset: u64,
    pub window_size: u64,
    pub accessible_capacity: u64,
    pub first_block_address: u64,
}

impl Record for BlockDataWindow {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 5;
    const WIRE_SIZE: usize = 40;
    const NAME: &'static str = "NFIT NVDIMM Block Data Window Region Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let control_region_index = reader.u16_le()?;
        let window_count = reader.u16_le()?;
        let window_start_offset = reader.u64_le()?;
        let window_size = reader.u64_le()?;
        let accessible_capacity = reader.u64_le()?;
        let first_block_address = reader.u64_le()?;
        Ok(BlockDataWindow {
            control_region_index,
            window_count,
            window_start_offset,
            window_size,
            accessible_capacity,
            first_block_address,
        })
    }
}

impl fmt::Display for BlockDataWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tNVDIMM Control Region Structure Index : {}",
            self.control_region_index
        )?;
        write!(
            f,
            "\n\tNumber Of Block Data Windows : {}",
            self.window_count
        )?;
        write!(
            f,
            "\n\tBlock Data Window Start Offset : {:016x}",
            self.window_start_offset
        )?;
        write!(
            f,
            "\n\tSize Of Block Data Window : {:016x}",
            self.window_size
        )?;
        write!(
            f,
            "\n\tBlock Accessible Memory Capacity : {:016x}",
            self.accessible_capacity
        )?;
        write!(
            f,
            "\n\tBeginning Address Of First Block In Block Accessible Memory : {:016x}",
            self.first_block_address
        )
    }
}

/// NFIT platform capabilities structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    pub highest_valid_capability: u8,
    pub capabilities: u32,
}

impl Record for PlatformCapabilities {
    type Format = SubtableFormat;
    const TYPE_TAG: u16 = 7;
    const WIRE_SIZE: usize = 16;
    const NAME: &'static str = "NFIT Platform Capabilities Structure";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let highest_valid_capability = reader.u8()?;
        reader.skip(3)?;
        let capabilities = reader.u32_le()?;
        reader.skip(4)?;
        Ok(PlatformCapabilities {
            highest_valid_capability,
            capabilities,
        })
    }
}

impl fmt::Display for PlatformCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tHighest Valid Capability : {}",
            self.highest_valid_capability
        )?;
        write!(f, "\n\tCapabilities : {:032b}", self.capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DecodedRecord, RecordHeader, RecordReader};
    use crate::region::Region;
    use mdr_buffers::Writer;

    fn spa_range_bytes() -> Vec<u8> {
        let mut w = Writer::new();
        w.u16_le(0);
        w.u16_le(56);
        w.u16_le(1);
        w.u16_le(0b1000_0000_0000_0001);
        w.u32_le(0);
        w.u32_le(2);
        w.bytes(&[0x66, 0xf0, 0xd3, 0x79, 0xb4, 0xf3, 0x40, 0x74, 0xac, 0x43, 0x0d, 0x33, 0x18, 0xb7, 0x8c, 0xdb]);
        w.u64_le(0x0000_0021_4000_0000);
        w.u64_le(0x0000_0000_8000_0000);
        w.u64_le(0x8008);
        w.flush()
    }

    #[test]
    fn spa_range_decodes_field_by_field() {
        let blob = spa_range_bytes();
        let reader = RecordReader::<SubtableFormat>::new(&blob);
        let rec: DecodedRecord<SpaRange> = reader.read_one(0).unwrap();
        assert_eq!(rec.header, RecordHeader { type_tag: 0, length: 56 });
        assert_eq!(rec.data.index, 1);
        assert_eq!(rec.data.flags, 0b1000_0000_0000_0001);
        assert_eq!(rec.data.proximity_domain, 2);
        assert_eq!(rec.data.range_base, 0x0000_0021_4000_0000);
        assert_eq!(rec.data.range_length, 0x0000_0000_8000_0000);
        assert_eq!(rec.data.mapping_attribute, 0x8008);
    }

    #[test]
    fn spa_range_display_matches_the_dump_layout() {
        let blob = spa_range_bytes();
        let reader = RecordReader::<SubtableFormat>::new(&blob);
        let rec: DecodedRecord<SpaRange> = reader.read_one(0).unwrap();
        let text = format!("{}", rec);
        assert!(text.starts_with("NFIT SPA Range Structure [Type = 0 Length = 56]"));
        assert!(text.contains("\n\tSPA Range Structure Index : 1"));
        assert!(text.contains("\n\tFlags : 1000000000000001"));
        assert!(text.contains("\n\tAddress Range Type GUID : 66f0d379b4f34074ac430d3318b78cdb"));
        assert!(text.contains("\n\tSystem Physical Address Range Base : 0000002140000000"));
    }

    #[test]
    fn control_region_is_bound_to_the_short_form() {
        // An 80 byte control region must be skipped, not truncated.
        let mut w = Writer::new();
        w.u16_le(4);
        w.u16_le(80);
        w.fill(0, 76);
        let blob = w.flush();
        let reader = RecordReader::<SubtableFormat>::new(&blob);
        let records: Vec<_> = reader
            .read_all::<ControlRegion>(Region::new(0, blob.len()))
            .collect();
        assert!(records.is_empty());
    }

    #[test]
    fn control_region_decode_and_display() {
        let mut w = Writer::new();
        w.u16_le(4);
        w.u16_le(32);
        w.u16_le(1);
        w.u16_le(0x8980);
        w.u16_le(0x5141);
        w.u16_le(0x0002);
        w.u16_le(0x8980);
        w.u16_le(0x0a94);
        w.u16_le(0x0001);
        w.u8(0x01);
        w.u8(0x02);
        w.u16_le(0x1947);
        w.fill(0, 2);
        w.u32_le(0x12ab_34cd);
        w.u16_le(0x0301);
        w.u16_le(0);
        let blob = w.flush();
        let reader = RecordReader::<SubtableFormat>::new(&blob);
        let rec: DecodedRecord<ControlRegion> = reader.read_one(0).unwrap();
        assert_eq!(rec.data.vendor_id, 0x8980);
        assert_eq!(rec.data.serial_number, 0x12ab_34cd);
        let text = format!("{}", rec);
        assert!(text.starts_with("NFIT NVDIMM Control Region Structure [Type = 4 Length = 32]"));
        assert!(text.contains("\n\tVendor ID : 8980"));
        assert!(text.contains("\n\tValid Fields : 00000001"));
        assert!(text.contains("\n\tManufacturing Location : 02"));
        assert!(text.contains("\n\tSerial Number : 12ab34cd"));
    }

    #[test]
    fn platform_capabilities_round_out_the_shape_table() {
        let mut w = Writer::new();
        w.u16_le(7);
        w.u16_le(16);
        w.u8(2);
        w.fill(0, 3);
        w.u32_le(0b111);
        w.u32_le(0);
        let blob = w.flush();
        let reader = RecordReader::<SubtableFormat>::new(&blob);
        let rec: DecodedRecord<PlatformCapabilities> = reader.read_one(0).unwrap();
        assert_eq!(rec.data.highest_valid_capability, 2);
        assert_eq!(rec.data.capabilities, 0b111);
        let text = format!("{}", rec);
        assert!(text.contains("\n\tCapabilities : 00000000000000000000000000000111"));
    }
}
