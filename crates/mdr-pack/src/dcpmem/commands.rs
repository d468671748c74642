//! Firmware command response payload shapes.
//!
//! Payload layouts follow the Intel FIS field order; every struct
//! keeps only the fields the telemetry surface reads, skipping the
//! reserved runs that pad each payload to its 64 byte chunk multiple.

use std::fmt;

use mdr_buffers::SliceReader;

use crate::error::DecodeError;
use crate::record::{hex_string, Record};

use super::entry_point::ResponseFormat;

fn trim_fixed_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
        .trim_end_matches(' ')
        .to_owned()
}

/// Identify DIMM response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifyDimm {
    pub vendor_id: u16,
    pub device_id: u16,
    pub revision_id: u16,
    pub interface_format_code: u16,
    pub firmware_revision: [u8; 5],
    pub feature_sw_required_mask: u8,
    /// Raw capacity in 4 KiB units.
    pub raw_capacity: u32,
    pub manufacturer: u16,
    pub serial_number: u32,
    pub part_number: [u8; 20],
    pub dimm_sku: u32,
    pub api_version: u16,
    pub dimm_unique_id: [u8; 9],
}

impl IdentifyDimm {
    /// Firmware revision as `aa.bb.cc.dddd`: product number, revision,
    /// security revision, then the two build number bytes.
    pub fn firmware_revision_str(&self) -> String {
        format!(
            "{:x}.{:x}.{:x}.{:x}{:x}",
            self.firmware_revision[4],
            self.firmware_revision[3],
            self.firmware_revision[2],
            self.firmware_revision[0],
            self.firmware_revision[1]
        )
    }

    /// API version as `major.minor` from the high and low bytes.
    pub fn api_version_str(&self) -> String {
        format!(
            "{}.{}",
            (self.api_version & 0xff00) >> 8,
            self.api_version & 0x00ff
        )
    }

    /// Part number as text, cut at the first NUL with trailing spaces
    /// stripped.
    pub fn part_number_str(&self) -> String {
        trim_fixed_text(&self.part_number)
    }
}

impl Record for IdentifyDimm {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x01;
    const WIRE_SIZE: usize = 130;
    const NAME: &'static str = "IDENTIFY_DIMM";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let vendor_id = reader.u16_le()?;
        let device_id = reader.u16_le()?;
        let revision_id = reader.u16_le()?;
        let interface_format_code = reader.u16_le()?;
        let firmware_revision = reader.array::<5>()?;
        reader.skip(1)?;
        let feature_sw_required_mask = reader.u8()?;
        reader.skip(1)?;
        let raw_capacity = reader.u32_le()?;
        let manufacturer = reader.u16_le()?;
        let serial_number = reader.u32_le()?;
        let part_number = reader.array::<20>()?;
        let dimm_sku = reader.u32_le()?;
        let api_version = reader.u16_le()?;
        let dimm_unique_id = reader.array::<9>()?;
        Ok(IdentifyDimm {
            vendor_id,
            device_id,
            revision_id,
            interface_format_code,
            firmware_revision,
            feature_sw_required_mask,
            raw_capacity,
            manufacturer,
            serial_number,
            part_number,
            dimm_sku,
            api_version,
            dimm_unique_id,
        })
    }
}

impl fmt::Display for IdentifyDimm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tVendor ID : {:04x}", self.vendor_id)?;
        write!(f, "\n\tDevice ID : {:04x}", self.device_id)?;
        write!(f, "\n\tRevision ID : {:04x}", self.revision_id)?;
        write!(
            f,
            "\n\tInterface Format Code : {:04x}",
            self.interface_format_code
        )?;
        write!(f, "\n\tFirmware Revision : {}", self.firmware_revision_str())?;
        write!(
            f,
            "\n\tFeature SW Required Mask : {:02x}",
            self.feature_sw_required_mask
        )?;
        write!(f, "\n\tRaw Capacity (in 4KiB units) : {}", self.raw_capacity)?;
        write!(f, "\n\tManufacturer : {:04x}", self.manufacturer)?;
        write!(f, "\n\tSerial Number : {:08x}", self.serial_number)?;
        write!(f, "\n\tPart Number : {}", self.part_number_str())?;
        write!(f, "\n\tDIMM SKU : {:032b}", self.dimm_sku)?;
        write!(f, "\n\tAPI Version : {}", self.api_version_str())?;
        write!(f, "\n\tDIMM Unique ID : {}", hex_string(&self.dimm_unique_id))
    }
}

/// Security state response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityState {
    pub security_status: u8,
}

impl Record for SecurityState {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x02;
    const WIRE_SIZE: usize = 66;
    const NAME: &'static str = "SECURITY_STATE";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let security_status = reader.u8()?;
        Ok(SecurityState { security_status })
    }
}

impl fmt::Display for SecurityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tSecurity Status : {:08b}", self.security_status)
    }
}

/// Power management policy response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagementPolicy {
    pub peak_power_budget: u16,
    pub average_power_budget: u16,
}

impl Record for PowerManagementPolicy {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x03;
    const WIRE_SIZE: usize = 66;
    const NAME: &'static str = "POWER_MANAGEMENT_POLICY";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let peak_power_budget = reader.u16_le()?;
        let average_power_budget = reader.u16_le()?;
        Ok(PowerManagementPolicy {
            peak_power_budget,
            average_power_budget,
        })
    }
}

impl fmt::Display for PowerManagementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tPeak Power Budget : {}", self.peak_power_budget)?;
        write!(f, "\n\tAverage Power Budget : {}", self.average_power_budget)
    }
}

/// DIMM partition info response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionInfo {
    /// Volatile capacity in 4 KiB units.
    pub volatile_capacity: u32,
    pub volatile_start: u64,
    /// Persistent capacity in 4 KiB units.
    pub persistent_capacity: u32,
    pub persistent_start: u64,
    /// Raw capacity in 4 KiB units.
    pub raw_capacity: u32,
}

impl Record for PartitionInfo {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x04;
    const WIRE_SIZE: usize = 130;
    const NAME: &'static str = "DIMM_PARTITION_INFO";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let volatile_capacity = reader.u32_le()?;
        reader.skip(4)?;
        let volatile_start = reader.u64_le()?;
        let persistent_capacity = reader.u32_le()?;
        reader.skip(4)?;
        let persistent_start = reader.u64_le()?;
        let raw_capacity = reader.u32_le()?;
        Ok(PartitionInfo {
            volatile_capacity,
            volatile_start,
            persistent_capacity,
            persistent_start,
            raw_capacity,
        })
    }
}

impl fmt::Display for PartitionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tVolatile (2LM) Capacity (in 4KiB units) : {}",
            self.volatile_capacity
        )?;
        write!(f, "\n\tVolatile Start : 0x{:016x}", self.volatile_start)?;
        write!(
            f,
            "\n\tPersistent Capacity (in 4KiB units) : {}",
            self.persistent_capacity
        )?;
        write!(f, "\n\tPersistent Start : 0x{:016x}", self.persistent_start)?;
        write!(f, "\n\tRaw Capacity (in 4KiB units) : {}", self.raw_capacity)
    }
}

/// SMART and health info response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartHealthInfo {
    pub validation_flags: u32,
    pub health_status: u8,
    pub percentage_remaining: u8,
    pub percentage_used: u8,
    pub alarm_trips: u8,
    /// Temperature in 0.0625 degree Celsius units.
    pub media_temperature: u16,
    /// Temperature in 0.0625 degree Celsius units.
    pub controller_temperature: u16,
    pub dirty_shutdown_count: u32,
    pub ait_dram_status: u8,
    pub health_status_reason: u16,
    pub last_shutdown_status: u8,
    pub vendor_data_size: u32,
    pub power_cycles: u64,
    pub power_on_time: u64,
    pub uptime: u64,
    pub unlatched_dirty_shutdowns: u32,
    pub last_shutdown_status_details: u8,
    pub last_shutdown_time: u64,
    pub last_shutdown_status_extended_details: [u8; 3],
}

impl Record for SmartHealthInfo {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x05;
    const WIRE_SIZE: usize = 130;
    const NAME: &'static str = "SMART_AND_HEALTH_INFO";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let validation_flags = reader.u32_le()?;
        reader.skip(4)?;
        let health_status = reader.u8()?;
        let percentage_remaining = reader.u8()?;
        let percentage_used = reader.u8()?;
        let alarm_trips = reader.u8()?;
        let media_temperature = reader.u16_le()?;
        let controller_temperature = reader.u16_le()?;
        let dirty_shutdown_count = reader.u32_le()?;
        let ait_dram_status = reader.u8()?;
        let health_status_reason = reader.u16_le()?;
        let last_shutdown_status = reader.u8()?;
        let vendor_data_size = reader.u32_le()?;
        let power_cycles = reader.u64_le()?;
        let power_on_time = reader.u64_le()?;
        let uptime = reader.u64_le()?;
        let unlatched_dirty_shutdowns = reader.u32_le()?;
        let last_shutdown_status_details = reader.u8()?;
        let last_shutdown_time = reader.u64_le()?;
        let last_shutdown_status_extended_details = reader.array::<3>()?;
        Ok(SmartHealthInfo {
            validation_flags,
            health_status,
            percentage_remaining,
            percentage_used,
            alarm_trips,
            media_temperature,
            controller_temperature,
            dirty_shutdown_count,
            ait_dram_status,
            health_status_reason,
            last_shutdown_status,
            vendor_data_size,
            power_cycles,
            power_on_time,
            uptime,
            unlatched_dirty_shutdowns,
            last_shutdown_status_details,
            last_shutdown_time,
            last_shutdown_status_extended_details,
        })
    }
}

impl fmt::Display for SmartHealthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tValidation Flags : {:032b}", self.validation_flags)?;
        write!(f, "\n\tHealth Status : {:08b}", self.health_status)?;
        write!(
            f,
            "\n\tPercentage Remaining : {}",
            self.percentage_remaining
        )?;
        write!(f, "\n\tPercentage Used [obsolete] : {}", self.percentage_used)?;
        write!(f, "\n\tAlarm Trips : {:08b}", self.alarm_trips)?;
        write!(
            f,
            "\n\tMedia Temperature (with 0.0625C resolution) : {}",
            self.media_temperature
        )?;
        write!(
            f,
            "\n\tController Temperature (with 0.0625C resolution) : {}",
            self.controller_temperature
        )?;
        write!(f, "\n\tDirty Shutdown Count : {}", self.dirty_shutdown_count)?;
        write!(f, "\n\tAIT DRAM Status : {:02x}", self.ait_dram_status)?;
        write!(
            f,
            "\n\tHealth Status Reason : {:016b}",
            self.health_status_reason
        )?;
        write!(
            f,
            "\n\tLast Shutdown Status : {:02x}",
            self.last_shutdown_status
        )?;
        write!(
            f,
            "\n\tVendor Specific Data Size : {}",
            self.vendor_data_size
        )?;
        write!(f, "\n\tVendor Specific Data: ")?;
        write!(f, "\n\t\tPower Cycles : {}", self.power_cycles)?;
        write!(f, "\n\t\tPower On Time : {}", self.power_on_time)?;
        write!(f, "\n\t\tUptime : {}", self.uptime)?;
        write!(
            f,
            "\n\t\tUnlatched Dirty Shutdowns : {}",
            self.unlatched_dirty_shutdowns
        )?;
        write!(
            f,
            "\n\t\tLast Shutdown Status Details : {:08b}",
            self.last_shutdown_status_details
        )?;
        write!(f, "\n\t\tLast Shutdown Time : {}", self.last_shutdown_time)?;
        write!(
            f,
            "\n\t\tLast Shutdown Status Extended Details : {}",
            hex_string(&self.last_shutdown_status_extended_details)
        )
    }
}

/// Memory info response: four 128 bit access counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    pub media_reads: [u8; 16],
    pub media_writes: [u8; 16],
    pub read_requests: [u8; 16],
    pub write_requests: [u8; 16],
}

impl Record for MemoryInfo {
    type Format = ResponseFormat;
    const TYPE_TAG: u16 = 0x06;
    const WIRE_SIZE: usize = 66;
    const NAME: &'static str = "MEMORY_INFO";

    fn decode(reader: &mut SliceReader<'_>) -> Result<Self, DecodeError> {
        let media_reads = reader.array::<16>()?;
        let media_writes = reader.array::<16>()?;
        let read_requests = reader.array::<16>()?;
        let write_requests = reader.array::<16>()?;
        Ok(MemoryInfo {
            media_reads,
            media_writes,
            read_requests,
            write_requests,
        })
    }
}

impl fmt::Display for MemoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\tMedia Reads : {}", hex_string(&self.media_reads))?;
        write!(f, "\n\tMedia Writes : {}", hex_string(&self.media_writes))?;
        write!(f, "\n\tRead Requests : {}", hex_string(&self.read_requests))?;
        write!(f, "\n\tWrite Requests : {}", hex_string(&self.write_requests))
    }
}
