//! Dumps a Management Data Region blob as text or JSON.
//!
//! Usage: `mdr-dump <fru|acpi|dcpmem> [FILE] [--json]`
//!
//! Reads FILE, or standard input when FILE is absent or `-`. The text
//! form prints every decoded record; `--json` emits one JSON document
//! instead.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::process;

use serde_json::{json, Value};

use mdr_pack::acpi::AcpiParser;
use mdr_pack::dcpmem::DcpmemParser;
use mdr_pack::fru::FruEepromParser;

const USAGE: &str = "usage: mdr-dump <fru|acpi|dcpmem> [FILE] [--json]";

fn main() {
    let mut format = None;
    let mut path = None;
    let mut as_json = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            other if format.is_none() => format = Some(other.to_string()),
            other if path.is_none() => path = Some(other.to_string()),
            other => {
                eprintln!("unexpected argument: {other}");
                eprintln!("{USAGE}");
                process::exit(2);
            }
        }
    }
    let format = match format {
        Some(format) => format,
        None => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };
    if let Err(err) = run(&format, path.as_deref(), as_json) {
        eprintln!("mdr-dump: {err}");
        process::exit(1);
    }
}

fn run(format: &str, path: Option<&str>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let blob = read_input(path)?;
    let doc = match format {
        "fru" => dump_fru(&blob, as_json)?,
        "acpi" => dump_acpi(&blob, as_json)?,
        "dcpmem" => dump_dcpmem(&blob, as_json)?,
        other => {
            return Err(format!("unknown format {other:?}, expected fru, acpi or dcpmem").into())
        }
    };
    if let Some(doc) = doc {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> io::Result<Vec<u8>> {
    match path {
        Some("-") | None => {
            let mut blob = Vec::new();
            io::stdin().read_to_end(&mut blob)?;
            Ok(blob)
        }
        Some(path) => fs::read(path),
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        result.push_str(&format!("{:02x}", byte));
    }
    result
}

fn dump_fru(blob: &[u8], as_json: bool) -> Result<Option<Value>, Box<dyn Error>> {
    let eeprom = FruEepromParser::new(blob).parse()?;
    if !as_json {
        print!("{eeprom}");
        return Ok(None);
    }
    let chassis = eeprom.chassis_info.map(|info| {
        json!({
            "chassis_type": info.chassis_type.to_string(),
            "chassis_type_code": info.chassis_type.code(),
            "part_number": info.part_number,
            "serial_number": info.serial_number,
        })
    });
    let board = eeprom.board.map(|board| {
        json!({
            "language_code": board.language_code,
            "mfg_date_time": board.mfg_date_time,
            "manufacturer": board.manufacturer,
            "product_name": board.product_name,
            "serial_number": board.serial_number,
            "part_number": board.part_number,
            "fru_file_id": board.fru_file_id,
        })
    });
    let product = eeprom.product_info.map(|product| {
        json!({
            "language_code": product.language_code,
            "manufacturer": product.manufacturer,
            "product_name": product.product_name,
            "model_number": product.model_number,
            "product_version": product.product_version,
            "serial_number": product.serial_number,
            "asset_tag": product.asset_tag,
            "fru_file_id": product.fru_file_id,
        })
    });
    Ok(Some(json!({
        "chassis_info": chassis,
        "board": board,
        "product_info": product,
    })))
}

fn dump_acpi(blob: &[u8], as_json: bool) -> Result<Option<Value>, Box<dyn Error>> {
    let parser = AcpiParser::new(blob)?;
    if !as_json {
        print!("{parser}");
        return Ok(None);
    }
    let tables: Vec<Value> = parser
        .entry_point()
        .tables()
        .iter()
        .map(|table| {
            json!({
                "signature": table.header.signature_str(),
                "length": table.header.length,
                "revision": table.header.revision,
                "data_offset": table.region.start,
                "data_end_offset": table.region.end,
            })
        })
        .collect();
    let spa_ranges: Vec<Value> = parser
        .spa_ranges()?
        .iter()
        .map(|rec| {
            json!({
                "index": rec.data.index,
                "flags": rec.data.flags,
                "proximity_domain": rec.data.proximity_domain,
                "address_range_type_guid": hex(&rec.data.address_range_type_guid),
                "range_base": rec.data.range_base,
                "range_length": rec.data.range_length,
                "mapping_attribute": rec.data.mapping_attribute,
            })
        })
        .collect();
    let region_mappings: Vec<Value> = parser
        .region_mappings()?
        .iter()
        .map(|rec| {
            json!({
                "device_handle": rec.data.device_handle,
                "physical_id": rec.data.physical_id,
                "region_id": rec.data.region_id,
                "spa_range_index": rec.data.spa_range_index,
                "control_region_index": rec.data.control_region_index,
                "region_size": rec.data.region_size,
                "region_offset": rec.data.region_offset,
                "physical_address_region_base": rec.data.physical_address_region_base,
                "interleave_index": rec.data.interleave_index,
                "interleave_ways": rec.data.interleave_ways,
                "state_flags": rec.data.state_flags,
            })
        })
        .collect();
    let control_regions: Vec<Value> = parser
        .control_regions()?
        .iter()
        .map(|rec| {
            json!({
                "index": rec.data.index,
                "vendor_id": rec.data.vendor_id,
                "device_id": rec.data.device_id,
                "revision_id": rec.data.revision_id,
                "serial_number": rec.data.serial_number,
                "region_format_interface_code": rec.data.region_format_interface_code,
                "block_control_window_count": rec.data.block_control_window_count,
            })
        })
        .collect();
    let block_data_windows: Vec<Value> = parser
        .block_data_windows()?
        .iter()
        .map(|rec| {
            json!({
                "control_region_index": rec.data.control_region_index,
                "window_count": rec.data.window_count,
                "window_start_offset": rec.data.window_start_offset,
                "window_size": rec.data.window_size,
                "accessible_capacity": rec.data.accessible_capacity,
                "first_block_address": rec.data.first_block_address,
            })
        })
        .collect();
    let platform_capabilities: Vec<Value> = parser
        .platform_capabilities()?
        .iter()
        .map(|rec| {
            json!({
                "highest_valid_capability": rec.data.highest_valid_capability,
                "capabilities": rec.data.capabilities,
            })
        })
        .collect();
    let capability_info: Vec<Value> = parser
        .platform_capability_info()?
        .iter()
        .map(|rec| {
            json!({
                "management_sw_config_input_support": rec.data.management_sw_config_input_support,
                "memory_mode_capabilities": rec.data.memory_mode_capabilities,
                "current_memory_mode": rec.data.current_memory_mode,
                "persistent_memory_ras_capability": rec.data.persistent_memory_ras_capability,
            })
        })
        .collect();
    let socket_sku_info: Vec<Value> = parser
        .socket_sku_info()?
        .iter()
        .map(|rec| {
            json!({
                "socket_id": rec.data.socket_id,
                "mapped_memory_size_limit": rec.data.mapped_memory_size_limit,
                "total_memory_size_mapped": rec.data.total_memory_size_mapped,
                "memory_size_excluded_in_2lm": rec.data.memory_size_excluded_in_2lm,
            })
        })
        .collect();
    Ok(Some(json!({
        "tables": tables,
        "nfit": {
            "spa_ranges": spa_ranges,
            "region_mappings": region_mappings,
            "control_regions": control_regions,
            "block_data_windows": block_data_windows,
            "platform_capabilities": platform_capabilities,
        },
        "pcat": {
            "platform_capability_info": capability_info,
            "socket_sku_info": socket_sku_info,
        },
    })))
}

fn dump_dcpmem(blob: &[u8], as_json: bool) -> Result<Option<Value>, Box<dyn Error>> {
    let parser = DcpmemParser::new(blob)?;
    if !as_json {
        print!("{parser}");
        return Ok(None);
    }
    let identify: Vec<Value> = parser
        .identify_dimm()?
        .iter()
        .map(|rec| {
            json!({
                "vendor_id": rec.data.vendor_id,
                "device_id": rec.data.device_id,
                "revision_id": rec.data.revision_id,
                "interface_format_code": rec.data.interface_format_code,
                "firmware_revision": rec.data.firmware_revision_str(),
                "raw_capacity": rec.data.raw_capacity,
                "manufacturer": rec.data.manufacturer,
                "serial_number": rec.data.serial_number,
                "part_number": rec.data.part_number_str(),
                "dimm_sku": rec.data.dimm_sku,
                "api_version": rec.data.api_version_str(),
                "dimm_unique_id": hex(&rec.data.dimm_unique_id),
            })
        })
        .collect();
    let security: Vec<Value> = parser
        .security_state()?
        .iter()
        .map(|rec| json!({ "security_status": rec.data.security_status }))
        .collect();
    let power: Vec<Value> = parser
        .power_management_policy()?
        .iter()
        .map(|rec| {
            json!({
                "peak_power_budget": rec.data.peak_power_budget,
                "average_power_budget": rec.data.average_power_budget,
            })
        })
        .collect();
    let partition: Vec<Value> = parser
        .partition_info()?
        .iter()
        .map(|rec| {
            json!({
                "volatile_capacity": rec.data.volatile_capacity,
                "volatile_start": rec.data.volatile_start,
                "persistent_capacity": rec.data.persistent_capacity,
                "persistent_start": rec.data.persistent_start,
                "raw_capacity": rec.data.raw_capacity,
            })
        })
        .collect();
    let smart: Vec<Value> = parser
        .smart_health_info()?
        .iter()
        .map(|rec| {
            json!({
                "validation_flags": rec.data.validation_flags,
                "health_status": rec.data.health_status,
                "percentage_remaining": rec.data.percentage_remaining,
                "percentage_used": rec.data.percentage_used,
                "alarm_trips": rec.data.alarm_trips,
                "media_temperature": rec.data.media_temperature,
                "controller_temperature": rec.data.controller_temperature,
                "dirty_shutdown_count": rec.data.dirty_shutdown_count,
                "ait_dram_status": rec.data.ait_dram_status,
                "health_status_reason": rec.data.health_status_reason,
                "last_shutdown_status": rec.data.last_shutdown_status,
                "power_cycles": rec.data.power_cycles,
                "power_on_time": rec.data.power_on_time,
                "uptime": rec.data.uptime,
                "unlatched_dirty_shutdowns": rec.data.unlatched_dirty_shutdowns,
                "last_shutdown_time": rec.data.last_shutdown_time,
            })
        })
        .collect();
    let memory: Vec<Value> = parser
        .memory_info()?
        .iter()
        .map(|rec| {
            json!({
                "media_reads": hex(&rec.data.media_reads),
                "media_writes": hex(&rec.data.media_writes),
                "read_requests": hex(&rec.data.read_requests),
                "write_requests": hex(&rec.data.write_requests),
            })
        })
        .collect();
    let first = parser.entry_point().first_header();
    Ok(Some(json!({
        "first_header": {
            "command_type": first.command_type,
            "length": first.length,
        },
        "identify_dimm": identify,
        "security_state": security,
        "power_management_policy": power,
        "partition_info": partition,
        "smart_health_info": smart,
        "memory_info": memory,
    })))
}
