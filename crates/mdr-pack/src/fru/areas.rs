//! FRU EEPROM common header and info areas.
//!
//! Every area starts with a format byte and a length byte counting
//! 8-byte units, carries a fixed prefix, then a declared sequence of
//! length-prefixed fields, and sums to zero mod 256 over its whole
//! range. Area validation is a hard failure for the blob; there are no
//! partial areas.

use mdr_buffers::SliceReader;

use crate::checksum::verify_zero_sum;
use crate::error::DecodeError;

use super::error::FruError;
use super::field::FieldSeq;

/// The one supported format revision for the common header and areas.
pub(crate) const AREA_FORMAT_VERSION: u8 = 0x01;

/// Size of the common header in bytes.
pub const COMMON_HEADER_SIZE: usize = 8;

/// Converts a common-header offset byte, counted in 8-byte units, into
/// a byte offset. Zero means the area is absent.
fn area_offset(byte: u8) -> Option<usize> {
    match byte {
        0 => None,
        units => Some(usize::from(units) * 8),
    }
}

/// The 8-byte common header indexing the blob's areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    pub format: u8,
    pub internal_use_offset: Option<usize>,
    pub chassis_info_offset: Option<usize>,
    pub board_offset: Option<usize>,
    pub product_info_offset: Option<usize>,
    pub multirecord_offset: Option<usize>,
    pub pad: u8,
    pub checksum: u8,
}

impl CommonHeader {
    /// Decodes and validates the common header at the start of `blob`.
    pub fn decode(blob: &[u8]) -> Result<CommonHeader, FruError> {
        if blob.len() < COMMON_HEADER_SIZE {
            return Err(DecodeError::BufferTooSmall.into());
        }
        let mut reader = SliceReader::new(&blob[..COMMON_HEADER_SIZE]);
        let format = reader.u8().map_err(DecodeError::from)?;
        if format != AREA_FORMAT_VERSION {
            return Err(FruError::UnsupportedAreaFormat);
        }
        let internal_use_offset = area_offset(reader.u8().map_err(DecodeError::from)?);
        let chassis_info_offset = area_offset(reader.u8().map_err(DecodeError::from)?);
        let board_offset = area_offset(reader.u8().map_err(DecodeError::from)?);
        let product_info_offset = area_offset(reader.u8().map_err(DecodeError::from)?);
        let multirecord_offset = area_offset(reader.u8().map_err(DecodeError::from)?);
        let pad = reader.u8().map_err(DecodeError::from)?;
        let checksum = reader.u8().map_err(DecodeError::from)?;
        verify_zero_sum(&blob[..COMMON_HEADER_SIZE])?;
        Ok(CommonHeader {
            format,
            internal_use_offset,
            chassis_info_offset,
            board_offset,
            product_info_offset,
            multirecord_offset,
            pad,
            checksum,
        })
    }
}

/// Validates the area starting at `start` and hands back its byte
/// length and a reader positioned after the format and length bytes.
fn open_area<'a>(blob: &'a [u8], start: usize) -> Result<(usize, SliceReader<'a>), FruError> {
    if start + 2 > blob.len() {
        return Err(DecodeError::OutOfBounds.into());
    }
    if blob[start] != AREA_FORMAT_VERSION {
        return Err(FruError::UnsupportedAreaFormat);
    }
    let length = usize::from(blob[start + 1]) * 8;
    if length == 0 {
        return Err(FruError::AreaDefinedButEmpty);
    }
    let end = start + length;
    if end > blob.len() {
        return Err(DecodeError::OutOfBounds.into());
    }
    verify_zero_sum(&blob[start..end])?;
    let mut reader = SliceReader::new(&blob[start..end]);
    reader.skip(2).map_err(DecodeError::from)?;
    Ok((length, reader))
}

/// System enclosure or chassis type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChassisType {
    Other,
    Unknown,
    Desktop,
    LowProfileDesktop,
    PizzaBox,
    MiniTower,
    Tower,
    Portable,
    Laptop,
    Notebook,
    HandHeld,
    DockingStation,
    AllInOne,
    SubNotebook,
    SpaceSaving,
    LunchBox,
    MainServerChassis,
    ExpansionChassis,
    SubChassis,
    BusExpansionChassis,
    PeripheralChassis,
    RaidChassis,
    RackMountChassis,
    SealedCasePc,
    /// A code outside the known table, preserved as-is.
    Unrecognized(u8),
}

impl ChassisType {
    pub fn from_code(code: u8) -> ChassisType {
        match code {
            0x01 => ChassisType::Other,
            0x02 => ChassisType::Unknown,
            0x03 => ChassisType::Desktop,
            0x04 => ChassisType::LowProfileDesktop,
            0x05 => ChassisType::PizzaBox,
            0x06 => ChassisType::MiniTower,
            0x07 => ChassisType::Tower,
            0x08 => ChassisType::Portable,
            0x09 => ChassisType::Laptop,
            0x0a => ChassisType::Notebook,
            0x0b => ChassisType::HandHeld,
            0x0c => ChassisType::DockingStation,
            0x0d => ChassisType::AllInOne,
            0x0e => ChassisType::SubNotebook,
            0x0f => ChassisType::SpaceSaving,
            0x10 => ChassisType::LunchBox,
            0x11 => ChassisType::MainServerChassis,
            0x12 => ChassisType::ExpansionChassis,
            0x13 => ChassisType::SubChassis,
            0x14 => ChassisType::BusExpansionChassis,
            0x15 => ChassisType::PeripheralChassis,
            0x16 => ChassisType::RaidChassis,
            0x17 => ChassisType::RackMountChassis,
            0x18 => ChassisType::SealedCasePc,
            other => ChassisType::Unrecognized(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ChassisType::Other => 0x01,
            ChassisType::Unknown => 0x02,
            ChassisType::Desktop => 0x03,
            ChassisType::LowProfileDesktop => 0x04,
            ChassisType::PizzaBox => 0x05,
            ChassisType::MiniTower => 0x06,
            ChassisType::Tower => 0x07,
            ChassisType::Portable => 0x08,
            ChassisType::Laptop => 0x09,
            ChassisType::Notebook => 0x0a,
            ChassisType::HandHeld => 0x0b,
            ChassisType::DockingStation => 0x0c,
            ChassisType::AllInOne => 0x0d,
            ChassisType::SubNotebook => 0x0e,
            ChassisType::SpaceSaving => 0x0f,
            ChassisType::LunchBox => 0x10,
            ChassisType::MainServerChassis => 0x11,
            ChassisType::ExpansionChassis => 0x12,
            ChassisType::SubChassis => 0x13,
            ChassisType::BusExpansionChassis => 0x14,
            ChassisType::PeripheralChassis => 0x15,
            ChassisType::RaidChassis => 0x16,
            ChassisType::RackMountChassis => 0x17,
            ChassisType::SealedCasePc => 0x18,
            ChassisType::Unrecognized(code) => *code,
        }
    }
}

impl std::fmt::Display for ChassisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChassisType::Other => write!(f, "Other"),
            ChassisType::Unknown => write!(f, "Unknown"),
            ChassisType::Desktop => write!(f, "Desktop"),
            ChassisType::LowProfileDesktop => write!(f, "Low Profile Desktop"),
            ChassisType::PizzaBox => write!(f, "Pizza Box"),
            ChassisType::MiniTower => write!(f, "Mini Tower"),
            ChassisType::Tower => write!(f, "Tower"),
            ChassisType::Portable => write!(f, "Portable"),
            ChassisType::Laptop => write!(f, "Laptop"),
            ChassisType::Notebook => write!(f, "Notebook"),
            ChassisType::HandHeld => write!(f, "Hand Held"),
            ChassisType::DockingStation => write!(f, "Docking Station"),
            ChassisType::AllInOne => write!(f, "All In One"),
            ChassisType::SubNotebook => write!(f, "Sub Notebook"),
            ChassisType::SpaceSaving => write!(f, "Space Saving"),
            ChassisType::LunchBox => write!(f, "Lunch Box"),
            ChassisType::MainServerChassis => write!(f, "Main Server Chassis"),
            ChassisType::ExpansionChassis => write!(f, "Expansion Chassis"),
            ChassisType::SubChassis => write!(f, "Sub Chassis"),
            ChassisType::BusExpansionChassis => write!(f, "Bus Expansion Chassis"),
            ChassisType::PeripheralChassis => write!(f, "Peripheral Chassis"),
            ChassisType::RaidChassis => write!(f, "RAID Chassis"),
            ChassisType::RackMountChassis => write!(f, "Rack Mount Chassis"),
            ChassisType::SealedCasePc => write!(f, "Sealed Case PC"),
            ChassisType::Unrecognized(code) => write!(f, "Unrecognized (0x{:02x})", code),
        }
    }
}

/// Chassis Info Area: enclosure type plus part and serial numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChassisInfo {
    pub length: usize,
    pub chassis_type: ChassisType,
    pub part_number: String,
    pub serial_number: String,
}

impl ChassisInfo {
    pub fn decode(blob: &[u8], start: usize) -> Result<ChassisInfo, FruError> {
        let (length, mut reader) = open_area(blob, start)?;
        let chassis_type = ChassisType::from_code(reader.u8().map_err(DecodeError::from)?);
        let mut fields = FieldSeq::new(&mut reader);
        let part_number = fields.next_text()?;
        let serial_number = fields.next_text()?;
        Ok(ChassisInfo {
            length,
            chassis_type,
            part_number,
            serial_number,
        })
    }
}

/// Board Area: manufacturing data for the board itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub length: usize,
    pub language_code: u8,
    /// Manufacturing date, raw 3-byte little-endian count of minutes
    /// since 1996-01-01 00:00.
    pub mfg_date_time: u32,
    pub manufacturer: String,
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
    pub fru_file_id: String,
}

impl Board {
    pub fn decode(blob: &[u8], start: usize) -> Result<Board, FruError> {
        let (length, mut reader) = open_area(blob, start)?;
        let language_code = reader.u8().map_err(DecodeError::from)?;
        let mfg_date_time = reader.u24_le().map_err(DecodeError::from)?;
        let mut fields = FieldSeq::new(&mut reader);
        let manufacturer = fields.next_text()?;
        let product_name = fields.next_text()?;
        let serial_number = fields.next_text()?;
        let part_number = fields.next_text()?;
        let fru_file_id = fields.next_text()?;
        Ok(Board {
            length,
            language_code,
            mfg_date_time,
            manufacturer,
            product_name,
            serial_number,
            part_number,
            fru_file_id,
        })
    }
}

/// Product Info Area: identity of the product the board belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub length: usize,
    pub language_code: u8,
    pub manufacturer: String,
    pub product_name: String,
    pub model_number: String,
    pub product_version: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub fru_file_id: String,
}

impl ProductInfo {
    pub fn decode(blob: &[u8], start: usize) -> Result<ProductInfo, FruError> {
        let (length, mut reader) = open_area(blob, start)?;
        let language_code = reader.u8().map_err(DecodeError::from)?;
        let mut fields = FieldSeq::new(&mut reader);
        let manufacturer = fields.next_text()?;
        let product_name = fields.next_text()?;
        let model_number = fields.next_text()?;
        let product_version = fields.next_text()?;
        let serial_number = fields.next_text()?;
        let asset_tag = fields.next_text()?;
        let fru_file_id = fields.next_text()?;
        Ok(ProductInfo {
            length,
            language_code,
            manufacturer,
            product_name,
            model_number,
            product_version,
            serial_number,
            asset_tag,
            fru_file_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::complement;

    fn sealed(mut area: Vec<u8>) -> Vec<u8> {
        // Pad to a whole number of 8-byte units, set the length byte,
        // and close with the zero-sum checksum byte.
        while (area.len() + 1) % 8 != 0 {
            area.push(0);
        }
        area.push(0);
        let units = (area.len() / 8) as u8;
        area[1] = units;
        let last = area.len() - 1;
        area[last] = complement(&area[..last]);
        area
    }

    fn chassis_area(chassis_type: u8, fields: &[&[u8]]) -> Vec<u8> {
        let mut area = vec![AREA_FORMAT_VERSION, 0, chassis_type];
        for field in fields {
            area.push(field.len() as u8);
            area.extend_from_slice(field);
        }
        area.push(0xc1);
        sealed(area)
    }

    #[test]
    fn chassis_info_decodes_type_and_fields() {
        let blob = chassis_area(0x17, &[b"ABCD", b"EFGH"]);
        let info = ChassisInfo::decode(&blob, 0).unwrap();
        assert_eq!(info.length, blob.len());
        assert_eq!(info.chassis_type, ChassisType::RackMountChassis);
        assert_eq!(info.part_number, "ABCD");
        assert_eq!(info.serial_number, "EFGH");
    }

    #[test]
    fn chassis_fields_after_the_terminator_decode_empty() {
        let blob = chassis_area(0x17, &[]);
        let info = ChassisInfo::decode(&blob, 0).unwrap();
        assert_eq!(info.part_number, "");
        assert_eq!(info.serial_number, "");
    }

    #[test]
    fn unknown_chassis_code_is_preserved() {
        let blob = chassis_area(0x99, &[b"P", b"S"]);
        let info = ChassisInfo::decode(&blob, 0).unwrap();
        assert_eq!(info.chassis_type, ChassisType::Unrecognized(0x99));
        assert_eq!(info.chassis_type.code(), 0x99);
        assert_eq!(format!("{}", info.chassis_type), "Unrecognized (0x99)");
    }

    #[test]
    fn area_with_a_foreign_format_version_is_rejected() {
        let mut blob = chassis_area(0x17, &[b"P", b"S"]);
        blob[0] = 0x02;
        assert_eq!(
            ChassisInfo::decode(&blob, 0).unwrap_err(),
            FruError::UnsupportedAreaFormat
        );
    }

    #[test]
    fn area_with_a_zero_length_byte_is_defined_but_empty() {
        let blob = [AREA_FORMAT_VERSION, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            ChassisInfo::decode(&blob, 0).unwrap_err(),
            FruError::AreaDefinedButEmpty
        );
    }

    #[test]
    fn area_with_a_broken_checksum_is_rejected() {
        let mut blob = chassis_area(0x17, &[b"P", b"S"]);
        let last = blob.len() - 1;
        blob[last] ^= 0xff;
        assert_eq!(
            ChassisInfo::decode(&blob, 0).unwrap_err(),
            FruError::Decode(DecodeError::ChecksumMismatch)
        );
    }

    #[test]
    fn area_extending_past_the_blob_is_out_of_bounds() {
        let blob = chassis_area(0x17, &[b"P", b"S"]);
        let truncated = &blob[..blob.len() - 1];
        assert_eq!(
            ChassisInfo::decode(truncated, 0).unwrap_err(),
            FruError::Decode(DecodeError::OutOfBounds)
        );
    }

    #[test]
    fn board_decodes_the_declared_field_order() {
        let mut area = vec![AREA_FORMAT_VERSION, 0, 25];
        area.extend([0x40, 0xe2, 0x01]);
        for field in [
            b"Company".as_slice(),
            b"Board",
            b"0123456789ABCDEFG",
            b"Part 1V",
            b"FRU ver. 0.3",
        ] {
            area.push(field.len() as u8);
            area.extend_from_slice(field);
        }
        area.push(0xc1);
        let blob = sealed(area);

        let board = Board::decode(&blob, 0).unwrap();
        assert_eq!(board.language_code, 25);
        assert_eq!(board.mfg_date_time, 0x01e240);
        assert_eq!(board.manufacturer, "Company");
        assert_eq!(board.product_name, "Board");
        assert_eq!(board.serial_number, "0123456789ABCDEFG");
        assert_eq!(board.part_number, "Part 1V");
        assert_eq!(board.fru_file_id, "FRU ver. 0.3");
    }

    #[test]
    fn board_continues_past_empty_fields() {
        let mut area = vec![AREA_FORMAT_VERSION, 0, 0];
        area.extend([0, 0, 0]);
        for field in [
            b"CompanyCompany".as_slice(),
            b"",
            b"0123456789ABCDEFG",
            b"",
            b"FRU 0.8",
        ] {
            area.push(field.len() as u8);
            area.extend_from_slice(field);
        }
        area.push(0xc1);
        let blob = sealed(area);

        let board = Board::decode(&blob, 0).unwrap();
        assert_eq!(board.manufacturer, "CompanyCompany");
        assert_eq!(board.product_name, "");
        assert_eq!(board.serial_number, "0123456789ABCDEFG");
        assert_eq!(board.part_number, "");
        assert_eq!(board.fru_file_id, "FRU 0.8");
    }

    #[test]
    fn product_info_decodes_the_declared_field_order() {
        let mut area = vec![AREA_FORMAT_VERSION, 0, 0];
        for field in [
            b"Company".as_slice(),
            b"Chassis",
            b"1234567890",
            b"Ver. 1.0",
            b"0123456789ABCDEFG",
            b"Tag",
            b"FRU ver. 0.3",
        ] {
            area.push(field.len() as u8);
            area.extend_from_slice(field);
        }
        area.push(0xc1);
        let blob = sealed(area);

        let product = ProductInfo::decode(&blob, 0).unwrap();
        assert_eq!(product.manufacturer, "Company");
        assert_eq!(product.product_name, "Chassis");
        assert_eq!(product.model_number, "1234567890");
        assert_eq!(product.product_version, "Ver. 1.0");
        assert_eq!(product.serial_number, "0123456789ABCDEFG");
        assert_eq!(product.asset_tag, "Tag");
        assert_eq!(product.fru_file_id, "FRU ver. 0.3");
    }

    #[test]
    fn common_header_scales_offsets_and_maps_zero_to_absent() {
        let mut header = vec![AREA_FORMAT_VERSION, 0, 1, 2, 9, 0, 0];
        header.push(complement(&header));
        let decoded = CommonHeader::decode(&header).unwrap();
        assert_eq!(decoded.internal_use_offset, None);
        assert_eq!(decoded.chassis_info_offset, Some(8));
        assert_eq!(decoded.board_offset, Some(16));
        assert_eq!(decoded.product_info_offset, Some(72));
        assert_eq!(decoded.multirecord_offset, None);
        assert_eq!(decoded.pad, 0);
    }

    #[test]
    fn common_header_shorter_than_eight_bytes_is_too_small() {
        let blob = [AREA_FORMAT_VERSION, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            CommonHeader::decode(&blob).unwrap_err(),
            FruError::Decode(DecodeError::BufferTooSmall)
        );
    }

    #[test]
    fn common_header_with_a_foreign_format_is_rejected() {
        let mut header = vec![0x02, 0, 0, 0, 0, 0, 0];
        header.push(complement(&header));
        assert_eq!(
            CommonHeader::decode(&header).unwrap_err(),
            FruError::UnsupportedAreaFormat
        );
    }

    #[test]
    fn common_header_with_a_broken_checksum_is_rejected() {
        let header = [AREA_FORMAT_VERSION, 0, 1, 0, 0, 0, 0, 0x55];
        assert_eq!(
            CommonHeader::decode(&header).unwrap_err(),
            FruError::Decode(DecodeError::ChecksumMismatch)
        );
    }
}
