//! FRU EEPROM parser facade: owned blob, linear area walk.

use std::fmt;

use super::areas::{Board, ChassisInfo, CommonHeader, ProductInfo};
use super::error::FruError;

/// Parser over a private copy of one FRU EEPROM read.
///
/// Construction only copies; all validation happens in [`parse`],
/// which either decodes every present area or fails for the whole
/// blob.
///
/// [`parse`]: FruEepromParser::parse
pub struct FruEepromParser {
    blob: Vec<u8>,
}

impl FruEepromParser {
    pub fn new(bytes: &[u8]) -> Self {
        FruEepromParser {
            blob: bytes.to_vec(),
        }
    }

    /// The owned copy of the input.
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Decodes the common header, then each present area in fixed
    /// order: Chassis Info, Board, Product Info. Internal Use and
    /// MultiRecord offsets are indexed but their areas are never
    /// decoded, since no supported hardware populates them.
    pub fn parse(&self) -> Result<FruEeprom, FruError> {
        let common_header = CommonHeader::decode(&self.blob)?;
        let chassis_info = common_header
            .chassis_info_offset
            .map(|offset| ChassisInfo::decode(&self.blob, offset))
            .transpose()?;
        let board = common_header
            .board_offset
            .map(|offset| Board::decode(&self.blob, offset))
            .transpose()?;
        let product_info = common_header
            .product_info_offset
            .map(|offset| ProductInfo::decode(&self.blob, offset))
            .transpose()?;
        Ok(FruEeprom {
            common_header,
            chassis_info,
            board,
            product_info,
        })
    }
}

/// One fully decoded FRU EEPROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruEeprom {
    pub common_header: CommonHeader,
    pub chassis_info: Option<ChassisInfo>,
    pub board: Option<Board>,
    pub product_info: Option<ProductInfo>,
}

impl fmt::Display for FruEeprom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(info) = &self.chassis_info {
            write!(f, "FRU Chassis Info Area [Length = {}]", info.length)?;
            write!(f, "\n\tChassis Type : {}", info.chassis_type)?;
            write!(f, "\n\tPart Number : {}", info.part_number)?;
            writeln!(f, "\n\tSerial Number : {}", info.serial_number)?;
        }
        if let Some(board) = &self.board {
            write!(f, "FRU Board Area [Length = {}]", board.length)?;
            write!(f, "\n\tLanguage Code : {}", board.language_code)?;
            write!(f, "\n\tMfg Date Time : {}", board.mfg_date_time)?;
            write!(f, "\n\tManufacturer : {}", board.manufacturer)?;
            write!(f, "\n\tProduct Name : {}", board.product_name)?;
            write!(f, "\n\tSerial Number : {}", board.serial_number)?;
            write!(f, "\n\tPart Number : {}", board.part_number)?;
            writeln!(f, "\n\tFRU File ID : {}", board.fru_file_id)?;
        }
        if let Some(product) = &self.product_info {
            write!(f, "FRU Product Info Area [Length = {}]", product.length)?;
            write!(f, "\n\tLanguage Code : {}", product.language_code)?;
            write!(f, "\n\tManufacturer : {}", product.manufacturer)?;
            write!(f, "\n\tProduct Name : {}", product.product_name)?;
            write!(f, "\n\tModel Number : {}", product.model_number)?;
            write!(f, "\n\tProduct Version : {}", product.product_version)?;
            write!(f, "\n\tSerial Number : {}", product.serial_number)?;
            write!(f, "\n\tAsset Tag : {}", product.asset_tag)?;
            writeln!(f, "\n\tFRU File ID : {}", product.fru_file_id)?;
        }
        Ok(())
    }
}
