//! FRU EEPROM inventory decoding.
//!
//! A FRU blob opens with the eight byte [`CommonHeader`] whose offset
//! bytes, counted in 8-byte units, locate up to five areas.
//! [`FruEepromParser::parse`] walks the present areas in fixed order
//! and decodes their length-prefixed text fields into [`FruEeprom`].

mod areas;
mod error;
mod field;
mod parser;

pub use areas::{
    Board, ChassisInfo, ChassisType, CommonHeader, ProductInfo, COMMON_HEADER_SIZE,
};
pub use error::FruError;
pub use field::{decode_field, Field};
pub use parser::{FruEeprom, FruEepromParser};
