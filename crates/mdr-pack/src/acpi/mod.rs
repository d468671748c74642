//! ACPI table-of-tables decoding.
//!
//! An ACPI blob concatenates whole tables, each opening with the forty
//! byte [`AcpiTableHeader`]. [`AcpiEntryPoint::create`] validates every
//! table's length, checksum and signature and indexes the payload
//! regions by signature; [`AcpiParser`] layers named record accessors
//! for the NFIT and PCAT subtable shapes on top.

mod entry_point;
mod nfit;
mod parser;
mod pcat;
mod subtable;

pub use entry_point::{
    AcpiEntryPoint, AcpiTable, AcpiTableHeader, ACPI_HEADER_SIZE, SUPPORTED_SIGNATURES,
};
pub use nfit::{BlockDataWindow, ControlRegion, PlatformCapabilities, RegionMapping, SpaRange};
pub use parser::AcpiParser;
pub use pcat::{PlatformCapabilityInfo, SocketSkuInfo};
pub use subtable::SubtableFormat;
