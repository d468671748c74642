//! DCPMEM firmware command response decoding.
//!
//! A DCPMEM blob is a stream of fixed-format firmware command
//! responses, each opening with a two byte [`ResponseHeader`] whose
//! length counts payload bytes in 64 byte transfer chunks.
//! [`DcpmemEntryPoint::create`] checks the framing; [`DcpmemParser`]
//! exposes one accessor per command in the catalog.

mod commands;
mod entry_point;
mod error;
mod parser;

pub use commands::{
    IdentifyDimm, MemoryInfo, PartitionInfo, PowerManagementPolicy, SecurityState,
    SmartHealthInfo,
};
pub use entry_point::{DcpmemEntryPoint, ResponseFormat, ResponseHeader, RESPONSE_HEADER_SIZE};
pub use error::DcpmemError;
pub use parser::DcpmemParser;
