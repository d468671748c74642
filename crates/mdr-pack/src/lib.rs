//! Decoders for Management Data Region payloads.
//!
//! Three self-describing binary formats share one decoding discipline:
//! FRU EEPROM inventory areas, ACPI table blobs carrying the
//! persistent-memory tables (NFIT, PCAT and friends), and DCPMEM
//! firmware command responses. Every decoder validates framing and
//! checksums up front, takes a private copy of its input, and reads
//! fields explicitly through a bounds-checked reader, so
//! hardware-controlled bytes are never aliased into typed records.

pub mod acpi;
pub mod checksum;
pub mod dcpmem;
pub mod error;
pub mod fru;
pub mod record;
pub mod region;

pub use error::{DecodeError, MdrError};
pub use record::{DecodedRecord, Record, RecordFormat, RecordHeader, RecordReader, Records};
pub use region::{Region, RegionIndex};
