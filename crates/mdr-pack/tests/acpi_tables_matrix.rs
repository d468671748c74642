//! ACPI table matrix: entry-point indexing over concatenated tables,
//! the exact-size record scan, and the per-table accessors.

use mdr_buffers::Writer;
use mdr_pack::acpi::{AcpiEntryPoint, AcpiParser, ACPI_HEADER_SIZE, SUPPORTED_SIGNATURES};
use mdr_pack::checksum::complement;
use mdr_pack::DecodeError;

use proptest::prelude::*;

fn table(signature: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.bytes(signature);
    w.u32_le((ACPI_HEADER_SIZE + payload.len()) as u32);
    w.u8(1);
    w.u8(0);
    w.bytes(b"INTEL ");
    w.bytes(b"PURLEY  ");
    w.u32_le(1);
    w.u32_le(1);
    w.u32_le(1);
    w.fill(0, 4);
    w.bytes(payload);
    let mut blob = w.flush();
    blob[9] = complement(&blob);
    blob
}

fn spa_range_subtable(index: u16, declared_len: u16) -> Vec<u8> {
    let mut w = Writer::new();
    w.u16_le(0);
    w.u16_le(declared_len);
    w.u16_le(index);
    w.u16_le(0b01);
    w.u32_le(0);
    w.u32_le(1);
    w.fill(0xab, 16);
    w.u64_le(0x0000_0004_0000_0000);
    w.u64_le(0x0000_0002_0000_0000);
    w.u64_le(0x8008);
    let mut blob = w.flush();
    blob.resize(declared_len as usize, 0);
    blob
}

fn socket_sku_subtable(socket_id: u16) -> Vec<u8> {
    let mut w = Writer::new();
    w.u16_le(6);
    w.u16_le(32);
    w.u16_le(socket_id);
    w.u16_le(0);
    w.u64_le(0x0000_0040_0000_0000);
    w.u64_le(0x0000_0020_0000_0000);
    w.u64_le(0);
    w.flush()
}

// ---------------------------------------------------------------------------
// Entry-point indexing
// ---------------------------------------------------------------------------

#[test]
fn single_nfit_table_indexes_the_payload_range() {
    let blob = table(b"NFIT", &[0u8; 24]);
    let total = blob.len();
    let ep = AcpiEntryPoint::create(&blob).unwrap();
    assert_eq!(ep.table_data_offset("NFIT"), Some(ACPI_HEADER_SIZE));
    assert_eq!(ep.table_data_end_offset("NFIT"), Some(total));
    assert_eq!(ep.table_data_offset("ABCD"), None);
    assert_eq!(ep.table_data_end_offset("ABCD"), None);
}

#[test]
fn every_supported_signature_is_accepted() {
    let mut blob = Vec::new();
    for signature in SUPPORTED_SIGNATURES {
        let sig: [u8; 4] = signature.as_bytes().try_into().unwrap();
        blob.extend(table(&sig, &[0u8; 16]));
    }
    let ep = AcpiEntryPoint::create(&blob).unwrap();
    assert_eq!(ep.tables().len(), SUPPORTED_SIGNATURES.len());
    for signature in SUPPORTED_SIGNATURES {
        assert!(ep.region(signature).is_some(), "missing {signature}");
    }
}

#[test]
fn concatenated_tables_tile_the_blob_without_gaps() {
    let mut blob = table(b"NFIT", &[0u8; 24]);
    blob.extend(table(b"PCAT", &[0u8; 8]));
    blob.extend(table(b"SRAT", &[0u8; 48]));
    let ep = AcpiEntryPoint::create(&blob).unwrap();

    let tables = ep.tables();
    assert_eq!(tables[0].region.start, ACPI_HEADER_SIZE);
    for pair in tables.windows(2) {
        assert_eq!(pair[1].region.start, pair[0].region.end + ACPI_HEADER_SIZE);
    }
    assert_eq!(tables.last().unwrap().region.end, blob.len());
}

#[test]
fn unknown_signature_reports_the_text() {
    let blob = table(b"XSDT", &[0u8; 8]);
    assert_eq!(
        AcpiEntryPoint::create(&blob).unwrap_err(),
        DecodeError::UnknownSignature("XSDT".to_owned())
    );
}

#[test]
fn one_flipped_byte_is_a_checksum_mismatch() {
    let mut blob = table(b"PCAT", &[0u8; 16]);
    blob[48] ^= 0x80;
    assert_eq!(
        AcpiEntryPoint::create(&blob).unwrap_err(),
        DecodeError::ChecksumMismatch
    );
}

#[test]
fn blob_one_byte_short_of_a_header_is_too_small() {
    let blob = table(b"NFIT", &[]);
    assert_eq!(
        AcpiEntryPoint::create(&blob[..ACPI_HEADER_SIZE - 1]).unwrap_err(),
        DecodeError::BufferTooSmall
    );
}

// ---------------------------------------------------------------------------
// Record scanning through the parser
// ---------------------------------------------------------------------------

#[test]
fn spa_ranges_decode_in_table_order() {
    let mut payload = spa_range_subtable(0, 56);
    payload.extend(spa_range_subtable(1, 56));
    let blob = table(b"NFIT", &payload);

    let parser = AcpiParser::new(&blob).unwrap();
    let ranges = parser.spa_ranges().unwrap();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].data.index, 0);
    assert_eq!(ranges[1].data.index, 1);
    assert_eq!(ranges[0].data.range_base, 0x0000_0004_0000_0000);
    assert_eq!(ranges[0].data.address_range_type_guid, [0xab; 16]);
}

#[test]
fn matching_tag_with_an_off_by_one_length_is_skipped() {
    let mut payload = spa_range_subtable(7, 57);
    payload.extend(spa_range_subtable(8, 56));
    let blob = table(b"NFIT", &payload);

    let parser = AcpiParser::new(&blob).unwrap();
    let ranges = parser.spa_ranges().unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].data.index, 8);
}

#[test]
fn read_one_decodes_a_record_at_its_exact_offset() {
    let blob = table(b"NFIT", &spa_range_subtable(5, 56));
    let parser = AcpiParser::new(&blob).unwrap();
    let rec = parser
        .reader()
        .read_one::<mdr_pack::acpi::SpaRange>(ACPI_HEADER_SIZE)
        .unwrap();
    assert_eq!(rec.data.index, 5);
    assert_eq!(rec.header.length, 56);
}

#[test]
fn pcat_records_come_from_the_pcat_region_only() {
    let mut blob = table(b"NFIT", &spa_range_subtable(1, 56));
    blob.extend(table(b"PCAT", &socket_sku_subtable(2)));

    let parser = AcpiParser::new(&blob).unwrap();
    let sku = parser.socket_sku_info().unwrap();
    assert_eq!(sku.len(), 1);
    assert_eq!(sku[0].data.socket_id, 2);
    assert_eq!(sku[0].data.mapped_memory_size_limit, 0x0000_0040_0000_0000);
    assert_eq!(parser.spa_ranges().unwrap().len(), 1);
}

#[test]
fn accessors_over_an_absent_table_return_no_records() {
    let blob = table(b"PCAT", &socket_sku_subtable(0));
    let parser = AcpiParser::new(&blob).unwrap();
    assert!(parser.spa_ranges().unwrap().is_empty());
    assert!(parser.region_mappings().unwrap().is_empty());
}

#[test]
fn text_dump_names_each_known_record() {
    let mut blob = table(b"NFIT", &spa_range_subtable(1, 56));
    blob.extend(table(b"SRAT", &[0u8; 16]));
    let parser = AcpiParser::new(&blob).unwrap();
    let text = format!("{parser}");
    assert!(text.contains("NFIT SPA Range Structure [Type = 0 Length = 56]"));
    assert!(text.contains("Unsupported ACPI Table [Signature = SRAT Length = 56]"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// For any sequence of table payload sizes, the indexed regions
    /// tile the blob: each payload starts one header past the previous
    /// payload's end, and the last one closes the blob.
    #[test]
    fn regions_tile_for_any_payload_sizes(
        sizes in proptest::collection::vec(0usize..96, 1..5),
    ) {
        let mut blob = Vec::new();
        for (slot, size) in sizes.iter().enumerate() {
            let sig: [u8; 4] = SUPPORTED_SIGNATURES[slot % SUPPORTED_SIGNATURES.len()]
                .as_bytes()
                .try_into()
                .unwrap();
            blob.extend(table(&sig, &vec![0u8; *size]));
        }
        let ep = AcpiEntryPoint::create(&blob).unwrap();
        let tables = ep.tables();
        prop_assert_eq!(tables.len(), sizes.len());
        prop_assert_eq!(tables[0].region.start, ACPI_HEADER_SIZE);
        for pair in tables.windows(2) {
            prop_assert_eq!(pair[1].region.start, pair[0].region.end + ACPI_HEADER_SIZE);
        }
        prop_assert_eq!(tables.last().unwrap().region.end, blob.len());
    }

    /// Truncating a valid blob anywhere inside the last table fails
    /// validation; no partial index is ever returned.
    #[test]
    fn truncated_blobs_never_validate(cut in 1usize..64) {
        let blob = table(b"NFIT", &[0u8; 24]);
        let cut = cut % (blob.len() - 1) + 1;
        let result = AcpiEntryPoint::create(&blob[..blob.len() - cut]);
        prop_assert!(result.is_err());
    }
}
