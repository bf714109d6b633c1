/* Copyright 2024-2025 Joachim Metz <joachim.metz@gmail.com>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may
 * obtain a copy of the License at https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
 * WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
 * License for the specific language governing permissions and limitations
 * under the License.
 */

//! End-to-end coverage built from hand-assembled record buffers rather than
//! an external disk image fixture: a single 1024-byte record or a small
//! synthetic MFT image is enough to exercise every stage without needing a
//! captured volume on disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use mft_parser::ntfs::config::{Config, Profile};
use mft_parser::ntfs::record::assemble_record;
use mft_parser::ntfs::output::OutputRow;
use mft_parser::ntfs::{run, DriverSummary, NtfsErrorKind};

const RECORD_SIZE: usize = 1024;
const FIXUP_OFFSET: usize = 48;
const ATTRIBUTES_OFFSET: usize = 56;
const FIXUP_USN: u16 = 0xbeef;

const ATTRIBUTE_TYPE_STANDARD_INFORMATION: u32 = 0x0000_0010;
const ATTRIBUTE_TYPE_FILE_NAME: u32 = 0x0000_0030;
const ATTRIBUTE_TYPE_DATA: u32 = 0x0000_0080;

fn file_reference(record_number: u64, sequence_number: u16) -> u64 {
    record_number | ((sequence_number as u64) << 48)
}

fn round_up_to_8(size: usize) -> usize {
    (size + 7) / 8 * 8
}

fn ucs2_bytes(name: &str) -> Vec<u8> {
    name.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

fn resident_attribute(attribute_type: u32, attribute_id: u16, content: &[u8]) -> Vec<u8> {
    const HEADER_SIZE: usize = 24;
    let total_length: usize = round_up_to_8(HEADER_SIZE + content.len());

    let mut attribute: Vec<u8> = vec![0u8; total_length];
    attribute[0..4].copy_from_slice(&attribute_type.to_le_bytes());
    attribute[4..8].copy_from_slice(&(total_length as u32).to_le_bytes());
    attribute[8] = 0; // resident
    attribute[14..16].copy_from_slice(&attribute_id.to_le_bytes());
    attribute[16..20].copy_from_slice(&(content.len() as u32).to_le_bytes());
    attribute[20..22].copy_from_slice(&(HEADER_SIZE as u16).to_le_bytes());
    attribute[HEADER_SIZE..HEADER_SIZE + content.len()].copy_from_slice(content);
    attribute
}

fn non_resident_attribute(
    attribute_type: u32,
    attribute_id: u16,
    allocated_size: u64,
    real_size: u64,
    data_runs: &[u8],
) -> Vec<u8> {
    const HEADER_SIZE: usize = 64;
    let total_length: usize = round_up_to_8(HEADER_SIZE + data_runs.len());

    let mut attribute: Vec<u8> = vec![0u8; total_length];
    attribute[0..4].copy_from_slice(&attribute_type.to_le_bytes());
    attribute[4..8].copy_from_slice(&(total_length as u32).to_le_bytes());
    attribute[8] = 1; // non-resident
    attribute[14..16].copy_from_slice(&attribute_id.to_le_bytes());
    attribute[32..34].copy_from_slice(&(HEADER_SIZE as u16).to_le_bytes()); // data runs offset
    attribute[40..48].copy_from_slice(&allocated_size.to_le_bytes());
    attribute[48..56].copy_from_slice(&real_size.to_le_bytes());
    attribute[56..64].copy_from_slice(&real_size.to_le_bytes()); // initialized size
    attribute[HEADER_SIZE..HEADER_SIZE + data_runs.len()].copy_from_slice(data_runs);
    attribute
}

fn standard_information(creation: u64, modification: u64, entry_modification: u64, access: u64) -> Vec<u8> {
    let mut content: Vec<u8> = vec![0u8; 48];
    content[0..8].copy_from_slice(&creation.to_le_bytes());
    content[8..16].copy_from_slice(&modification.to_le_bytes());
    content[16..24].copy_from_slice(&entry_modification.to_le_bytes());
    content[24..32].copy_from_slice(&access.to_le_bytes());
    content
}

fn file_name(parent_file_reference: u64, creation: u64, name: &str, name_space: u8) -> Vec<u8> {
    let name_bytes: Vec<u8> = ucs2_bytes(name);
    let mut content: Vec<u8> = vec![0u8; 66 + name_bytes.len()];
    content[0..8].copy_from_slice(&parent_file_reference.to_le_bytes());
    content[8..16].copy_from_slice(&creation.to_le_bytes());
    content[16..24].copy_from_slice(&creation.to_le_bytes());
    content[24..32].copy_from_slice(&creation.to_le_bytes());
    content[32..40].copy_from_slice(&creation.to_le_bytes());
    content[64] = name.encode_utf16().count() as u8;
    content[65] = name_space;
    content[66..].copy_from_slice(&name_bytes);
    content
}

/// Lays out a well-formed 1024-byte record: header, fixup array matching
/// what the two sector trailers carry, the given attribute chain, and the
/// end-of-chain marker.
fn build_record(record_number: u32, sequence_number: u16, flags: u16, attributes: &[u8]) -> Vec<u8> {
    let mut data: Vec<u8> = vec![0u8; RECORD_SIZE];
    data[0..4].copy_from_slice(b"FILE");
    data[4..6].copy_from_slice(&(FIXUP_OFFSET as u16).to_le_bytes());
    data[6..8].copy_from_slice(&3u16.to_le_bytes());
    data[16..18].copy_from_slice(&sequence_number.to_le_bytes());
    data[20..22].copy_from_slice(&(ATTRIBUTES_OFFSET as u16).to_le_bytes());
    data[22..24].copy_from_slice(&flags.to_le_bytes());
    data[28..32].copy_from_slice(&(RECORD_SIZE as u32).to_le_bytes());
    data[44..48].copy_from_slice(&record_number.to_le_bytes());

    data[FIXUP_OFFSET..FIXUP_OFFSET + 2].copy_from_slice(&FIXUP_USN.to_le_bytes());
    data[510..512].copy_from_slice(&FIXUP_USN.to_le_bytes());
    data[1022..1024].copy_from_slice(&FIXUP_USN.to_le_bytes());

    let attributes_end: usize = ATTRIBUTES_OFFSET + attributes.len();
    data[ATTRIBUTES_OFFSET..attributes_end].copy_from_slice(attributes);
    data[attributes_end..attributes_end + 4].copy_from_slice(&0xffff_ffffu32.to_le_bytes());
    let used_size: u32 = (attributes_end + 4) as u32;
    data[24..28].copy_from_slice(&used_size.to_le_bytes());

    data
}

/// Same layout as [`build_record`], but sector 1's trailer is left carrying
/// a USN that does not match the fixup array, simulating torn-write
/// corruption (scenario S5 / testable property 10).
fn build_record_with_bad_fixup(record_number: u32, attributes: &[u8]) -> Vec<u8> {
    let mut data: Vec<u8> = build_record(record_number, 1, 0x0001, attributes);
    data[1022..1024].copy_from_slice(&0xdeadu16.to_le_bytes());
    data
}

/// Writes a handful of 1024-byte records back to back into a temp file and
/// removes it once dropped, so the full streaming driver can be exercised
/// through its real `PathBuf`-based entry point without a checked-in
/// fixture image.
struct TempImage {
    path: PathBuf,
}

impl TempImage {
    fn write(records: &[Vec<u8>]) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id: u64 = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path: PathBuf = std::env::temp_dir();
        path.push(format!("mft_parser_test_{}_{}.bin", std::process::id(), id));

        let mut data: Vec<u8> = Vec::with_capacity(records.len() * RECORD_SIZE);
        for record in records {
            data.extend_from_slice(record);
        }
        std::fs::write(&path, &data).expect("failed to write synthetic MFT image");

        Self { path: path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn test_config(path_separator: char) -> Config {
    let mut config: Config = Config::from_profile(Profile::Default);
    config.path_separator = path_separator;
    config
}

// S1: empty MFT, single record #0 ($MFT itself).
#[test]
fn s1_mft_record_resolves_active_non_directory_row() {
    let attributes: Vec<u8> = [
        resident_attribute(ATTRIBUTE_TYPE_STANDARD_INFORMATION, 0, &standard_information(0, 0, 0, 0)),
        resident_attribute(ATTRIBUTE_TYPE_FILE_NAME, 1, &file_name(file_reference(5, 1), 0, "$MFT", 3)),
    ]
    .concat();

    let record = assemble_record(build_record(0, 1, 0x0001, &attributes), None);
    assert_eq!(record.record_number, 0);
    assert!(record.is_in_use());
    assert!(!record.is_directory());
    assert!(record.notes.is_empty());

    let row: OutputRow = OutputRow::from_record(&record, 0);
    assert_eq!(row.file_name, "$MFT");
    assert_eq!(row.parent_record_number, 5);
    assert!(row.in_use);
    assert!(!row.is_directory);
}

// S2: deleted file, in-use flag clear.
#[test]
fn s2_deleted_record_is_flagged_inactive() {
    let attributes: Vec<u8> =
        resident_attribute(ATTRIBUTE_TYPE_FILE_NAME, 1, &file_name(file_reference(5, 1), 0, "secret.txt", 1));

    let record = assemble_record(build_record(42, 3, 0x0000, &attributes), None);
    assert_eq!(record.record_number, 42);
    assert_eq!(record.sequence_number, 3);
    assert!(!record.is_in_use());

    let row: OutputRow = OutputRow::from_record(&record, 0);
    assert!(!row.in_use);
    assert_eq!(row.file_name, "secret.txt");
    assert_eq!(row.parent_record_number, 5);
}

// S3: STD creation predates FN creation and every STD timestamp lands on an
// exact second, so both a timestomp shift and a zero-microsecond anomaly
// fire at once.
#[test]
fn s3_timestomp_and_zero_microsecond_anomalies_both_fire() {
    const STD_CREATION_2020_01_01: u64 = 132_223_104_000_000_000;
    const FN_CREATION_2023_06_15: u64 = 133_313_060_961_234_560;

    let attributes: Vec<u8> = [
        resident_attribute(
            ATTRIBUTE_TYPE_STANDARD_INFORMATION,
            0,
            &standard_information(
                STD_CREATION_2020_01_01,
                STD_CREATION_2020_01_01,
                STD_CREATION_2020_01_01,
                STD_CREATION_2020_01_01,
            ),
        ),
        resident_attribute(
            ATTRIBUTE_TYPE_FILE_NAME,
            1,
            &file_name(file_reference(5, 1), FN_CREATION_2023_06_15, "shifted.txt", 1),
        ),
    ]
    .concat();

    let record = assemble_record(build_record(7, 1, 0x0001, &attributes), None);
    let row: OutputRow = OutputRow::from_record(&record, 0);

    assert!(row.anomaly_flags.contains(&String::from("std-fn-shift")));
    assert!(row.anomaly_flags.contains(&String::from("usec-zero")));
}

// S4: non-resident $DATA with a sparse run, decoded from the exact byte
// sequence the scenario specifies.
#[test]
fn s4_non_resident_data_run_decodes_sparse_tail() {
    let data_runs: [u8; 13] = [0x31, 0x08, 0x00, 0x10, 0x00, 0x01, 0x05, 0x31, 0x04, 0xf0, 0xff, 0xff, 0x00];
    let attributes: Vec<u8> = non_resident_attribute(ATTRIBUTE_TYPE_DATA, 0, 12 * 4096, 12 * 4096, &data_runs);

    let record = assemble_record(build_record(8, 1, 0x0001, &attributes), None);
    assert_eq!(record.data_streams.len(), 1);

    let stream = &record.data_streams[0];
    assert!(!stream.is_resident);
    assert_eq!(stream.data_runs.len(), 2);
    assert_eq!(stream.data_runs[0].length_in_clusters, 8);
    assert_eq!(stream.data_runs[0].lcn, Some(0x010000));
    assert_eq!(stream.data_runs[1].length_in_clusters, 4);
    assert_eq!(stream.data_runs[1].lcn, None);

    // Testable property 2: allocated_size >= real_size for the row derived
    // from this record.
    let row: OutputRow = OutputRow::from_record(&record, 0);
    assert!(row.physical_size >= row.logical_size);
}

// S5 / testable property 10: a deliberate last-two-byte mismatch in a
// sector trailer is reported as FixupMismatch, but the record is still
// emitted rather than discarded.
#[test]
fn s5_fixup_mismatch_is_reported_but_record_still_emitted() {
    let attributes: Vec<u8> =
        resident_attribute(ATTRIBUTE_TYPE_FILE_NAME, 1, &file_name(file_reference(5, 1), 0, "torn.txt", 1));

    let record = assemble_record(build_record_with_bad_fixup(9, &attributes), None);

    assert_eq!(record.record_number, 9);
    assert!(record.notes.iter().any(|note| note.kind == NtfsErrorKind::FixupMismatch));
}

// Testable property 3: assembling the same bytes twice yields the same row.
#[test]
fn purity_reparsing_identical_bytes_yields_identical_row() {
    let attributes: Vec<u8> =
        resident_attribute(ATTRIBUTE_TYPE_FILE_NAME, 1, &file_name(file_reference(5, 1), 0, "stable.txt", 1));
    let data: Vec<u8> = build_record(11, 1, 0x0001, &attributes);

    let first: OutputRow = OutputRow::from_record(&assemble_record(data.clone(), None), 0);
    let second: OutputRow = OutputRow::from_record(&assemble_record(data, None), 0);

    assert_eq!(first.record_number, second.record_number);
    assert_eq!(first.file_name, second.file_name);
    assert_eq!(first.in_use, second.in_use);
    assert_eq!(first.anomaly_flags, second.anomaly_flags);
}

// S6 and testable properties 1 and 8, exercised through the real streaming
// driver: two records whose FILE_NAME attributes name each other as parent
// form a cycle, and the emitted rows stay in ascending record-number order
// even though a HashMap's iteration order is not itself guaranteed to be.
//
// A record's own record_number field matches its position in the image, as
// in any real MFT; the driver's record table is keyed by that position.
#[test]
fn s6_driver_flags_parent_cycle_and_orders_rows_by_record_number() -> Result<(), mft_core::ErrorTrace> {
    let record_a: Vec<u8> = build_record(0, 1, 0x0001, &file_name(file_reference(1, 1), 0, "a", 1));
    let record_b: Vec<u8> = build_record(1, 1, 0x0001, &file_name(file_reference(0, 1), 0, "b", 1));

    let image: TempImage = TempImage::write(&[record_a, record_b]);

    let config: Config = test_config('/');
    let cancel: AtomicBool = AtomicBool::new(false);
    let (rows, summary): (Vec<OutputRow>, DriverSummary) = run(&image.path().to_path_buf(), &config, &cancel)?;

    assert_eq!(rows.len(), 2);
    assert!(rows.windows(2).all(|pair| pair[0].record_number <= pair[1].record_number));
    assert_eq!(summary.total_records, 2);
    assert_eq!(summary.in_use_records, 2);

    for row in &rows {
        // Testable property 1.
        assert!(row.record_number < summary.total_records);
        assert!(row.full_path.as_deref().unwrap_or_default().starts_with("<cycle>"));
    }
    // The path cache is shared across both records, so depending on which one
    // resolves first, only that one observes the cycle directly; the other
    // inherits the already-cached `<cycle>` path without the flag. At least
    // one of the pair always carries it.
    assert!(rows.iter().any(|row| row.anomaly_flags.contains(&String::from("cycle-in-path"))));

    Ok(())
}

// Orphan counterpart of S6: a parent reference to a record number that
// never appears in the image.
#[test]
fn driver_flags_orphan_when_parent_record_is_missing() -> Result<(), mft_core::ErrorTrace> {
    let record: Vec<u8> = build_record(0, 1, 0x0001, &file_name(file_reference(999, 1), 0, "lost.txt", 1));
    let image: TempImage = TempImage::write(&[record]);

    let config: Config = test_config('/');
    let cancel: AtomicBool = AtomicBool::new(false);
    let (rows, _summary): (Vec<OutputRow>, DriverSummary) = run(&image.path().to_path_buf(), &config, &cancel)?;

    assert_eq!(rows.len(), 1);
    assert!(rows[0].anomaly_flags.contains(&String::from("orphan-record")));
    assert_eq!(rows[0].full_path.as_deref(), Some("<orphan>"));

    Ok(())
}

// Driver-level deleted-file scenario: full_path still resolves for a
// deleted record with a live parent, matching the idea behind S2 but
// driven end to end so path resolution is included.
#[test]
fn driver_resolves_full_path_for_deleted_record_under_root() -> Result<(), mft_core::ErrorTrace> {
    let record: Vec<u8> = build_record(0, 3, 0x0000, &file_name(file_reference(5, 1), 0, "secret.txt", 1));
    let image: TempImage = TempImage::write(&[record]);

    let config: Config = test_config('/');
    let cancel: AtomicBool = AtomicBool::new(false);
    let (rows, summary): (Vec<OutputRow>, DriverSummary) = run(&image.path().to_path_buf(), &config, &cancel)?;

    assert_eq!(rows.len(), 1);
    assert!(!rows[0].in_use);
    assert_eq!(rows[0].full_path.as_deref(), Some("secret.txt"));
    assert_eq!(summary.deleted_records, 1);
    assert_eq!(summary.in_use_records, 0);

    Ok(())
}
