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

use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use mft_core::mediator::Mediator;
use mft_core::{DataStreamReference, ErrorTrace, open_os_data_stream};

use super::constants::{file_reference_record_number, NTFS_DEFAULT_RECORD_SIZE};
use super::config::Config;
use super::errors::{NtfsErrorKind, NtfsNote};
use super::hash_pipeline::compute_hashes_ordered;
use super::output::OutputRow;
use super::path_resolver::PathResolver;
use super::record::{assemble_record, NtfsRecord};

/// Totals the streaming driver reports once a run finishes, regardless of
/// whether it ran to completion or was cancelled partway through.
#[derive(Clone, Debug, Default)]
pub struct DriverSummary {
    pub total_records: u64,
    pub in_use_records: u64,
    pub deleted_records: u64,
    pub directory_records: u64,
    pub incomplete_extensions: u64,
    pub cancelled: bool,
}

/// Reads the whole MFT, assembles every record, folds extension records
/// into their base, optionally hashes resident $DATA content, resolves
/// full paths, and returns one [`OutputRow`] per primary record in
/// ascending record-number order.
///
/// `cancel` is checked between records; an in-progress record always
/// finishes before the driver returns, so no partial row is ever produced.
pub fn run(
    path: &PathBuf,
    config: &Config,
    cancel: &AtomicBool,
) -> Result<(Vec<OutputRow>, DriverSummary), ErrorTrace> {
    let data_stream: DataStreamReference = open_os_data_stream(path)?;
    let mediator = Mediator::current();

    let file_size: u64 = mft_core::data_stream_get_size!(data_stream);

    let record_size: usize = infer_record_size(&data_stream)?;
    let total_records: u64 = file_size / record_size as u64;
    let trailing_bytes: u64 = file_size % record_size as u64;
    if trailing_bytes != 0 && trailing_bytes * 100 >= file_size.max(1) {
        return Err(mft_core::error_trace_new!(format!(
            "input is not a whole number of {}-byte records and the trailing {} bytes exceed the 1% truncation tolerance",
            record_size, trailing_bytes
        )));
    }

    let mut records: HashMap<u64, NtfsRecord> = HashMap::with_capacity(total_records as usize);
    let mut summary: DriverSummary = DriverSummary::default();

    let mut buffer: Vec<u8> = vec![0u8; record_size];
    for record_index in 0..total_records {
        if cancel.load(Ordering::Relaxed) {
            summary.cancelled = true;
            break;
        }

        let position: u64 = record_index * record_size as u64;
        let _: u64 =
            mft_core::data_stream_read_exact_at_position!(data_stream, &mut buffer, SeekFrom::Start(position));

        if mediator.debug_output {
            mediator.debug_print(format!("assembling record at byte offset {}\n", position));
        }

        let record: NtfsRecord = assemble_record(buffer.clone(), Some(config.resident_data_cap));

        summary.total_records += 1;
        if record.is_in_use() {
            summary.in_use_records += 1;
        } else {
            summary.deleted_records += 1;
        }
        if record.is_classified_as_directory() {
            summary.directory_records += 1;
        }

        // Keyed by position, not the record's self-decoded `record_number`:
        // every never-allocated slot decodes that field to 0 regardless of
        // signature validity, and those would otherwise collide on one key
        // and overwrite each other. A record's position in the file is its
        // true record number; the header field is only a redundant check.
        records.insert(record_index, record);
    }

    fold_extensions(&mut records, &mut summary);

    if config.compute_hashes {
        apply_hashes(&mut records, config.hash_worker_count);
    }

    let mut rows: Vec<OutputRow> = build_rows(&records, config);
    rows.sort_by_key(|row| row.record_number);

    Ok((rows, summary))
}

/// Reads the first record's header to decide between the 1024-byte default
/// and the 4096-byte record size some volumes use; the allocated-size
/// field lives in the first sector, so a fixup-uncorrected read is safe.
fn infer_record_size(data_stream: &DataStreamReference) -> Result<usize, ErrorTrace> {
    let mut header: [u8; 32] = [0u8; 32];
    let _: u64 = mft_core::data_stream_read_exact_at_position!(data_stream, &mut header, SeekFrom::Start(0));

    let allocated_size: u32 = u32::from_le_bytes([header[28], header[29], header[30], header[31]]);
    if allocated_size == 4096 {
        Ok(4096)
    } else {
        Ok(NTFS_DEFAULT_RECORD_SIZE as usize)
    }
}

/// Second pass: merges every extension record into its base record using
/// the pending-join set each base record's $ATTRIBUTE_LIST collected
/// during assembly. A referenced extension that never arrives is flagged
/// `MissingExtension` rather than treated as fatal.
fn fold_extensions(records: &mut HashMap<u64, NtfsRecord>, summary: &mut DriverSummary) {
    let base_record_numbers: Vec<u64> = records
        .iter()
        .filter(|(_, record)| !record.is_extension() && !record.pending_extensions.is_empty())
        .map(|(record_number, _)| *record_number)
        .collect();

    for base_record_number in base_record_numbers {
        let pending: Vec<u64> = records
            .get(&base_record_number)
            .map(|record| record.pending_extensions.clone())
            .unwrap_or_default();

        for extension_record_number in pending {
            if extension_record_number == base_record_number {
                continue;
            }
            match records.remove(&extension_record_number) {
                Some(extension) => {
                    if let Some(base) = records.get_mut(&base_record_number) {
                        base.absorb_extension(extension);
                    }
                }
                None => {
                    summary.incomplete_extensions += 1;
                    if let Some(base) = records.get_mut(&base_record_number) {
                        base.is_extension_incomplete = true;
                        base.notes.push(NtfsNote::new(
                            NtfsErrorKind::MissingExtension,
                            format!("extension record {} referenced but not found", extension_record_number),
                        ));
                    }
                }
            }
        }
    }
}

fn apply_hashes(records: &mut HashMap<u64, NtfsRecord>, worker_count: usize) {
    // Only a resident unnamed $DATA stream has bytes in hand to hash; a
    // non-resident stream's content lives in clusters this driver never
    // reads, and an absent stream has no content at all. Either way the
    // record is left with `hashes = None` rather than a hash of nothing.
    let hashable_record_numbers: Vec<u64> = records
        .iter()
        .filter(|(_, record)| {
            record
                .unnamed_data_stream()
                .map_or(false, |stream| stream.is_resident)
        })
        .map(|(record_number, _)| *record_number)
        .collect();

    let mut record_numbers: Vec<u64> = hashable_record_numbers;
    record_numbers.sort();

    let jobs: Vec<Vec<u8>> = record_numbers
        .iter()
        .map(|record_number| {
            records
                .get(record_number)
                .and_then(|record| record.unnamed_data_stream())
                .map(|stream| stream.resident_content.clone())
                .unwrap_or_default()
        })
        .collect();

    let hashes = compute_hashes_ordered(jobs, worker_count);

    for (record_number, hash) in record_numbers.into_iter().zip(hashes.into_iter()) {
        if let Some(record) = records.get_mut(&record_number) {
            record.hashes = Some(hash);
        }
    }
}

fn build_rows(records: &HashMap<u64, NtfsRecord>, config: &Config) -> Vec<OutputRow> {
    let mut resolver: PathResolver = PathResolver::new(records, config.path_separator, config.max_path_depth);
    let resolved_paths = resolver.resolve_all();

    records
        .values()
        .filter(|record| !record.is_extension())
        .map(|record| {
            let mut row: OutputRow = OutputRow::from_record(record, config.utc_offset_minutes);
            if let Some((path, anomaly)) = resolved_paths.get(&record.record_number) {
                row.full_path = Some(path.clone());
                if let Some(anomaly) = anomaly {
                    row.anomaly_flags.push(String::from(*anomaly));
                }
            }
            if parent_is_active_directory(records, record) {
                row.anomaly_flags.push(String::from("flags-inconsistent"));
            }
            row
        })
        .collect()
}

/// The cross-record half of the `flags-inconsistent` anomaly: a record
/// whose in-use bit is clear but whose $FILE_NAME parent reference points
/// at a parent that is itself in use and classified as a directory. The
/// local half (has-directory flag vs. $INDEX_ROOT presence) lives in
/// [`super::anomaly::detect_anomalies`], which only has the one record to
/// look at; this half needs the full record table, so it runs here instead.
fn parent_is_active_directory(records: &HashMap<u64, NtfsRecord>, record: &NtfsRecord) -> bool {
    if record.is_in_use() {
        return false;
    }
    match record.preferred_file_name() {
        Some(file_name) => {
            let parent_record_number: u64 = file_reference_record_number(file_name.parent_file_reference);
            records
                .get(&parent_record_number)
                .map_or(false, |parent| parent.is_in_use() && parent.is_classified_as_directory())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_extensions_merges_data_streams() {
        let mut records: HashMap<u64, NtfsRecord> = HashMap::new();

        let mut base: NtfsRecord = bare_record(5, 0);
        base.pending_extensions.push(6);
        records.insert(5, base);

        let mut extension: NtfsRecord = bare_record(6, 0x0005_0000_0000_0005);
        extension.data_streams.push(super::super::data_attribute::NtfsDataStream {
            name: None,
            is_resident: true,
            resident_content: vec![9, 9, 9],
            data_runs: Vec::new(),
            allocated_size: 3,
            real_size: 3,
        });
        records.insert(6, extension);

        let mut summary: DriverSummary = DriverSummary::default();
        fold_extensions(&mut records, &mut summary);

        assert!(!records.contains_key(&6));
        assert_eq!(records.get(&5).unwrap().data_streams.len(), 1);
        assert_eq!(summary.incomplete_extensions, 0);
    }

    #[test]
    fn test_fold_extensions_flags_missing_extension() {
        let mut records: HashMap<u64, NtfsRecord> = HashMap::new();
        let mut base: NtfsRecord = bare_record(5, 0);
        base.pending_extensions.push(999);
        records.insert(5, base);

        let mut summary: DriverSummary = DriverSummary::default();
        fold_extensions(&mut records, &mut summary);

        assert_eq!(summary.incomplete_extensions, 1);
        assert!(records.get(&5).unwrap().is_extension_incomplete);
    }

    fn bare_record(record_number: u64, base_record_reference: u64) -> NtfsRecord {
        NtfsRecord {
            record_number: record_number,
            sequence_number: 1,
            used_size: 0,
            allocated_size: 1024,
            flags: 0x0001,
            base_record_reference: base_record_reference,
            next_attribute_id: 0,
            standard_information: None,
            file_names: Vec::new(),
            object_id: None,
            security_descriptor: None,
            volume_name: None,
            volume_information: None,
            data_streams: Vec::new(),
            has_index_root: false,
            has_reparse_point: false,
            pending_extensions: Vec::new(),
            is_extension_incomplete: false,
            hashes: None,
            notes: Vec::new(),
        }
    }
}
