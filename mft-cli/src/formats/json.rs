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

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use mft_core::ErrorTrace;
use mft_parser::ntfs::OutputRow;

use super::full_path_or_name;

/// Plain serde-derived mirror of [`OutputRow`]'s §4.J column groups, in
/// snake_case. Kept separate from `OutputRow` itself so the parser crate
/// does not need a `serde` dependency for a concern only the CLI has.
#[derive(Serialize)]
struct JsonRow {
    record_number: u64,
    sequence_number: u16,
    active: bool,
    directory: bool,
    has_ads: bool,
    parent_record_number: u64,
    parent_sequence_number: u16,
    filename: String,
    full_path: String,
    std_creation_time: String,
    std_modification_time: String,
    std_entry_modification_time: String,
    std_access_time: String,
    fn_creation_time: String,
    fn_modification_time: String,
    fn_entry_modification_time: String,
    fn_access_time: String,
    logical_size: u64,
    physical_size: u64,
    object_id: Option<String>,
    md5: Option<String>,
    sha256: Option<String>,
    sha512: Option<String>,
    crc32: Option<String>,
    anomaly_flags: Vec<String>,
    notes: Vec<String>,
}

impl From<&OutputRow> for JsonRow {
    fn from(row: &OutputRow) -> Self {
        Self {
            record_number: row.record_number,
            sequence_number: row.sequence_number,
            active: row.in_use,
            directory: row.is_directory,
            has_ads: row.has_ads,
            parent_record_number: row.parent_record_number,
            parent_sequence_number: row.parent_sequence_number,
            filename: row.file_name.clone(),
            full_path: full_path_or_name(row),
            std_creation_time: row.std_creation_time.to_iso8601_string(),
            std_modification_time: row.std_modification_time.to_iso8601_string(),
            std_entry_modification_time: row.std_entry_modification_time.to_iso8601_string(),
            std_access_time: row.std_access_time.to_iso8601_string(),
            fn_creation_time: row.fn_creation_time.to_iso8601_string(),
            fn_modification_time: row.fn_modification_time.to_iso8601_string(),
            fn_entry_modification_time: row.fn_entry_modification_time.to_iso8601_string(),
            fn_access_time: row.fn_access_time.to_iso8601_string(),
            logical_size: row.logical_size,
            physical_size: row.physical_size,
            object_id: row.object_id.clone(),
            md5: row.hashes.as_ref().map(|hashes| hashes.md5.clone()),
            sha256: row.hashes.as_ref().map(|hashes| hashes.sha256.clone()),
            sha512: row.hashes.as_ref().map(|hashes| hashes.sha512.clone()),
            crc32: row.hashes.as_ref().map(|hashes| hashes.crc32.clone()),
            anomaly_flags: row.anomaly_flags.clone(),
            notes: row.notes.clone(),
        }
    }
}

/// Writes every row as a JSON array of objects.
pub fn write(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    let file: File = File::create(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create JSON output file", error)
    })?;
    let writer: BufWriter<File> = BufWriter::new(file);

    let json_rows: Vec<JsonRow> = rows.iter().map(JsonRow::from).collect();

    serde_json::to_writer_pretty(writer, &json_rows).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to write JSON output", error)
    })
}
