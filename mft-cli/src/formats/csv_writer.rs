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

use std::path::Path;

use mft_core::ErrorTrace;
use mft_parser::ntfs::OutputRow;

use super::{full_path_or_name, notes_column};

const HEADER: &[&str] = &[
    "record_number",
    "sequence_number",
    "active",
    "directory",
    "has_ads",
    "parent_record_number",
    "parent_sequence_number",
    "filename",
    "full_path",
    "std_creation_time",
    "std_modification_time",
    "std_entry_modification_time",
    "std_access_time",
    "fn_creation_time",
    "fn_modification_time",
    "fn_entry_modification_time",
    "fn_access_time",
    "logical_size",
    "physical_size",
    "object_id",
    "md5",
    "sha256",
    "sha512",
    "crc32",
    "notes",
];

/// Writes the shared row schema as RFC-4180 CSV. `excel` reformats the
/// eight timestamp columns as `YYYY-MM-DD HH:MM:SS` (no fractional seconds
/// or UTC-offset suffix), the rendering spreadsheet applications parse as a
/// date without extra massaging; everything else is identical to plain CSV.
pub fn write(output: &Path, rows: &[OutputRow], excel: bool) -> Result<(), ErrorTrace> {
    let mut writer = csv::Writer::from_path(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create CSV output file", error)
    })?;

    writer.write_record(HEADER).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to write CSV header", error)
    })?;

    for row in rows {
        let (md5, sha256, sha512, crc32) = match &row.hashes {
            Some(hashes) => (
                hashes.md5.clone(),
                hashes.sha256.clone(),
                hashes.sha512.clone(),
                hashes.crc32.clone(),
            ),
            None => (String::new(), String::new(), String::new(), String::new()),
        };

        let render = |time: &mft_datetime::TimestampValue| -> String {
            if excel {
                let iso: String = time.to_iso8601_string();
                if iso.is_empty() {
                    String::new()
                } else {
                    iso.replace('T', " ").split(['.', '+', 'Z']).next().unwrap_or("").to_string()
                }
            } else {
                time.to_iso8601_string()
            }
        };

        let record: Vec<String> = vec![
            row.record_number.to_string(),
            row.sequence_number.to_string(),
            row.in_use.to_string(),
            row.is_directory.to_string(),
            row.has_ads.to_string(),
            row.parent_record_number.to_string(),
            row.parent_sequence_number.to_string(),
            row.file_name.clone(),
            full_path_or_name(row),
            render(&row.std_creation_time),
            render(&row.std_modification_time),
            render(&row.std_entry_modification_time),
            render(&row.std_access_time),
            render(&row.fn_creation_time),
            render(&row.fn_modification_time),
            render(&row.fn_entry_modification_time),
            render(&row.fn_access_time),
            row.logical_size.to_string(),
            row.physical_size.to_string(),
            row.object_id.clone().unwrap_or_default(),
            md5,
            sha256,
            sha512,
            crc32,
            notes_column(row),
        ];
        writer.write_record(&record).map_err(|error| {
            mft_core::error_trace_new_with_error!("Unable to write CSV row", error)
        })?;
    }

    writer.flush().map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to flush CSV output", error)
    })
}
