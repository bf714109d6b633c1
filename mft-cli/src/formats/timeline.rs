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
use mft_datetime::TimestampValue;
use mft_parser::ntfs::OutputRow;

use super::full_path_or_name;

/// One (record, timestamp) pair, the unit both timeline formats emit per
/// row, up to eight per record (STD x4, FN x4).
struct TimelineEvent<'a> {
    row: &'a OutputRow,
    attribute: &'static str,
    field: &'static str,
    macb: char,
    time: &'a TimestampValue,
}

fn events(row: &OutputRow) -> Vec<TimelineEvent<'_>> {
    vec![
        TimelineEvent { row, attribute: "$STANDARD_INFORMATION", field: "creation", macb: 'B', time: &row.std_creation_time },
        TimelineEvent { row, attribute: "$STANDARD_INFORMATION", field: "modification", macb: 'M', time: &row.std_modification_time },
        TimelineEvent { row, attribute: "$STANDARD_INFORMATION", field: "entry_modification", macb: 'C', time: &row.std_entry_modification_time },
        TimelineEvent { row, attribute: "$STANDARD_INFORMATION", field: "access", macb: 'A', time: &row.std_access_time },
        TimelineEvent { row, attribute: "$FILE_NAME", field: "creation", macb: 'B', time: &row.fn_creation_time },
        TimelineEvent { row, attribute: "$FILE_NAME", field: "modification", macb: 'M', time: &row.fn_modification_time },
        TimelineEvent { row, attribute: "$FILE_NAME", field: "entry_modification", macb: 'C', time: &row.fn_entry_modification_time },
        TimelineEvent { row, attribute: "$FILE_NAME", field: "access", macb: 'A', time: &row.fn_access_time },
    ]
}

/// Sleuth Kit style timeline: one row per (record, timestamp), skipping
/// sentinel (not-set / out-of-range) values.
pub fn write_tsk(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    let mut writer = csv::Writer::from_path(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create timeline output file", error)
    })?;
    writer
        .write_record(["timestamp", "record_number", "sequence_number", "attribute", "field", "filename", "full_path"])
        .map_err(|error| mft_core::error_trace_new_with_error!("Unable to write timeline header", error))?;

    for row in rows {
        for event in events(row) {
            let iso: String = event.time.to_iso8601_string();
            if iso.is_empty() {
                continue;
            }
            writer
                .write_record([
                    iso,
                    event.row.record_number.to_string(),
                    event.row.sequence_number.to_string(),
                    event.attribute.to_string(),
                    event.field.to_string(),
                    event.row.file_name.clone(),
                    full_path_or_name(event.row),
                ])
                .map_err(|error| mft_core::error_trace_new_with_error!("Unable to write timeline row", error))?;
        }
    }
    writer.flush().map_err(|error| mft_core::error_trace_new_with_error!("Unable to flush timeline output", error))
}

const L2T_HEADER: [&str; 17] = [
    "date", "time", "timezone", "MACB", "source", "sourcetype", "type", "user", "host", "short",
    "desc", "version", "filename", "inode", "notes", "format", "extra",
];

/// log2timeline 17-column CSV, one row per (record, timestamp).
pub fn write_l2t(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    let mut writer = csv::Writer::from_path(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create L2T output file", error)
    })?;
    writer
        .write_record(L2T_HEADER)
        .map_err(|error| mft_core::error_trace_new_with_error!("Unable to write L2T header", error))?;

    for row in rows {
        for event in events(row) {
            if event.time.is_not_set || event.time.is_out_of_range {
                continue;
            }
            let date: String = format!("{:02}/{:02}/{:04}", event.time.month, event.time.day, event.time.year);
            let time: String = format!("{:02}:{:02}:{:02}", event.time.hour, event.time.minute, event.time.second);
            let full_path: String = full_path_or_name(event.row);
            let desc: String = format!("{} {} time", event.attribute, event.field);
            let inode: String = format!("{}-{}", event.row.record_number, event.row.sequence_number);

            writer
                .write_record([
                    date,
                    time,
                    String::from("UTC"),
                    event.macb.to_string(),
                    String::from("FILE"),
                    String::from("NTFS MFT"),
                    event.field.to_string(),
                    String::new(),
                    String::new(),
                    event.row.file_name.clone(),
                    desc,
                    String::from("2"),
                    full_path,
                    inode,
                    super::notes_column(event.row),
                    String::from("mft"),
                    String::new(),
                ])
                .map_err(|error| mft_core::error_trace_new_with_error!("Unable to write L2T row", error))?;
        }
    }
    writer.flush().map_err(|error| mft_core::error_trace_new_with_error!("Unable to flush L2T output", error))
}
