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

use rusqlite::Connection;

use mft_core::ErrorTrace;
use mft_parser::ntfs::OutputRow;

use super::{full_path_or_name, notes_column};

const SCHEMA: &str = "
CREATE TABLE mft_records (
    record_number INTEGER PRIMARY KEY,
    sequence_number INTEGER NOT NULL,
    active INTEGER NOT NULL,
    directory INTEGER NOT NULL,
    has_ads INTEGER NOT NULL,
    parent_record_number INTEGER NOT NULL,
    parent_sequence_number INTEGER NOT NULL,
    filename TEXT NOT NULL,
    full_path TEXT NOT NULL,
    std_creation_time TEXT,
    std_modification_time TEXT,
    std_entry_modification_time TEXT,
    std_access_time TEXT,
    fn_creation_time TEXT,
    fn_modification_time TEXT,
    fn_entry_modification_time TEXT,
    fn_access_time TEXT,
    logical_size INTEGER NOT NULL,
    physical_size INTEGER NOT NULL,
    object_id TEXT,
    md5 TEXT,
    sha256 TEXT,
    sha512 TEXT,
    crc32 TEXT,
    notes TEXT
);

CREATE TABLE mft_attributes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record_number INTEGER NOT NULL,
    attribute_type INTEGER NOT NULL,
    attribute_name TEXT NOT NULL,
    resident INTEGER NOT NULL,
    size INTEGER NOT NULL,
    FOREIGN KEY (record_number) REFERENCES mft_records (record_number)
);

CREATE TABLE alternate_data_streams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record_number INTEGER NOT NULL,
    name TEXT NOT NULL,
    resident INTEGER NOT NULL,
    size INTEGER NOT NULL,
    FOREIGN KEY (record_number) REFERENCES mft_records (record_number)
);

CREATE TABLE security_descriptors (
    record_number INTEGER PRIMARY KEY,
    owner_sid TEXT,
    group_sid TEXT,
    dacl TEXT,
    sacl TEXT,
    FOREIGN KEY (record_number) REFERENCES mft_records (record_number)
);

CREATE VIEW mft_active_records AS SELECT * FROM mft_records WHERE active = 1;
CREATE VIEW mft_deleted_records AS SELECT * FROM mft_records WHERE active = 0;
CREATE VIEW mft_directories AS SELECT * FROM mft_records WHERE directory = 1;

CREATE VIEW mft_timeline AS
    SELECT record_number, full_path, 'std_creation' AS field, std_creation_time AS timestamp FROM mft_records WHERE std_creation_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'std_modification', std_modification_time FROM mft_records WHERE std_modification_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'std_entry_modification', std_entry_modification_time FROM mft_records WHERE std_entry_modification_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'std_access', std_access_time FROM mft_records WHERE std_access_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'fn_creation', fn_creation_time FROM mft_records WHERE fn_creation_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'fn_modification', fn_modification_time FROM mft_records WHERE fn_modification_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'fn_entry_modification', fn_entry_modification_time FROM mft_records WHERE fn_entry_modification_time IS NOT NULL
    UNION ALL
    SELECT record_number, full_path, 'fn_access', fn_access_time FROM mft_records WHERE fn_access_time IS NOT NULL;
";

/// Writes every row into a fresh SQLite database: a `mft_records` table,
/// the `mft_attributes`/`alternate_data_streams`/`security_descriptors`
/// companion tables, and the active/deleted/directory and timeline views.
pub fn write(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    if output.exists() {
        std::fs::remove_file(output).map_err(|error| {
            mft_core::error_trace_new_with_error!("Unable to remove existing SQLite database", error)
        })?;
    }

    let mut connection: Connection = Connection::open(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create SQLite database", error)
    })?;
    connection.execute_batch(SCHEMA).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create SQLite schema", error)
    })?;

    let transaction = connection.transaction().map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to start SQLite transaction", error)
    })?;
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO mft_records (
                    record_number, sequence_number, active, directory, has_ads,
                    parent_record_number, parent_sequence_number, filename, full_path,
                    std_creation_time, std_modification_time, std_entry_modification_time, std_access_time,
                    fn_creation_time, fn_modification_time, fn_entry_modification_time, fn_access_time,
                    logical_size, physical_size, object_id, md5, sha256, sha512, crc32, notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            )
            .map_err(|error| mft_core::error_trace_new_with_error!("Unable to prepare SQLite insert", error))?;

        for row in rows {
            let (md5, sha256, sha512, crc32) = match &row.hashes {
                Some(hashes) => (
                    Some(hashes.md5.clone()),
                    Some(hashes.sha256.clone()),
                    Some(hashes.sha512.clone()),
                    Some(hashes.crc32.clone()),
                ),
                None => (None, None, None, None),
            };

            statement
                .execute(rusqlite::params![
                    row.record_number,
                    row.sequence_number,
                    row.in_use,
                    row.is_directory,
                    row.has_ads,
                    row.parent_record_number,
                    row.parent_sequence_number,
                    row.file_name,
                    full_path_or_name(row),
                    iso_or_null(&row.std_creation_time),
                    iso_or_null(&row.std_modification_time),
                    iso_or_null(&row.std_entry_modification_time),
                    iso_or_null(&row.std_access_time),
                    iso_or_null(&row.fn_creation_time),
                    iso_or_null(&row.fn_modification_time),
                    iso_or_null(&row.fn_entry_modification_time),
                    iso_or_null(&row.fn_access_time),
                    row.logical_size,
                    row.physical_size,
                    row.object_id,
                    md5,
                    sha256,
                    sha512,
                    crc32,
                    notes_column(row),
                ])
                .map_err(|error| mft_core::error_trace_new_with_error!("Unable to insert SQLite row", error))?;
        }
    }
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO mft_attributes (record_number, attribute_type, attribute_name, resident, size)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(|error| mft_core::error_trace_new_with_error!("Unable to prepare attribute insert", error))?;

        for row in rows {
            for attribute in &row.attributes {
                statement
                    .execute(rusqlite::params![
                        row.record_number,
                        attribute.attribute_type,
                        attribute.attribute_name,
                        attribute.is_resident,
                        attribute.size,
                    ])
                    .map_err(|error| mft_core::error_trace_new_with_error!("Unable to insert attribute row", error))?;
            }
        }
    }
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO alternate_data_streams (record_number, name, resident, size)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|error| mft_core::error_trace_new_with_error!("Unable to prepare ADS insert", error))?;

        for row in rows {
            for stream in &row.alternate_data_streams {
                statement
                    .execute(rusqlite::params![row.record_number, stream.name, stream.is_resident, stream.size])
                    .map_err(|error| mft_core::error_trace_new_with_error!("Unable to insert ADS row", error))?;
            }
        }
    }
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO security_descriptors (record_number, owner_sid, group_sid, dacl, sacl)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(|error| {
                mft_core::error_trace_new_with_error!("Unable to prepare security descriptor insert", error)
            })?;

        for row in rows {
            let has_descriptor: bool = row.security_descriptor_owner_sid.is_some()
                || row.security_descriptor_group_sid.is_some()
                || row.security_descriptor_dacl.is_some()
                || row.security_descriptor_sacl.is_some();
            if !has_descriptor {
                continue;
            }
            statement
                .execute(rusqlite::params![
                    row.record_number,
                    row.security_descriptor_owner_sid,
                    row.security_descriptor_group_sid,
                    row.security_descriptor_dacl,
                    row.security_descriptor_sacl,
                ])
                .map_err(|error| {
                    mft_core::error_trace_new_with_error!("Unable to insert security descriptor row", error)
                })?;
        }
    }
    transaction.commit().map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to commit SQLite transaction", error)
    })
}

fn iso_or_null(time: &mft_datetime::TimestampValue) -> Option<String> {
    let iso: String = time.to_iso8601_string();
    if iso.is_empty() {
        None
    } else {
        Some(iso)
    }
}
