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

use mft_datetime::{Filetime, TimestampValue};
use mft_hashes::RecordHashes;

use super::anomaly::detect_anomalies;
use super::constants::{
    NTFS_ATTRIBUTE_TYPE_DATA, NTFS_ATTRIBUTE_TYPE_FILE_NAME, NTFS_ATTRIBUTE_TYPE_INDEX_ROOT,
    NTFS_ATTRIBUTE_TYPE_OBJECT_ID, NTFS_ATTRIBUTE_TYPE_REPARSE_POINT, NTFS_ATTRIBUTE_TYPE_SECURITY_DESCRIPTOR,
    NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION, NTFS_ATTRIBUTE_TYPE_VOLUME_INFORMATION, NTFS_ATTRIBUTE_TYPE_VOLUME_NAME,
};
use super::record::NtfsRecord;

/// One row of the `mft_attributes` companion table: a coarse summary of an
/// attribute instance this record carries. The decoded record keeps typed
/// fields rather than a raw attribute list, so this is assembled from
/// whichever of those fields are present rather than read back off the
/// attribute chain directly.
pub struct AttributeSummary {
    pub attribute_type: u32,
    pub attribute_name: &'static str,
    pub is_resident: bool,
    pub size: u64,
}

/// One row of the `alternate_data_streams` companion table: a named $DATA
/// stream other than the unnamed primary stream.
pub struct AlternateDataStreamSummary {
    pub name: String,
    pub is_resident: bool,
    pub size: u64,
}

/// A denormalized row of the forensic output schema: one row per MFT
/// record, carrying both the $STANDARD_INFORMATION and preferred
/// $FILE_NAME timestamp sets side by side so a reviewer can compare them
/// without cross-referencing two tables.
///
/// Concrete serialization (CSV, JSON, XML, body-file, timeline, SQLite)
/// lives outside this crate; this struct is the shared row shape every
/// serializer consumes.
pub struct OutputRow {
    pub record_number: u64,
    pub sequence_number: u16,
    pub in_use: bool,
    pub is_directory: bool,
    pub has_ads: bool,

    pub parent_record_number: u64,
    pub parent_sequence_number: u16,
    pub file_name: String,
    pub file_name_namespace: u8,

    /// Filled in by the path resolution pass; `None` until then.
    pub full_path: Option<String>,

    pub std_creation_time: TimestampValue,
    pub std_modification_time: TimestampValue,
    pub std_entry_modification_time: TimestampValue,
    pub std_access_time: TimestampValue,

    pub fn_creation_time: TimestampValue,
    pub fn_modification_time: TimestampValue,
    pub fn_entry_modification_time: TimestampValue,
    pub fn_access_time: TimestampValue,

    pub logical_size: u64,
    pub physical_size: u64,

    pub object_id: Option<String>,
    pub hashes: Option<RecordHashes>,

    pub security_descriptor_owner_sid: Option<String>,
    pub security_descriptor_group_sid: Option<String>,
    pub security_descriptor_dacl: Option<String>,
    pub security_descriptor_sacl: Option<String>,

    pub attributes: Vec<AttributeSummary>,
    pub alternate_data_streams: Vec<AlternateDataStreamSummary>,

    pub anomaly_flags: Vec<String>,
    pub notes: Vec<String>,
}

impl OutputRow {
    /// Builds a row from an assembled record. `utc_offset_minutes` is
    /// applied only to the rendered timestamp fields; the record's stored
    /// FILETIME values are never mutated.
    pub fn from_record(record: &NtfsRecord, utc_offset_minutes: i32) -> Self {
        let zero_filetime: Filetime = Filetime::new(0);

        let (std_creation, std_modification, std_entry_modification, std_access) =
            match &record.standard_information {
                Some(standard_information) => (
                    standard_information.creation_time.to_timestamp_value(utc_offset_minutes),
                    standard_information.modification_time.to_timestamp_value(utc_offset_minutes),
                    standard_information.entry_modification_time.to_timestamp_value(utc_offset_minutes),
                    standard_information.access_time.to_timestamp_value(utc_offset_minutes),
                ),
                None => {
                    let not_set: TimestampValue = zero_filetime.to_timestamp_value(utc_offset_minutes);
                    (not_set, not_set, not_set, not_set)
                }
            };

        let preferred_file_name = record.preferred_file_name();
        let (fn_creation, fn_modification, fn_entry_modification, fn_access, file_name, namespace, parent_reference) =
            match preferred_file_name {
                Some(file_name) => (
                    file_name.creation_time.to_timestamp_value(utc_offset_minutes),
                    file_name.modification_time.to_timestamp_value(utc_offset_minutes),
                    file_name.entry_modification_time.to_timestamp_value(utc_offset_minutes),
                    file_name.access_time.to_timestamp_value(utc_offset_minutes),
                    file_name.name.to_string(),
                    file_name.name_space,
                    file_name.parent_file_reference,
                ),
                None => {
                    let not_set: TimestampValue = zero_filetime.to_timestamp_value(utc_offset_minutes);
                    (not_set, not_set, not_set, not_set, String::new(), 0, 0)
                }
            };

        let logical_size: u64 = record.unnamed_data_stream().map_or(0, |stream| stream.real_size);
        let physical_size: u64 = record.unnamed_data_stream().map_or(0, |stream| stream.allocated_size);
        let has_ads: bool = record.data_streams.iter().any(|stream| !stream.is_unnamed());

        let object_id: Option<String> = record
            .object_id
            .as_ref()
            .map(|object_id| object_id.object_id.to_string());

        let anomaly_flags: Vec<String> = detect_anomalies(record);
        let notes: Vec<String> = record.notes.iter().map(|note| note.to_string()).collect();

        let (owner_sid, group_sid, dacl, sacl) = match &record.security_descriptor {
            Some(descriptor) => (
                non_empty(&descriptor.owner_sid),
                non_empty(&descriptor.group_sid),
                non_empty(&descriptor.dacl),
                non_empty(&descriptor.sacl),
            ),
            None => (None, None, None, None),
        };

        let attributes: Vec<AttributeSummary> = attribute_summaries(record);
        let alternate_data_streams: Vec<AlternateDataStreamSummary> = record
            .data_streams
            .iter()
            .filter(|stream| !stream.is_unnamed())
            .map(|stream| AlternateDataStreamSummary {
                name: stream.name.as_ref().map(|name| name.to_string()).unwrap_or_default(),
                is_resident: stream.is_resident,
                size: stream.real_size,
            })
            .collect();

        Self {
            record_number: record.record_number,
            sequence_number: record.sequence_number,
            in_use: record.is_in_use(),
            is_directory: record.is_classified_as_directory(),
            has_ads: has_ads,
            parent_record_number: super::constants::file_reference_record_number(parent_reference),
            parent_sequence_number: super::constants::file_reference_sequence_number(parent_reference),
            file_name: file_name,
            file_name_namespace: namespace,
            full_path: None,
            std_creation_time: std_creation,
            std_modification_time: std_modification,
            std_entry_modification_time: std_entry_modification,
            std_access_time: std_access,
            fn_creation_time: fn_creation,
            fn_modification_time: fn_modification,
            fn_entry_modification_time: fn_entry_modification,
            fn_access_time: fn_access,
            logical_size: logical_size,
            physical_size: physical_size,
            object_id: object_id,
            hashes: record.hashes.clone(),
            security_descriptor_owner_sid: owner_sid,
            security_descriptor_group_sid: group_sid,
            security_descriptor_dacl: dacl,
            security_descriptor_sacl: sacl,
            attributes: attributes,
            alternate_data_streams: alternate_data_streams,
            anomaly_flags: anomaly_flags,
            notes: notes,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(String::from(value))
    }
}

/// Summarizes whichever typed attribute fields a record carries; see
/// [`AttributeSummary`] for why this isn't read back off a raw attribute
/// list.
fn attribute_summaries(record: &NtfsRecord) -> Vec<AttributeSummary> {
    let mut summaries: Vec<AttributeSummary> = Vec::new();

    if record.standard_information.is_some() {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION,
            attribute_name: "$STANDARD_INFORMATION",
            is_resident: true,
            size: 0,
        });
    }
    for _ in &record.file_names {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_FILE_NAME,
            attribute_name: "$FILE_NAME",
            is_resident: true,
            size: 0,
        });
    }
    if record.object_id.is_some() {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_OBJECT_ID,
            attribute_name: "$OBJECT_ID",
            is_resident: true,
            size: 0,
        });
    }
    if record.security_descriptor.is_some() {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_SECURITY_DESCRIPTOR,
            attribute_name: "$SECURITY_DESCRIPTOR",
            is_resident: true,
            size: 0,
        });
    }
    if record.volume_name.is_some() {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_VOLUME_NAME,
            attribute_name: "$VOLUME_NAME",
            is_resident: true,
            size: 0,
        });
    }
    if record.volume_information.is_some() {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_VOLUME_INFORMATION,
            attribute_name: "$VOLUME_INFORMATION",
            is_resident: true,
            size: 0,
        });
    }
    for stream in &record.data_streams {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_DATA,
            attribute_name: "$DATA",
            is_resident: stream.is_resident,
            size: stream.real_size,
        });
    }
    if record.has_index_root {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_INDEX_ROOT,
            attribute_name: "$INDEX_ROOT",
            is_resident: true,
            size: 0,
        });
    }
    if record.has_reparse_point {
        summaries.push(AttributeSummary {
            attribute_type: NTFS_ATTRIBUTE_TYPE_REPARSE_POINT,
            attribute_name: "$REPARSE_POINT",
            is_resident: true,
            size: 0,
        });
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::file_name::NtfsFileName;

    fn record_with_file_name(name: &str) -> NtfsRecord {
        let mut file_name: NtfsFileName = NtfsFileName::new();
        file_name.name = mft_types::Ucs2String::from(name);
        file_name.parent_file_reference = 0x0005_0000_0000_0005;

        NtfsRecord {
            record_number: 42,
            sequence_number: 2,
            used_size: 0,
            allocated_size: 1024,
            flags: 0x0001,
            base_record_reference: 0,
            next_attribute_id: 0,
            standard_information: None,
            file_names: vec![file_name],
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

    #[test]
    fn test_from_record_basic_fields() {
        let record: NtfsRecord = record_with_file_name("readme.txt");
        let row: OutputRow = OutputRow::from_record(&record, 0);

        assert_eq!(row.record_number, 42);
        assert_eq!(row.file_name, "readme.txt");
        assert_eq!(row.parent_record_number, 5);
        assert!(row.in_use);
        assert!(row.full_path.is_none());
    }
}
