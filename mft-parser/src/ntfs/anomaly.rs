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

use super::errors::NtfsErrorKind;
use super::record::NtfsRecord;

/// Checks that are local to a single record, run during assembly.
///
/// `flags-inconsistent` also has a cross-record half (in-use bit clear but
/// the $FILE_NAME parent reference points at an active directory), run by
/// the streaming driver once every record's parent is known; that half is
/// applied directly in [`super::driver::build_rows`] and appended to the
/// flags this function returns.
pub fn detect_anomalies(record: &NtfsRecord) -> Vec<String> {
    let mut flags: Vec<String> = Vec::new();

    if let Some(standard_information) = &record.standard_information {
        if let Some(file_name) = record.preferred_file_name() {
            if standard_information.creation_time.timestamp != 0
                && file_name.creation_time.timestamp != 0
                && standard_information.creation_time.timestamp < file_name.creation_time.timestamp
            {
                flags.push(String::from("std-fn-shift"));
            }
        }

        let creation_time = &standard_information.creation_time;
        if creation_time.timestamp != 0 && (creation_time.timestamp % 10_000_000) == 0 {
            flags.push(String::from("usec-zero"));
        }
    }

    if record.is_directory() != record.has_index_root && record.is_in_use() {
        flags.push(String::from("flags-inconsistent"));
    }

    if let Some(stream) = record.unnamed_data_stream() {
        if stream.real_size > stream.allocated_size {
            flags.push(String::from("size-mismatch"));
        }
    }

    let has_truncation_note: bool = record
        .notes
        .iter()
        .any(|note| matches!(note.kind, NtfsErrorKind::Truncated | NtfsErrorKind::AttributeOverflow));
    if has_truncation_note {
        flags.push(String::from("truncated-attributes"));
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::errors::NtfsNote;
    use super::super::file_name::NtfsFileName;
    use super::super::standard_information::NtfsStandardInformation;
    use mft_datetime::Filetime;

    fn bare_record() -> NtfsRecord {
        NtfsRecord {
            record_number: 1,
            sequence_number: 1,
            used_size: 0,
            allocated_size: 1024,
            flags: 0x0001,
            base_record_reference: 0,
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

    #[test]
    fn test_std_fn_shift_detected() {
        let mut record: NtfsRecord = bare_record();

        let mut standard_information: NtfsStandardInformation = NtfsStandardInformation::new();
        standard_information.creation_time = Filetime::new(100);
        record.standard_information = Some(standard_information);

        let mut file_name: NtfsFileName = NtfsFileName::new();
        file_name.creation_time = Filetime::new(200);
        record.file_names.push(file_name);

        assert!(detect_anomalies(&record).contains(&String::from("std-fn-shift")));
    }

    #[test]
    fn test_truncated_attributes_flag_from_notes() {
        let mut record: NtfsRecord = bare_record();
        record.notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "short buffer"));

        assert!(detect_anomalies(&record).contains(&String::from("truncated-attributes")));
    }

    #[test]
    fn test_no_anomalies_for_clean_record() {
        let record: NtfsRecord = bare_record();
        assert!(detect_anomalies(&record).is_empty());
    }
}
