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

use mft_hashes::RecordHashes;

use super::attribute::{NtfsAttribute, decode_attribute_payload};
use super::attribute_header::read_attribute;
use super::attribute_list::NtfsAttributeListEntry;
use super::constants::file_reference_record_number;
use super::data_attribute::{DEFAULT_RESIDENT_DATA_CAP, NtfsDataStream};
use super::errors::{NtfsErrorKind, NtfsNote};
use super::file_name::NtfsFileName;
use super::fixup::apply_fixup;
use super::object_id::NtfsObjectId;
use super::record_header::NtfsRecordHeader;
use super::security_descriptor::NtfsSecurityDescriptor;
use super::standard_information::NtfsStandardInformation;
use super::volume_information::NtfsVolumeInformation;
use super::volume_name::NtfsVolumeName;

/// A fully decoded Master File Table record: the header, the preferred
/// $FILE_NAME, the $STANDARD_INFORMATION, every $DATA stream, and whatever
/// other attribute instances were present, plus the notes accumulated while
/// getting there.
///
/// Built by [`assemble_record`] in one pass over a single (fixup-corrected)
/// record buffer; extension records are folded into their base record by a
/// second pass the streaming driver runs after every primary record in a
/// chunk has been assembled.
pub struct NtfsRecord {
    pub record_number: u64,
    pub sequence_number: u16,
    pub used_size: u32,
    pub allocated_size: u32,
    pub flags: u16,
    pub base_record_reference: u64,
    pub next_attribute_id: u16,

    pub standard_information: Option<NtfsStandardInformation>,
    pub file_names: Vec<NtfsFileName>,
    pub object_id: Option<NtfsObjectId>,
    pub security_descriptor: Option<NtfsSecurityDescriptor>,
    pub volume_name: Option<NtfsVolumeName>,
    pub volume_information: Option<NtfsVolumeInformation>,
    pub data_streams: Vec<NtfsDataStream>,
    pub has_index_root: bool,
    pub has_reparse_point: bool,

    /// Record numbers of extension records this record's $ATTRIBUTE_LIST
    /// names, collected for the extension-folding pass.
    pub pending_extensions: Vec<u64>,
    pub is_extension_incomplete: bool,

    pub hashes: Option<RecordHashes>,
    pub notes: Vec<NtfsNote>,
}

impl NtfsRecord {
    pub fn is_in_use(&self) -> bool {
        self.flags & super::constants::NTFS_RECORD_FLAG_IN_USE != 0
    }

    pub fn is_directory(&self) -> bool {
        self.flags & super::constants::NTFS_RECORD_FLAG_DIRECTORY != 0
    }

    /// The directory classification emitted to rows and summaries: the
    /// has-directory flag folded together with the presence of an
    /// $INDEX_ROOT attribute, since either alone can be wrong on a record
    /// the `flags-inconsistent` anomaly below is built to catch. Use
    /// [`NtfsRecord::is_directory`] directly where the raw flag, rather
    /// than this classification, is what's being cross-checked.
    pub fn is_classified_as_directory(&self) -> bool {
        self.is_directory() || self.has_index_root
    }

    pub fn is_extension(&self) -> bool {
        self.base_record_reference != 0
    }

    pub fn base_record_number(&self) -> u64 {
        file_reference_record_number(self.base_record_reference)
    }

    /// The $FILE_NAME instance the output schema should prefer, picked by
    /// namespace priority (Win32+DOS highest, DOS lowest).
    pub fn preferred_file_name(&self) -> Option<&NtfsFileName> {
        self.file_names
            .iter()
            .max_by_key(|file_name| file_name.namespace_priority())
    }

    pub fn unnamed_data_stream(&self) -> Option<&NtfsDataStream> {
        self.data_streams.iter().find(|stream| stream.is_unnamed())
    }

    /// Folds another record's (an extension record's) attributes into this
    /// one. Only additive: an extension record never overrides a field the
    /// base record already carries a value for.
    pub fn absorb_extension(&mut self, extension: NtfsRecord) {
        if self.standard_information.is_none() {
            self.standard_information = extension.standard_information;
        }
        self.file_names.extend(extension.file_names);
        if self.object_id.is_none() {
            self.object_id = extension.object_id;
        }
        if self.security_descriptor.is_none() {
            self.security_descriptor = extension.security_descriptor;
        }
        if self.volume_name.is_none() {
            self.volume_name = extension.volume_name;
        }
        if self.volume_information.is_none() {
            self.volume_information = extension.volume_information;
        }
        self.data_streams.extend(extension.data_streams);
        self.has_index_root = self.has_index_root || extension.has_index_root;
        self.has_reparse_point = self.has_reparse_point || extension.has_reparse_point;
        self.notes.extend(extension.notes);
    }
}

/// Verifies the fixup, decodes the common header, walks the attribute
/// chain, and assembles a record. `record_size` is the caller-inferred MFT
/// record size (1024 or 4096); `data` must be exactly that length.
///
/// A bad signature is reported in `notes` but does not abort assembly: the
/// header fields and whatever attributes parse are still returned, letting
/// the driver decide whether the record is worth emitting.
pub fn assemble_record(mut data: Vec<u8>, resident_data_cap: Option<usize>) -> NtfsRecord {
    let resident_data_cap: usize = resident_data_cap.unwrap_or(DEFAULT_RESIDENT_DATA_CAP);
    let mut notes: Vec<NtfsNote> = Vec::new();

    let mut header: NtfsRecordHeader = NtfsRecordHeader::new();
    if let Err(error) = header.read_data(&data) {
        notes.push(NtfsNote::new(NtfsErrorKind::Truncated, error.to_string()));
        return empty_record(notes);
    }

    if header.has_baad_signature() {
        notes.push(NtfsNote::new(
            NtfsErrorKind::BadSignature,
            "record carries the file-system-marked-bad signature",
        ));
    } else if !header.has_file_signature() {
        notes.push(NtfsNote::new(
            NtfsErrorKind::BadSignature,
            "record signature is neither FILE nor BAAD",
        ));
    }

    if let Err(note) = apply_fixup(&mut data, header.fixup_offset, header.fixup_count, 512) {
        notes.push(note);
    }

    let mut record: NtfsRecord = NtfsRecord {
        record_number: header.record_number.unwrap_or(0) as u64,
        sequence_number: header.sequence_number,
        used_size: header.used_size,
        allocated_size: header.allocated_size,
        flags: header.flags,
        base_record_reference: header.base_record_reference,
        next_attribute_id: header.next_attribute_id,
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
        notes: notes,
    };

    let used_size: usize = (header.used_size as usize).min(data.len());
    let mut offset: usize = header.attributes_offset as usize;

    while offset < used_size {
        let (attribute_header, next_offset) = match read_attribute(&data, offset, &mut record.notes) {
            Ok(result) => result,
            Err(()) => break,
        };
        if next_offset <= offset {
            // A zero-length or non-advancing attribute would loop forever.
            break;
        }

        match decode_attribute_payload(&attribute_header, resident_data_cap, &mut record.notes) {
            NtfsAttribute::StandardInformation(value) => record.standard_information = Some(value),
            NtfsAttribute::AttributeList(entries) => {
                collect_pending_extensions(&entries, &mut record.pending_extensions);
            }
            NtfsAttribute::FileName(value) => record.file_names.push(value),
            NtfsAttribute::ObjectId(value) => record.object_id = Some(value),
            NtfsAttribute::SecurityDescriptor(value) => record.security_descriptor = Some(value),
            NtfsAttribute::VolumeName(value) => record.volume_name = Some(value),
            NtfsAttribute::VolumeInformation(value) => record.volume_information = Some(value),
            NtfsAttribute::Data(value) => record.data_streams.push(value),
            NtfsAttribute::IndexRoot(_) => record.has_index_root = true,
            NtfsAttribute::IndexAllocation => {}
            NtfsAttribute::Bitmap => {}
            NtfsAttribute::ReparsePoint => record.has_reparse_point = true,
            NtfsAttribute::Unknown(_) => {}
        }

        offset = next_offset;
    }

    record
}

fn collect_pending_extensions(entries: &[NtfsAttributeListEntry], pending: &mut Vec<u64>) {
    for entry in entries {
        let record_number: u64 = entry.referenced_record_number();
        if record_number != 0 && !pending.contains(&record_number) {
            pending.push(record_number);
        }
    }
}

fn empty_record(notes: Vec<NtfsNote>) -> NtfsRecord {
    NtfsRecord {
        record_number: 0,
        sequence_number: 0,
        used_size: 0,
        allocated_size: 0,
        flags: 0,
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
        notes: notes,
    }
}
