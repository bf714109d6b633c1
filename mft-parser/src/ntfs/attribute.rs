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

use super::attribute_header::NtfsAttributeHeader;
use super::attribute_list::{NtfsAttributeListEntry, decode_attribute_list};
use super::constants::{
    NTFS_ATTRIBUTE_TYPE_ATTRIBUTE_LIST, NTFS_ATTRIBUTE_TYPE_BITMAP, NTFS_ATTRIBUTE_TYPE_DATA,
    NTFS_ATTRIBUTE_TYPE_FILE_NAME, NTFS_ATTRIBUTE_TYPE_INDEX_ALLOCATION,
    NTFS_ATTRIBUTE_TYPE_INDEX_ROOT, NTFS_ATTRIBUTE_TYPE_OBJECT_ID,
    NTFS_ATTRIBUTE_TYPE_REPARSE_POINT, NTFS_ATTRIBUTE_TYPE_SECURITY_DESCRIPTOR,
    NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION, NTFS_ATTRIBUTE_TYPE_VOLUME_INFORMATION,
    NTFS_ATTRIBUTE_TYPE_VOLUME_NAME,
};
use super::data_attribute::NtfsDataStream;
use super::errors::{NtfsErrorKind, NtfsNote};
use super::file_name::NtfsFileName;
use super::index::NtfsIndexRoot;
use super::object_id::NtfsObjectId;
use super::reparse_point::decode_reparse_point;
use super::security_descriptor::{NtfsSecurityDescriptor, decode_security_descriptor};
use super::standard_information::NtfsStandardInformation;
use super::volume_information::NtfsVolumeInformation;
use super::volume_name::NtfsVolumeName;

/// A tagged sum type over the decoded payload of one attribute instance.
///
/// Replaces the dynamic dispatch the analyzer this crate is modeled on
/// used for attribute classes with a type-code-indexed table of decoders,
/// built in [`decode_attribute_payload`].
pub enum NtfsAttribute {
    StandardInformation(NtfsStandardInformation),
    AttributeList(Vec<NtfsAttributeListEntry>),
    FileName(NtfsFileName),
    ObjectId(NtfsObjectId),
    SecurityDescriptor(NtfsSecurityDescriptor),
    VolumeName(NtfsVolumeName),
    VolumeInformation(NtfsVolumeInformation),
    Data(NtfsDataStream),
    IndexRoot(NtfsIndexRoot),
    IndexAllocation,
    Bitmap,
    ReparsePoint,
    Unknown(u32),
}

/// Dispatches a decoded attribute header to its per-type payload decoder.
///
/// A payload decode failure does not propagate: it is recorded in `notes`
/// and a best-effort (usually default) value is returned, matching the
/// attribute decoder's "advance by header length, never abort" policy.
pub fn decode_attribute_payload(
    header: &NtfsAttributeHeader,
    resident_data_cap: usize,
    notes: &mut Vec<NtfsNote>,
) -> NtfsAttribute {
    match header.attribute_type {
        NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION => {
            let mut value: NtfsStandardInformation = NtfsStandardInformation::new();
            if let Err(error) = value.read_data(header.resident_content) {
                notes.push(NtfsNote::new(NtfsErrorKind::MalformedTimestamp, error.to_string()));
            }
            NtfsAttribute::StandardInformation(value)
        }
        NTFS_ATTRIBUTE_TYPE_ATTRIBUTE_LIST => {
            NtfsAttribute::AttributeList(decode_attribute_list(header.resident_content, notes))
        }
        NTFS_ATTRIBUTE_TYPE_FILE_NAME => {
            let mut value: NtfsFileName = NtfsFileName::new();
            if let Err(error) = value.read_data(header.resident_content) {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, error.to_string()));
            }
            NtfsAttribute::FileName(value)
        }
        NTFS_ATTRIBUTE_TYPE_OBJECT_ID => match NtfsObjectId::read_data(header.resident_content) {
            Some(value) => NtfsAttribute::ObjectId(value),
            None => {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "object id content too short"));
                NtfsAttribute::ObjectId(NtfsObjectId::new())
            }
        },
        NTFS_ATTRIBUTE_TYPE_SECURITY_DESCRIPTOR => {
            NtfsAttribute::SecurityDescriptor(decode_security_descriptor(header.resident_content, notes))
        }
        NTFS_ATTRIBUTE_TYPE_VOLUME_NAME => {
            NtfsAttribute::VolumeName(NtfsVolumeName::read_data(header.resident_content))
        }
        NTFS_ATTRIBUTE_TYPE_VOLUME_INFORMATION => {
            let mut value: NtfsVolumeInformation = NtfsVolumeInformation::new();
            if let Err(error) = value.read_data(header.resident_content) {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, error.to_string()));
            }
            NtfsAttribute::VolumeInformation(value)
        }
        NTFS_ATTRIBUTE_TYPE_DATA => {
            let resident_content: Vec<u8> = if header.is_resident {
                let retained: usize = header.resident_content.len().min(resident_data_cap);
                header.resident_content[..retained].to_vec()
            } else {
                Vec::new()
            };
            NtfsAttribute::Data(NtfsDataStream {
                name: header.name.clone(),
                is_resident: header.is_resident,
                resident_content: resident_content,
                data_runs: header.data_runs.clone(),
                allocated_size: header.allocated_size,
                real_size: header.real_size,
            })
        }
        NTFS_ATTRIBUTE_TYPE_INDEX_ROOT => {
            let mut value: NtfsIndexRoot = NtfsIndexRoot::new();
            if let Err(error) = value.read_data(header.resident_content) {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, error.to_string()));
            }
            NtfsAttribute::IndexRoot(value)
        }
        NTFS_ATTRIBUTE_TYPE_INDEX_ALLOCATION => NtfsAttribute::IndexAllocation,
        NTFS_ATTRIBUTE_TYPE_BITMAP => NtfsAttribute::Bitmap,
        NTFS_ATTRIBUTE_TYPE_REPARSE_POINT => {
            decode_reparse_point(header.resident_content, notes);
            NtfsAttribute::ReparsePoint
        }
        other => {
            notes.push(NtfsNote::new(NtfsErrorKind::UnknownAttributeType, format!("attribute type 0x{:08x}", other)));
            NtfsAttribute::Unknown(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident_header(attribute_type: u32, content: &'static [u8]) -> NtfsAttributeHeader<'static> {
        NtfsAttributeHeader {
            attribute_type: attribute_type,
            total_length: 0,
            is_resident: true,
            name: None,
            flags: 0,
            attribute_id: 0,
            resident_content: content,
            data_runs: Vec::new(),
            allocated_size: content.len() as u64,
            real_size: content.len() as u64,
            initialized_size: content.len() as u64,
            starting_vcn: 0,
            ending_vcn: 0,
        }
    }

    #[test]
    fn test_unknown_type_reports_note() {
        let header: NtfsAttributeHeader = resident_header(0x00001234, &[]);
        let mut notes: Vec<NtfsNote> = Vec::new();
        let attribute: NtfsAttribute = decode_attribute_payload(&header, 64 * 1024, &mut notes);

        assert!(matches!(attribute, NtfsAttribute::Unknown(0x1234)));
        assert_eq!(notes[0].kind, NtfsErrorKind::UnknownAttributeType);
    }

    #[test]
    fn test_data_attribute_is_capped() {
        static CONTENT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
        let header: NtfsAttributeHeader = resident_header(NTFS_ATTRIBUTE_TYPE_DATA, &CONTENT);
        let mut notes: Vec<NtfsNote> = Vec::new();

        match decode_attribute_payload(&header, 4, &mut notes) {
            NtfsAttribute::Data(stream) => assert_eq!(stream.resident_content.len(), 4),
            _ => panic!("expected a data attribute"),
        }
    }
}
