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

use mft_core::ErrorTrace;
use mft_layout_map::LayoutMap;
use mft_types::{bytes_to_u16_le, bytes_to_u32_le, bytes_to_u64_le};

use super::constants::{NTFS_RECORD_SIGNATURE_BAAD, NTFS_RECORD_SIGNATURE_FILE};

#[derive(LayoutMap)]
#[layout_map(
    member(name = "signature", data_type = "[u8; 4]"),
    member(name = "fixup_offset", data_type = "u16"),
    member(name = "fixup_count", data_type = "u16"),
    member(name = "logfile_sequence_number", data_type = "u64", format = "hex"),
    member(name = "sequence_number", data_type = "u16"),
    member(name = "hard_link_count", data_type = "u16"),
    member(name = "attributes_offset", data_type = "u16"),
    member(name = "flags", data_type = "u16", format = "hex"),
    member(name = "used_size", data_type = "u32"),
    member(name = "allocated_size", data_type = "u32"),
    member(name = "base_record_reference", data_type = "u64", format = "hex"),
    member(name = "next_attribute_id", data_type = "u16")
)]
/// Common header of a Master File Table (MFT) record, present identically
/// at offset 0 whether the record is in use, deleted, or an extension.
pub struct NtfsRecordHeader {
    /// Signature, "FILE" or "BAAD".
    pub signature: [u8; 4],

    /// Offset of the fixup array from the start of the record.
    pub fixup_offset: u16,

    /// Number of entries in the fixup array (sectors + 1).
    pub fixup_count: u16,

    /// $LogFile sequence number.
    pub logfile_sequence_number: u64,

    /// Sequence number, incremented each time the record slot is reused.
    pub sequence_number: u16,

    /// Reference count from directory entries.
    pub hard_link_count: u16,

    /// Offset of the first attribute.
    pub attributes_offset: u16,

    /// Record flags (in-use, directory, extension, has-special-index).
    pub flags: u16,

    /// Number of bytes of the record actually in use.
    pub used_size: u32,

    /// Number of bytes allocated to the record (usually the record size).
    pub allocated_size: u32,

    /// File reference of the base record, nonzero iff this is an extension.
    pub base_record_reference: u64,

    /// Identifier to assign to the next attribute added to this record.
    pub next_attribute_id: u16,

    /// MFT record number, read separately since its offset and width vary
    /// between the NTFS 1.2 (absent) and 3.x (u32 at offset 44) layouts.
    pub record_number: Option<u32>,
}

impl NtfsRecordHeader {
    pub fn new() -> Self {
        Self {
            signature: [0; 4],
            fixup_offset: 0,
            fixup_count: 0,
            logfile_sequence_number: 0,
            sequence_number: 0,
            hard_link_count: 0,
            attributes_offset: 0,
            flags: 0,
            used_size: 0,
            allocated_size: 0,
            base_record_reference: 0,
            next_attribute_id: 0,
            record_number: None,
        }
    }

    /// Reads the common header fields from a (fixup-corrected) record
    /// buffer. Does not validate the signature; callers distinguish "FILE"
    /// from "BAAD" and from garbage themselves.
    pub fn read_data(&mut self, data: &[u8]) -> Result<(), ErrorTrace> {
        if data.len() < 48 {
            return Err(mft_core::error_trace_new!(
                "Unsupported NTFS record header data size"
            ));
        }
        self.signature.copy_from_slice(&data[0..4]);
        self.fixup_offset = bytes_to_u16_le!(data, 4);
        self.fixup_count = bytes_to_u16_le!(data, 6);
        self.logfile_sequence_number = bytes_to_u64_le!(data, 8);
        self.sequence_number = bytes_to_u16_le!(data, 16);
        self.hard_link_count = bytes_to_u16_le!(data, 18);
        self.attributes_offset = bytes_to_u16_le!(data, 20);
        self.flags = bytes_to_u16_le!(data, 22);
        self.used_size = bytes_to_u32_le!(data, 24);
        self.allocated_size = bytes_to_u32_le!(data, 28);
        self.base_record_reference = bytes_to_u64_le!(data, 32);
        self.next_attribute_id = bytes_to_u16_le!(data, 40);

        if data.len() >= 48 {
            self.record_number = Some(bytes_to_u32_le!(data, 44));
        }
        Ok(())
    }

    /// Whether the record signature is the in-use/recoverable "FILE" marker.
    pub fn has_file_signature(&self) -> bool {
        self.signature == NTFS_RECORD_SIGNATURE_FILE
    }

    /// Whether the record signature is the file-system-marked-bad "BAAD"
    /// marker; such records are still decoded but flagged corrupt.
    pub fn has_baad_signature(&self) -> bool {
        self.signature == NTFS_RECORD_SIGNATURE_BAAD
    }

    pub fn is_in_use(&self) -> bool {
        self.flags & super::constants::NTFS_RECORD_FLAG_IN_USE != 0
    }

    pub fn is_directory(&self) -> bool {
        self.flags & super::constants::NTFS_RECORD_FLAG_DIRECTORY != 0
    }

    pub fn is_extension(&self) -> bool {
        self.base_record_reference != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_data() -> Vec<u8> {
        let mut data: Vec<u8> = vec![0u8; 56];
        data[0..4].copy_from_slice(b"FILE");
        data[4] = 0x30;
        data[6] = 0x03;
        data[16] = 0x01;
        data[20] = 0x38;
        data[22] = 0x01; // in-use
        data[24] = 0xe8;
        data[25] = 0x01;
        data[28] = 0x00;
        data[29] = 0x04;
        data[44] = 0x00;
        return data;
    }

    #[test]
    fn test_read_data() -> Result<(), ErrorTrace> {
        let mut header: NtfsRecordHeader = NtfsRecordHeader::new();
        header.read_data(&get_test_data())?;

        assert!(header.has_file_signature());
        assert_eq!(header.fixup_offset, 0x30);
        assert_eq!(header.fixup_count, 3);
        assert_eq!(header.sequence_number, 1);
        assert_eq!(header.attributes_offset, 0x38);
        assert!(header.is_in_use());
        assert_eq!(header.used_size, 0x1e8);
        assert_eq!(header.allocated_size, 0x400);
        assert!(!header.is_extension());

        Ok(())
    }

    #[test]
    fn test_read_data_with_unsupported_data_size() {
        let mut header: NtfsRecordHeader = NtfsRecordHeader::new();
        let result = header.read_data(&[0u8; 10]);
        assert!(result.is_err());
    }
}
