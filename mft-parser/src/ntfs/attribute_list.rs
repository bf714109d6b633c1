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

use mft_types::{ByteReader, Ucs2String};

use super::constants::file_reference_record_number;
use super::errors::{NtfsErrorKind, NtfsNote};

/// A single $ATTRIBUTE_LIST entry: one attribute instance that may live in
/// an extension record rather than the base record.
pub struct NtfsAttributeListEntry {
    pub attribute_type: u32,
    pub name: Option<Ucs2String>,
    pub starting_vcn: u64,
    pub file_reference: u64,
}

impl NtfsAttributeListEntry {
    pub fn referenced_record_number(&self) -> u64 {
        file_reference_record_number(self.file_reference)
    }
}

/// Decodes a $ATTRIBUTE_LIST attribute's resident content into its entries.
/// The assembler collects the set of referenced record numbers into a
/// pending-join set for the second, extension-folding pass.
pub fn decode_attribute_list(data: &[u8], notes: &mut Vec<NtfsNote>) -> Vec<NtfsAttributeListEntry> {
    let reader: ByteReader = ByteReader::new(data);
    let mut entries: Vec<NtfsAttributeListEntry> = Vec::new();
    let mut offset: usize = 0;

    while offset + 26 <= data.len() {
        let attribute_type: u32 = match reader.read_u32(offset) {
            Ok(value) => value,
            Err(_) => break,
        };
        let entry_length: u16 = reader.read_u16(offset + 4).unwrap_or(0);
        if entry_length == 0 {
            notes.push(NtfsNote::new(
                NtfsErrorKind::AttributeOverflow,
                "attribute list entry has zero length",
            ));
            break;
        }
        let name_size: u8 = reader.read_u8(offset + 6).unwrap_or(0);
        let name_offset: u8 = reader.read_u8(offset + 7).unwrap_or(0);
        let starting_vcn: u64 = reader.read_u64(offset + 8).unwrap_or(0);
        let file_reference: u64 = reader.read_u64(offset + 16).unwrap_or(0);

        let name: Option<Ucs2String> = if name_size > 0 {
            let name_start: usize = offset + name_offset as usize;
            let name_length: usize = (name_size as usize) * 2;
            reader
                .read_fixed_bytes(name_start, name_length)
                .ok()
                .map(Ucs2String::from_le_bytes)
        } else {
            None
        };

        entries.push(NtfsAttributeListEntry {
            attribute_type: attribute_type,
            name: name,
            starting_vcn: starting_vcn,
            file_reference: file_reference,
        });

        offset += entry_length as usize;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_entry() {
        let data: Vec<u8> = vec![
            0x80, 0x00, 0x00, 0x00, 0x28, 0x00, 0x04, 0x1a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0xc8, 0x08, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x24, 0x00,
            0x53, 0x00, 0x44, 0x00, 0x53, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut notes: Vec<NtfsNote> = Vec::new();
        let entries: Vec<NtfsAttributeListEntry> = decode_attribute_list(&data, &mut notes);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attribute_type, 0x80);
        assert_eq!(entries[0].referenced_record_number(), 0x0008c8);
    }
}
