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

use mft_core::mediator::Mediator;
use mft_types::{ByteReader, Ucs2String};

use super::data_run::{NtfsDataRun, decode_data_runs};
use super::errors::{NtfsErrorKind, NtfsNote};

/// A single decoded attribute header plus its resident/non-resident body,
/// still carrying the raw content slice — per-type payload decoding
/// happens one layer up, in `attribute.rs`.
pub struct NtfsAttributeHeader<'a> {
    pub attribute_type: u32,
    pub total_length: u32,
    pub is_resident: bool,
    pub name: Option<Ucs2String>,
    pub flags: u16,
    pub attribute_id: u16,

    /// Resident content, or the decoded run list content marker for
    /// non-resident attributes (empty; use `data_runs` instead).
    pub resident_content: &'a [u8],

    pub data_runs: Vec<NtfsDataRun>,
    pub allocated_size: u64,
    pub real_size: u64,
    pub initialized_size: u64,
    pub starting_vcn: u64,
    pub ending_vcn: u64,
}

impl<'a> NtfsAttributeHeader<'a> {
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & 0x00ff != 0
    }

    pub fn is_sparse(&self) -> bool {
        self.flags & 0x8000 != 0
    }
}

/// Reads one attribute, starting at `offset` in `data`, returning the
/// decoded header/body and the offset of the following attribute (always
/// `offset + total_length`, per the header-declared advance policy: a
/// decode failure inside an attribute still lets the caller skip over it).
pub fn read_attribute<'a>(
    data: &'a [u8],
    offset: usize,
    notes: &mut Vec<NtfsNote>,
) -> Result<(NtfsAttributeHeader<'a>, usize), ()> {
    let reader: ByteReader = ByteReader::new(data);
    let mediator = Mediator::current();

    let attribute_type: u32 = match reader.read_u32(offset) {
        Ok(value) => value,
        Err(_) => {
            notes.push(NtfsNote::new(
                NtfsErrorKind::AttributeOverflow,
                "attribute header runs past the end of the record",
            ));
            return Err(());
        }
    };

    if attribute_type == super::constants::NTFS_ATTRIBUTE_TYPE_END_OF_CHAIN {
        return Err(());
    }

    let total_length: u32 = match reader.read_u32(offset + 4) {
        Ok(value) => value,
        Err(_) => {
            notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "truncated attribute header"));
            return Err(());
        }
    };
    if total_length == 0 {
        // Treated as end-of-chain per the attribute decoder's error policy.
        return Err(());
    }

    let non_resident_flag: u8 = reader.read_u8(offset + 8).unwrap_or(0);
    let name_size: u8 = reader.read_u8(offset + 9).unwrap_or(0);
    let name_offset: u16 = reader.read_u16(offset + 10).unwrap_or(0);
    let flags: u16 = reader.read_u16(offset + 12).unwrap_or(0);
    let attribute_id: u16 = reader.read_u16(offset + 14).unwrap_or(0);

    if mediator.debug_output {
        mediator.debug_print(format!(
            "attribute type 0x{:08x} total_length {} non_resident {} at offset {}\n",
            attribute_type, total_length, non_resident_flag, offset
        ));
    }

    let name: Option<Ucs2String> = if name_size > 0 {
        let name_start: usize = offset + name_offset as usize;
        let name_length: usize = (name_size as usize) * 2;
        match reader.read_fixed_bytes(name_start, name_length) {
            Ok(bytes) => Some(Ucs2String::from_le_bytes(bytes)),
            Err(_) => {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "attribute name out of bounds"));
                None
            }
        }
    } else {
        None
    };

    let is_resident: bool = non_resident_flag & 0x01 == 0;
    let next_offset: usize = offset + total_length as usize;

    if is_resident {
        let content_size: u32 = reader.read_u32(offset + 16).unwrap_or(0);
        let content_offset: u16 = reader.read_u16(offset + 20).unwrap_or(0);

        let content_start: usize = offset + content_offset as usize;
        let resident_content: &[u8] = match reader.read_fixed_bytes(content_start, content_size as usize) {
            Ok(bytes) => bytes,
            Err(_) => {
                notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "resident content out of bounds"));
                &[]
            }
        };

        Ok((
            NtfsAttributeHeader {
                attribute_type: attribute_type,
                total_length: total_length,
                is_resident: true,
                name: name,
                flags: flags,
                attribute_id: attribute_id,
                resident_content: resident_content,
                data_runs: Vec::new(),
                allocated_size: content_size as u64,
                real_size: content_size as u64,
                initialized_size: content_size as u64,
                starting_vcn: 0,
                ending_vcn: 0,
            },
            next_offset,
        ))
    } else {
        let starting_vcn: u64 = reader.read_u64(offset + 16).unwrap_or(0);
        let ending_vcn: u64 = reader.read_u64(offset + 24).unwrap_or(0);
        let data_runs_offset: u16 = reader.read_u16(offset + 32).unwrap_or(0);
        let allocated_size: u64 = reader.read_u64(offset + 40).unwrap_or(0);
        let real_size: u64 = reader.read_u64(offset + 48).unwrap_or(0);
        let initialized_size: u64 = reader.read_u64(offset + 56).unwrap_or(0);

        let data_runs: Vec<NtfsDataRun> =
            decode_data_runs(data, offset + data_runs_offset as usize, notes);

        Ok((
            NtfsAttributeHeader {
                attribute_type: attribute_type,
                total_length: total_length,
                is_resident: false,
                name: name,
                flags: flags,
                attribute_id: attribute_id,
                resident_content: &[],
                data_runs: data_runs,
                allocated_size: allocated_size,
                real_size: real_size,
                initialized_size: initialized_size,
                starting_vcn: starting_vcn,
                ending_vcn: ending_vcn,
            },
            next_offset,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::constants::NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION;

    #[test]
    fn test_read_resident_attribute() {
        // type=0x10, total_length=0x60, resident, name_size=0, content_offset=0x18, content_size=0x30
        let mut data: Vec<u8> = vec![0u8; 0x60];
        data[0..4].copy_from_slice(&0x10u32.to_le_bytes());
        data[4..8].copy_from_slice(&0x60u32.to_le_bytes());
        data[8] = 0;
        data[9] = 0;
        data[16..20].copy_from_slice(&0x30u32.to_le_bytes());
        data[20..22].copy_from_slice(&0x18u16.to_le_bytes());

        let mut notes: Vec<NtfsNote> = Vec::new();
        let (header, next_offset) = read_attribute(&data, 0, &mut notes).unwrap();

        assert_eq!(header.attribute_type, NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION);
        assert!(header.is_resident);
        assert_eq!(header.resident_content.len(), 0x30);
        assert_eq!(next_offset, 0x60);
    }

    #[test]
    fn test_read_attribute_stops_at_end_of_chain() {
        let data: Vec<u8> = vec![0xff, 0xff, 0xff, 0xff];
        let mut notes: Vec<NtfsNote> = Vec::new();
        assert!(read_attribute(&data, 0, &mut notes).is_err());
        assert!(notes.is_empty());
    }
}
