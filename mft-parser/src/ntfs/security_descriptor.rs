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

use mft_types::ByteReader;

use super::errors::{NtfsErrorKind, NtfsNote};

/// Best-effort rendering of a $SECURITY_DESCRIPTOR attribute.
///
/// A malformed descriptor (truncated SID, unsupported revision) yields
/// empty strings and a note rather than failing the record.
#[derive(Default)]
pub struct NtfsSecurityDescriptor {
    pub owner_sid: String,
    pub group_sid: String,
    pub dacl: String,
    pub sacl: String,
}

/// Renders a self-relative security descriptor's SID/ACL fields into
/// display strings. Offsets are read from the fixed self-relative header;
/// anything that does not parse is left empty with a note attached.
pub fn decode_security_descriptor(data: &[u8], notes: &mut Vec<NtfsNote>) -> NtfsSecurityDescriptor {
    let reader: ByteReader = ByteReader::new(data);
    let mut descriptor: NtfsSecurityDescriptor = NtfsSecurityDescriptor::default();

    if data.len() < 20 {
        notes.push(NtfsNote::new(
            NtfsErrorKind::AttributeOverflow,
            "security descriptor shorter than the self-relative header",
        ));
        return descriptor;
    }

    let owner_offset: u32 = reader.read_u32(4).unwrap_or(0);
    let group_offset: u32 = reader.read_u32(8).unwrap_or(0);
    let sacl_offset: u32 = reader.read_u32(12).unwrap_or(0);
    let dacl_offset: u32 = reader.read_u32(16).unwrap_or(0);

    if owner_offset != 0 {
        match format_sid(&reader, owner_offset as usize) {
            Some(sid) => descriptor.owner_sid = sid,
            None => notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "malformed owner SID")),
        }
    }
    if group_offset != 0 {
        match format_sid(&reader, group_offset as usize) {
            Some(sid) => descriptor.group_sid = sid,
            None => notes.push(NtfsNote::new(NtfsErrorKind::AttributeOverflow, "malformed group SID")),
        }
    }
    if dacl_offset != 0 {
        descriptor.dacl = format!("present at offset {}", dacl_offset);
    }
    if sacl_offset != 0 {
        descriptor.sacl = format!("present at offset {}", sacl_offset);
    }

    descriptor
}

/// Renders a SID in `S-revision-authority-subauthority...` form.
fn format_sid(reader: &ByteReader, offset: usize) -> Option<String> {
    let revision: u8 = reader.read_u8(offset).ok()?;
    let subauthority_count: u8 = reader.read_u8(offset + 1).ok()?;

    let mut authority: u64 = 0;
    for index in 0..6 {
        authority = (authority << 8) | reader.read_u8(offset + 2 + index).ok()? as u64;
    }

    let mut parts: Vec<String> = vec![format!("S-{}-{}", revision, authority)];
    for index in 0..subauthority_count as usize {
        let subauthority: u32 = reader.read_u32(offset + 8 + index * 4).ok()?;
        parts.push(subauthority.to_string());
    }
    Some(parts.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_too_short() {
        let mut notes: Vec<NtfsNote> = Vec::new();
        let descriptor: NtfsSecurityDescriptor = decode_security_descriptor(&[0u8; 4], &mut notes);

        assert_eq!(descriptor.owner_sid, "");
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_format_sid_well_known_administrators() {
        // S-1-5-32-544
        let mut data: Vec<u8> = vec![0u8; 16];
        data[0] = 1;
        data[1] = 2;
        data[7] = 5;
        data[8..12].copy_from_slice(&32u32.to_le_bytes());
        data[12..16].copy_from_slice(&544u32.to_le_bytes());

        let reader: ByteReader = ByteReader::new(&data);
        assert_eq!(format_sid(&reader, 0).unwrap(), "S-1-5-32-544");
    }
}
