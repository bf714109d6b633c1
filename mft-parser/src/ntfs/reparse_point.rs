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

use super::constants::{
    NTFS_REPARSE_TAG_MOUNT_POINT, NTFS_REPARSE_TAG_SYMBOLIC_LINK,
    NTFS_REPARSE_TAG_WINDOWS_OVERLAY_FILTER,
};
use super::errors::{NtfsErrorKind, NtfsNote};

/// Decodes a $REPARSE_POINT attribute's resident content.
///
/// The reparse tag and, for symbolic links and mount points, the
/// substitute and print names are not carried as structured output
/// fields; they are attached as a single note, per the output schema's
/// free-form notes column.
pub fn decode_reparse_point(data: &[u8], notes: &mut Vec<NtfsNote>) {
    let reader: ByteReader = ByteReader::new(data);

    let reparse_tag: u32 = match reader.read_u32(0) {
        Ok(value) => value,
        Err(_) => {
            notes.push(NtfsNote::new(
                NtfsErrorKind::AttributeOverflow,
                "reparse point shorter than its fixed header",
            ));
            return;
        }
    };

    match reparse_tag {
        NTFS_REPARSE_TAG_SYMBOLIC_LINK => decode_link_reparse_point(&reader, reparse_tag, true, notes),
        NTFS_REPARSE_TAG_MOUNT_POINT => decode_link_reparse_point(&reader, reparse_tag, false, notes),
        NTFS_REPARSE_TAG_WINDOWS_OVERLAY_FILTER => {
            notes.push(NtfsNote::new(
                NtfsErrorKind::UnknownAttributeType,
                "cloud-filter (WOF) reparse point",
            ));
        }
        other => {
            notes.push(NtfsNote::new(
                NtfsErrorKind::UnknownAttributeType,
                format!("reparse point with tag 0x{:08x}", other),
            ));
        }
    }
}

/// Decodes the substitute/print name pair shared by symbolic link and
/// mount point reparse buffers; a symbolic link's buffer carries an extra
/// 4-byte flags field before the path buffer that a mount point lacks.
fn decode_link_reparse_point(reader: &ByteReader, reparse_tag: u32, is_symlink: bool, notes: &mut Vec<NtfsNote>) {
    let fields_offset: usize = 8;
    let substitute_name_offset: u16 = reader.read_u16(fields_offset).unwrap_or(0);
    let substitute_name_length: u16 = reader.read_u16(fields_offset + 2).unwrap_or(0);
    let print_name_offset: u16 = reader.read_u16(fields_offset + 4).unwrap_or(0);
    let print_name_length: u16 = reader.read_u16(fields_offset + 6).unwrap_or(0);

    let path_buffer_offset: usize = fields_offset + 8 + if is_symlink { 4 } else { 0 };

    let print_name: Option<Ucs2String> = reader
        .read_fixed_bytes(path_buffer_offset + print_name_offset as usize, print_name_length as usize)
        .ok()
        .map(Ucs2String::from_le_bytes);

    let substitute_name: Option<Ucs2String> = reader
        .read_fixed_bytes(
            path_buffer_offset + substitute_name_offset as usize,
            substitute_name_length as usize,
        )
        .ok()
        .map(Ucs2String::from_le_bytes);

    let kind: &str = if is_symlink { "symbolic link" } else { "mount point" };
    let message: String = match (print_name, substitute_name) {
        (Some(print_name), Some(substitute_name)) => format!(
            "{} (tag 0x{:08x}) -> {} (substitute {})",
            kind,
            reparse_tag,
            print_name.to_string(),
            substitute_name.to_string(),
        ),
        _ => format!("{} (tag 0x{:08x}) with unreadable target name", kind, reparse_tag),
    };
    notes.push(NtfsNote::new(NtfsErrorKind::UnknownAttributeType, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_symlink_data(substitute: &str, print: &str) -> Vec<u8> {
        let substitute_bytes: Vec<u8> = substitute.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let print_bytes: Vec<u8> = print.encode_utf16().flat_map(u16::to_le_bytes).collect();

        let mut data: Vec<u8> = vec![0u8; 20];
        data[0..4].copy_from_slice(&NTFS_REPARSE_TAG_SYMBOLIC_LINK.to_le_bytes());
        data[8..10].copy_from_slice(&0u16.to_le_bytes());
        data[10..12].copy_from_slice(&(substitute_bytes.len() as u16).to_le_bytes());
        data[12..14].copy_from_slice(&(substitute_bytes.len() as u16).to_le_bytes());
        data[14..16].copy_from_slice(&(print_bytes.len() as u16).to_le_bytes());

        data.extend_from_slice(&substitute_bytes);
        data.extend_from_slice(&print_bytes);
        data
    }

    #[test]
    fn test_decode_symbolic_link() {
        let data: Vec<u8> = build_symlink_data("\\??\\C:\\target", "C:\\target");
        let mut notes: Vec<NtfsNote> = Vec::new();
        decode_reparse_point(&data, &mut notes);

        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("symbolic link"));
        assert!(notes[0].message.contains("C:\\target"));
    }

    #[test]
    fn test_decode_unknown_tag() {
        let mut data: Vec<u8> = vec![0u8; 8];
        data[0..4].copy_from_slice(&0x1234u32.to_le_bytes());

        let mut notes: Vec<NtfsNote> = Vec::new();
        decode_reparse_point(&data, &mut notes);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NtfsErrorKind::UnknownAttributeType);
    }

    #[test]
    fn test_decode_too_short() {
        let mut notes: Vec<NtfsNote> = Vec::new();
        decode_reparse_point(&[0u8; 2], &mut notes);

        assert_eq!(notes[0].kind, NtfsErrorKind::AttributeOverflow);
    }
}
