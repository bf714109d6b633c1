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

use mft_types::bytes_to_u16_le;

use super::constants::NTFS_DEFAULT_SECTOR_SIZE;
use super::errors::{NtfsErrorKind, NtfsNote};

/// Multi-sector transfer (fixup) verification and in-place patch.
///
/// Applied before any attribute parsing: every MFT record is divided into
/// fixed-size sectors whose last two bytes are overwritten on disk with a
/// rolling update sequence number (USN); the true trailing bytes are
/// preserved in a small array near the start of the record and restored
/// here. A record whose fixup fails is not discarded — it is left
/// unpatched and the caller proceeds with best-effort header fields.
pub fn apply_fixup(
    data: &mut [u8],
    fixup_offset: u16,
    fixup_count: u16,
    sector_size: usize,
) -> Result<(), NtfsNote> {
    let sector_size: usize = if sector_size == 0 {
        NTFS_DEFAULT_SECTOR_SIZE
    } else {
        sector_size
    };

    let expected_sector_count: usize = data.len() / sector_size;
    if fixup_count as usize != expected_sector_count + 1 {
        return Err(NtfsNote::new(
            NtfsErrorKind::FixupMismatch,
            format!(
                "fixup count {} does not match expected {} for a {}-byte record",
                fixup_count,
                expected_sector_count + 1,
                data.len()
            ),
        ));
    }

    let fixup_offset: usize = fixup_offset as usize;
    let fixup_array_size: usize = (fixup_count as usize) * 2;

    if fixup_offset + fixup_array_size > data.len() {
        return Err(NtfsNote::new(
            NtfsErrorKind::FixupMismatch,
            "fixup array runs past the end of the record",
        ));
    }

    let expected_usn: u16 = bytes_to_u16_le!(data, fixup_offset);

    // Collect (sector_trailer_offset, original_bytes) before mutating, so a
    // mismatch partway through leaves earlier sectors unpatched too.
    let mut patches: Vec<(usize, [u8; 2])> = Vec::with_capacity(expected_sector_count);

    for sector_index in 0..expected_sector_count {
        let trailer_offset: usize = (sector_index + 1) * sector_size - 2;
        let actual_usn: u16 = bytes_to_u16_le!(data, trailer_offset);

        if actual_usn != expected_usn {
            return Err(NtfsNote::new(
                NtfsErrorKind::FixupMismatch,
                format!(
                    "sector {} trailer 0x{:04x} does not match expected update sequence number 0x{:04x}",
                    sector_index, actual_usn, expected_usn
                ),
            ));
        }
        let original_offset: usize = fixup_offset + 2 + sector_index * 2;
        let original: [u8; 2] = [data[original_offset], data[original_offset + 1]];
        patches.push((trailer_offset, original));
    }

    for (trailer_offset, original) in patches {
        data[trailer_offset] = original[0];
        data[trailer_offset + 1] = original[1];
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_record(sector_size: usize, sector_count: usize, usn: u16) -> Vec<u8> {
        let mut data: Vec<u8> = vec![0u8; sector_size * sector_count];
        let fixup_offset: usize = 48;
        data[fixup_offset] = (usn & 0xff) as u8;
        data[fixup_offset + 1] = (usn >> 8) as u8;

        for sector_index in 0..sector_count {
            let trailer_offset: usize = (sector_index + 1) * sector_size - 2;
            data[trailer_offset] = (usn & 0xff) as u8;
            data[trailer_offset + 1] = (usn >> 8) as u8;

            let original_offset: usize = fixup_offset + 2 + sector_index * 2;
            data[original_offset] = 0xAB;
            data[original_offset + 1] = 0xCD;
        }
        data
    }

    #[test]
    fn test_apply_fixup_patches_sector_trailers() {
        let mut data: Vec<u8> = build_record(512, 2, 0xbeef);
        apply_fixup(&mut data, 48, 3, 512).unwrap();

        assert_eq!(&data[510..512], &[0xAB, 0xCD]);
        assert_eq!(&data[1022..1024], &[0xAB, 0xCD]);
    }

    #[test]
    fn test_apply_fixup_mismatch() {
        let mut data: Vec<u8> = build_record(512, 2, 0xbeef);
        data[510] = 0xDE;
        data[511] = 0xAD;

        let result = apply_fixup(&mut data, 48, 3, 512);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind, NtfsErrorKind::FixupMismatch);
    }

    #[test]
    fn test_apply_fixup_wrong_count() {
        let mut data: Vec<u8> = build_record(512, 2, 0xbeef);
        let result = apply_fixup(&mut data, 48, 2, 512);
        assert!(result.is_err());
    }
}
