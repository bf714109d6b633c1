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
use mft_types::bytes_to_u16_le;

#[derive(LayoutMap)]
#[layout_map(
    member(name = "unknown1", data_type = "[u8; 8]"),
    member(name = "major_format_version", data_type = "u8"),
    member(name = "minor_format_version", data_type = "u8"),
    member(name = "volume_flags", data_type = "u16", format = "hex")
)]
/// New Technologies File System (NTFS) volume information ($VOLUME_INFORMATION).
pub struct NtfsVolumeInformation {
    pub major_format_version: u8,
    pub minor_format_version: u8,
    pub volume_flags: u16,
}

impl NtfsVolumeInformation {
    pub fn new() -> Self {
        Self {
            major_format_version: 0,
            minor_format_version: 0,
            volume_flags: 0,
        }
    }

    /// Reads the volume information from an attribute's resident content.
    pub fn read_data(&mut self, data: &[u8]) -> Result<(), ErrorTrace> {
        if data.len() < 12 {
            return Err(mft_core::error_trace_new!(
                "Unsupported NTFS volume information data size"
            ));
        }
        self.major_format_version = data[8];
        self.minor_format_version = data[9];
        self.volume_flags = bytes_to_u16_le!(data, 10);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_data() -> Vec<u8> {
        return vec![
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x01, 0x80, 0x00,
        ];
    }

    #[test]
    fn test_read_data() -> Result<(), ErrorTrace> {
        let mut test_struct: NtfsVolumeInformation = NtfsVolumeInformation::new();
        test_struct.read_data(&get_test_data())?;

        assert_eq!(test_struct.major_format_version, 3);
        assert_eq!(test_struct.minor_format_version, 1);
        assert_eq!(test_struct.volume_flags, 0x0080);

        Ok(())
    }

    #[test]
    fn test_read_data_with_unsupported_data_size() {
        let test_data: Vec<u8> = get_test_data();
        let mut test_struct: NtfsVolumeInformation = NtfsVolumeInformation::new();
        assert!(test_struct.read_data(&test_data[0..11]).is_err());
    }

    #[test]
    fn test_debug_read_data_does_not_panic_on_short_buffer() {
        let dump: String = NtfsVolumeInformation::debug_read_data(&[0u8; 2]);
        assert!(dump.contains("out of bounds"));
    }
}
