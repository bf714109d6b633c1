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

use mft_types::Ucs2String;

/// New Technologies File System (NTFS) volume name ($VOLUME_NAME).
///
/// Optional on most records; present only on the volume's own record.
pub struct NtfsVolumeName {
    pub name: Ucs2String,
}

impl NtfsVolumeName {
    /// Reads the volume name from an attribute's resident content.
    pub fn read_data(data: &[u8]) -> Self {
        Self {
            name: Ucs2String::from_le_bytes(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_data() {
        let data: Vec<u8> = vec![0x41, 0x00, 0x42, 0x00, 0x43, 0x00];
        let volume_name: NtfsVolumeName = NtfsVolumeName::read_data(&data);
        assert_eq!(volume_name.name.to_string(), "ABC");
    }

    #[test]
    fn test_read_data_empty() {
        let volume_name: NtfsVolumeName = NtfsVolumeName::read_data(&[]);
        assert!(volume_name.name.is_empty());
    }
}
