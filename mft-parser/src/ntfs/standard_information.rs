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
use mft_datetime::Filetime;
use mft_types::{bytes_to_u32_le, bytes_to_u64_le};

/// New Technologies File System (NTFS) standard information ($STANDARD_INFORMATION).
///
/// The extended NTFS 3.x fields (USN, security-id, owner-id, quota-charged)
/// only appear when the attribute content is at least 72 bytes; volumes
/// created under NTFS 1.2 carry just the first 48 bytes.
pub struct NtfsStandardInformation {
    pub creation_time: Filetime,
    pub modification_time: Filetime,
    pub entry_modification_time: Filetime,
    pub access_time: Filetime,
    pub file_attribute_flags: u32,
    pub owner_id: u32,
    pub security_id: u32,
    pub quota_charged: u64,
    pub update_sequence_number: u64,
}

impl NtfsStandardInformation {
    pub fn new() -> Self {
        Self {
            creation_time: Filetime::new(0),
            modification_time: Filetime::new(0),
            entry_modification_time: Filetime::new(0),
            access_time: Filetime::new(0),
            file_attribute_flags: 0,
            owner_id: 0,
            security_id: 0,
            quota_charged: 0,
            update_sequence_number: 0,
        }
    }

    /// Reads the standard information from an attribute's resident content.
    pub fn read_data(&mut self, data: &[u8]) -> Result<(), ErrorTrace> {
        if data.len() < 48 {
            return Err(mft_core::error_trace_new!(
                "Unsupported NTFS standard information data size"
            ));
        }
        self.creation_time = Filetime::from_bytes(&data[0..8]);
        self.modification_time = Filetime::from_bytes(&data[8..16]);
        self.entry_modification_time = Filetime::from_bytes(&data[16..24]);
        self.access_time = Filetime::from_bytes(&data[24..32]);
        self.file_attribute_flags = bytes_to_u32_le!(data, 32);

        if data.len() >= 72 {
            self.owner_id = bytes_to_u32_le!(data, 48);
            self.security_id = bytes_to_u32_le!(data, 52);
            self.quota_charged = bytes_to_u64_le!(data, 56);
            self.update_sequence_number = bytes_to_u64_le!(data, 64);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_data() -> Vec<u8> {
        let mut data: Vec<u8> = vec![0u8; 72];
        data[0..8].copy_from_slice(&0x01cb3a623d0a17ceu64.to_le_bytes());
        data[32..36].copy_from_slice(&0x00000020u32.to_le_bytes());
        data[56..64].copy_from_slice(&5u64.to_le_bytes());
        data
    }

    #[test]
    fn test_read_data() -> Result<(), ErrorTrace> {
        let mut test_struct: NtfsStandardInformation = NtfsStandardInformation::new();
        test_struct.read_data(&get_test_data())?;

        assert_eq!(test_struct.creation_time.timestamp, 0x01cb3a623d0a17ce);
        assert_eq!(test_struct.file_attribute_flags, 0x20);
        assert_eq!(test_struct.quota_charged, 5);
        Ok(())
    }

    #[test]
    fn test_read_data_short_form() -> Result<(), ErrorTrace> {
        let mut test_struct: NtfsStandardInformation = NtfsStandardInformation::new();
        test_struct.read_data(&get_test_data()[0..48])?;

        assert_eq!(test_struct.owner_id, 0);
        Ok(())
    }

    #[test]
    fn test_read_data_with_unsupported_data_size() {
        let mut test_struct: NtfsStandardInformation = NtfsStandardInformation::new();
        assert!(test_struct.read_data(&[0u8; 10]).is_err());
    }
}
