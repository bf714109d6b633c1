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
use mft_types::{Ucs2String, bytes_to_u32_le, bytes_to_u64_le};

use super::constants::{
    NTFS_FILE_NAME_NAMESPACE_DOS, NTFS_FILE_NAME_NAMESPACE_POSIX, NTFS_FILE_NAME_NAMESPACE_WIN32,
    NTFS_FILE_NAME_NAMESPACE_WIN32_AND_DOS,
};

/// New Technologies File System (NTFS) file name ($FILE_NAME).
pub struct NtfsFileName {
    pub parent_file_reference: u64,
    pub creation_time: Filetime,
    pub modification_time: Filetime,
    pub entry_modification_time: Filetime,
    pub access_time: Filetime,
    pub allocated_size: u64,
    pub real_size: u64,
    pub file_attribute_flags: u32,
    pub name_space: u8,
    pub name: Ucs2String,
}

impl NtfsFileName {
    pub fn new() -> Self {
        Self {
            parent_file_reference: 0,
            creation_time: Filetime::new(0),
            modification_time: Filetime::new(0),
            entry_modification_time: Filetime::new(0),
            access_time: Filetime::new(0),
            allocated_size: 0,
            real_size: 0,
            file_attribute_flags: 0,
            name_space: 0,
            name: Ucs2String::new(),
        }
    }

    /// Reads the file name from an attribute's resident content.
    pub fn read_data(&mut self, data: &[u8]) -> Result<(), ErrorTrace> {
        if data.len() < 66 {
            return Err(mft_core::error_trace_new!(
                "Unsupported NTFS file name data size"
            ));
        }
        self.parent_file_reference = bytes_to_u64_le!(data, 0);
        self.creation_time = Filetime::from_bytes(&data[8..16]);
        self.modification_time = Filetime::from_bytes(&data[16..24]);
        self.entry_modification_time = Filetime::from_bytes(&data[24..32]);
        self.access_time = Filetime::from_bytes(&data[32..40]);
        self.allocated_size = bytes_to_u64_le!(data, 40);
        self.real_size = bytes_to_u64_le!(data, 48);
        self.file_attribute_flags = bytes_to_u32_le!(data, 56);

        let name_size: u8 = data[64];
        self.name_space = data[65];

        let name_end_offset: usize = 66 + (name_size as usize) * 2;
        if name_end_offset > data.len() {
            return Err(mft_core::error_trace_new!(
                "Invalid NTFS file name length value out of bounds"
            ));
        }
        self.name = Ucs2String::from_le_bytes(&data[66..name_end_offset]);

        Ok(())
    }

    /// Display-name priority, highest last: Win32+DOS > Win32 > POSIX > DOS.
    /// The assembler uses this to pick a single preferred instance when a
    /// record carries multiple $FILE_NAME attributes.
    pub fn namespace_priority(&self) -> u8 {
        match self.name_space {
            ns if ns == NTFS_FILE_NAME_NAMESPACE_WIN32_AND_DOS => 3,
            ns if ns == NTFS_FILE_NAME_NAMESPACE_WIN32 => 2,
            ns if ns == NTFS_FILE_NAME_NAMESPACE_POSIX => 1,
            ns if ns == NTFS_FILE_NAME_NAMESPACE_DOS => 0,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_data() -> Vec<u8> {
        return vec![
            0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0xad, 0xca, 0xbc, 0x0c, 0xdc, 0x8e,
            0xd0, 0x01, 0xad, 0xca, 0xbc, 0x0c, 0xdc, 0x8e, 0xd0, 0x01, 0xad, 0xca, 0xbc, 0x0c,
            0xdc, 0x8e, 0xd0, 0x01, 0xad, 0xca, 0xbc, 0x0c, 0xdc, 0x8e, 0xd0, 0x01, 0x00, 0x40,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x03, 0x24, 0x00, 0x4d, 0x00,
            0x46, 0x00, 0x54, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
    }

    #[test]
    fn test_read_data() -> Result<(), ErrorTrace> {
        let mut test_struct: NtfsFileName = NtfsFileName::new();
        test_struct.read_data(&get_test_data())?;

        assert_eq!(test_struct.parent_file_reference, 0x0005000000000005);
        assert_eq!(test_struct.creation_time.timestamp, 0x01d08edc0cbccaad);
        assert_eq!(test_struct.name.to_string(), "$MFT");
        assert_eq!(test_struct.name_space, 3);
        assert_eq!(test_struct.namespace_priority(), 3);
        Ok(())
    }

    #[test]
    fn test_read_data_with_unsupported_data_size() {
        let mut test_struct: NtfsFileName = NtfsFileName::new();
        let test_data: Vec<u8> = get_test_data();
        assert!(test_struct.read_data(&test_data[0..65]).is_err());
    }

    #[test]
    fn test_namespace_priority_ordering() {
        let mut win32: NtfsFileName = NtfsFileName::new();
        win32.name_space = NTFS_FILE_NAME_NAMESPACE_WIN32;

        let mut dos: NtfsFileName = NtfsFileName::new();
        dos.name_space = NTFS_FILE_NAME_NAMESPACE_DOS;

        assert!(win32.namespace_priority() > dos.namespace_priority());
    }
}
