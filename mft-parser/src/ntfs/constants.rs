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

/// Record signature of an in-use or recoverable record.
pub const NTFS_RECORD_SIGNATURE_FILE: [u8; 4] = *b"FILE";

/// Record signature of a record the file system marked bad.
pub const NTFS_RECORD_SIGNATURE_BAAD: [u8; 4] = *b"BAAD";

/// Fixup placeholder trailing every sector before it is patched.
pub const NTFS_FIXUP_PLACEHOLDER_SIZE: usize = 2;

/// Default NTFS sector size, used to size the fixup array.
pub const NTFS_DEFAULT_SECTOR_SIZE: usize = 512;

/// Default MFT record size. Some volumes use 4096.
pub const NTFS_DEFAULT_RECORD_SIZE: u32 = 1024;

/// Sentinel attribute type code ending an attribute chain.
pub const NTFS_ATTRIBUTE_TYPE_END_OF_CHAIN: u32 = 0xffff_ffff;

pub const NTFS_ATTRIBUTE_TYPE_STANDARD_INFORMATION: u32 = 0x0000_0010;
pub const NTFS_ATTRIBUTE_TYPE_ATTRIBUTE_LIST: u32 = 0x0000_0020;
pub const NTFS_ATTRIBUTE_TYPE_FILE_NAME: u32 = 0x0000_0030;
pub const NTFS_ATTRIBUTE_TYPE_OBJECT_ID: u32 = 0x0000_0040;
pub const NTFS_ATTRIBUTE_TYPE_SECURITY_DESCRIPTOR: u32 = 0x0000_0050;
pub const NTFS_ATTRIBUTE_TYPE_VOLUME_NAME: u32 = 0x0000_0060;
pub const NTFS_ATTRIBUTE_TYPE_VOLUME_INFORMATION: u32 = 0x0000_0070;
pub const NTFS_ATTRIBUTE_TYPE_DATA: u32 = 0x0000_0080;
pub const NTFS_ATTRIBUTE_TYPE_INDEX_ROOT: u32 = 0x0000_0090;
pub const NTFS_ATTRIBUTE_TYPE_INDEX_ALLOCATION: u32 = 0x0000_00a0;
pub const NTFS_ATTRIBUTE_TYPE_BITMAP: u32 = 0x0000_00b0;
pub const NTFS_ATTRIBUTE_TYPE_REPARSE_POINT: u32 = 0x0000_00c0;

/// Record header flag bits.
pub const NTFS_RECORD_FLAG_IN_USE: u16 = 0x0001;
pub const NTFS_RECORD_FLAG_DIRECTORY: u16 = 0x0002;
pub const NTFS_RECORD_FLAG_EXTENSION: u16 = 0x0004;
pub const NTFS_RECORD_FLAG_HAS_SPECIAL_INDEX: u16 = 0x0008;

/// $FILE_NAME namespace values, in increasing display-name priority order.
pub const NTFS_FILE_NAME_NAMESPACE_POSIX: u8 = 0;
pub const NTFS_FILE_NAME_NAMESPACE_WIN32: u8 = 1;
pub const NTFS_FILE_NAME_NAMESPACE_DOS: u8 = 2;
pub const NTFS_FILE_NAME_NAMESPACE_WIN32_AND_DOS: u8 = 3;

/// Well-known record number of the NTFS root directory.
pub const NTFS_ROOT_DIRECTORY_RECORD_NUMBER: u64 = 5;

/// Reparse tags this analyzer decodes a payload for.
pub const NTFS_REPARSE_TAG_MOUNT_POINT: u32 = 0xa000_0003;
pub const NTFS_REPARSE_TAG_SYMBOLIC_LINK: u32 = 0xa000_000c;
pub const NTFS_REPARSE_TAG_WINDOWS_OVERLAY_FILTER: u32 = 0x8000_0017;

/// Extracts a file reference's 48-bit MFT record number.
pub fn file_reference_record_number(file_reference: u64) -> u64 {
    file_reference & 0x0000_ffff_ffff_ffff
}

/// Extracts a file reference's 16-bit sequence number.
pub fn file_reference_sequence_number(file_reference: u64) -> u16 {
    (file_reference >> 48) as u16
}
