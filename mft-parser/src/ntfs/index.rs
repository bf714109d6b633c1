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
use mft_types::bytes_to_u32_le;

/// New Technologies File System (NTFS) index root ($INDEX_ROOT).
///
/// The core only needs this attribute's presence and indexed attribute
/// type to classify a record as a directory; index entries themselves are
/// not walked.
pub struct NtfsIndexRoot {
    pub indexed_attribute_type: u32,
    pub collation_rule: u32,
    pub index_allocation_entry_size: u32,
}

impl NtfsIndexRoot {
    pub fn new() -> Self {
        Self {
            indexed_attribute_type: 0,
            collation_rule: 0,
            index_allocation_entry_size: 0,
        }
    }

    /// Reads the index root header from an attribute's resident content.
    pub fn read_data(&mut self, data: &[u8]) -> Result<(), ErrorTrace> {
        if data.len() < 16 {
            return Err(mft_core::error_trace_new!("Unsupported NTFS index root data size"));
        }
        self.indexed_attribute_type = bytes_to_u32_le!(data, 0);
        self.collation_rule = bytes_to_u32_le!(data, 4);
        self.index_allocation_entry_size = bytes_to_u32_le!(data, 8);
        Ok(())
    }
}
