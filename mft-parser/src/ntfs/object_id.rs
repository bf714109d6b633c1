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

use mft_types::Uuid;

/// New Technologies File System (NTFS) object identifier ($OBJECT_ID).
///
/// Only the object GUID is always present; the birth fields appear only
/// when the attribute content is long enough to hold them, which is common
/// on volumes that have never been part of a distributed-link-tracking
/// domain.
pub struct NtfsObjectId {
    pub object_id: Uuid,
    pub birth_volume_id: Option<Uuid>,
    pub birth_object_id: Option<Uuid>,
    pub birth_domain_id: Option<Uuid>,
}

impl NtfsObjectId {
    pub fn new() -> Self {
        Self {
            object_id: Uuid::default(),
            birth_volume_id: None,
            birth_object_id: None,
            birth_domain_id: None,
        }
    }

    /// Reads up to four 16-byte GUIDs from an attribute's resident content.
    pub fn read_data(data: &[u8]) -> Option<Self> {
        if data.len() < 16 {
            return None;
        }
        let mut object_id: NtfsObjectId = NtfsObjectId::new();
        object_id.object_id = Uuid::from_le_bytes(&data[0..16]);

        if data.len() >= 32 {
            object_id.birth_volume_id = Some(Uuid::from_le_bytes(&data[16..32]));
        }
        if data.len() >= 48 {
            object_id.birth_object_id = Some(Uuid::from_le_bytes(&data[32..48]));
        }
        if data.len() >= 64 {
            object_id.birth_domain_id = Some(Uuid::from_le_bytes(&data[48..64]));
        }
        Some(object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_data_object_only() {
        let data: Vec<u8> = vec![0u8; 16];
        let object_id: NtfsObjectId = NtfsObjectId::read_data(&data).unwrap();

        assert!(object_id.birth_volume_id.is_none());
    }

    #[test]
    fn test_read_data_too_short() {
        let data: Vec<u8> = vec![0u8; 8];
        assert!(NtfsObjectId::read_data(&data).is_none());
    }

    #[test]
    fn test_read_data_all_fields() {
        let data: Vec<u8> = vec![0u8; 64];
        let object_id: NtfsObjectId = NtfsObjectId::read_data(&data).unwrap();

        assert!(object_id.birth_domain_id.is_some());
    }
}
