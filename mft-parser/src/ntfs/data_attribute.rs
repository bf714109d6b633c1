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

use super::data_run::NtfsDataRun;

/// Default cap on retained resident $DATA content, bounding memory use for
/// pathological records with oversized resident streams.
pub const DEFAULT_RESIDENT_DATA_CAP: usize = 64 * 1024;

/// A single $DATA stream instance: the unnamed primary stream, or a named
/// alternate data stream (ADS).
pub struct NtfsDataStream {
    pub name: Option<Ucs2String>,
    pub is_resident: bool,
    pub resident_content: Vec<u8>,
    pub data_runs: Vec<NtfsDataRun>,
    pub allocated_size: u64,
    pub real_size: u64,
}

impl NtfsDataStream {
    pub fn is_unnamed(&self) -> bool {
        self.name.as_ref().map_or(true, |name| name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unnamed_without_name() {
        let stream: NtfsDataStream = NtfsDataStream {
            name: None,
            is_resident: true,
            resident_content: Vec::new(),
            data_runs: Vec::new(),
            allocated_size: 0,
            real_size: 0,
        };
        assert!(stream.is_unnamed());
    }

    #[test]
    fn test_is_unnamed_with_name() {
        let stream: NtfsDataStream = NtfsDataStream {
            name: Some(Ucs2String::from("ads")),
            is_resident: true,
            resident_content: Vec::new(),
            data_runs: Vec::new(),
            allocated_size: 0,
            real_size: 0,
        };
        assert!(!stream.is_unnamed());
    }
}
