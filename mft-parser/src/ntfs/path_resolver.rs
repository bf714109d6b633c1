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

use std::collections::HashMap;

use super::constants::NTFS_ROOT_DIRECTORY_RECORD_NUMBER;
use super::record::NtfsRecord;

/// Default cap on parent-chain depth; a chain longer than this is treated
/// as a cycle rather than walked to exhaustion.
pub const DEFAULT_MAX_DEPTH: usize = 255;

enum Visit {
    InProgress,
    Done(String),
}

/// Resolves every record's full path by walking its parent-reference chain,
/// memoizing intermediate results so the whole table resolves in O(N) total
/// chain steps rather than O(N * average depth).
///
/// A record whose parent does not exist in `records` becomes an orphan: its
/// path is `<orphan>/<name>` and walking stops there. A record reachable
/// from itself through parent links becomes `<cycle>/<name>`. A chain
/// longer than `max_depth` is treated the same as a cycle.
pub struct PathResolver<'a> {
    records: &'a HashMap<u64, NtfsRecord>,
    separator: char,
    max_depth: usize,
    cache: HashMap<u64, Visit>,
}

impl<'a> PathResolver<'a> {
    pub fn new(records: &'a HashMap<u64, NtfsRecord>, separator: char, max_depth: usize) -> Self {
        Self {
            records: records,
            separator: separator,
            max_depth: max_depth,
            cache: HashMap::new(),
        }
    }

    /// Resolves and memoizes the full path of every record, returning a map
    /// from record number to rendered path plus the anomaly-flag name
    /// attached, if any (`cycle-in-path` or `orphan-record`).
    pub fn resolve_all(&mut self) -> HashMap<u64, (String, Option<&'static str>)> {
        let record_numbers: Vec<u64> = self.records.keys().copied().collect();
        let mut results: HashMap<u64, (String, Option<&'static str>)> = HashMap::new();

        for record_number in record_numbers {
            let (path, anomaly) = self.resolve(record_number);
            results.insert(record_number, (path, anomaly));
        }
        results
    }

    fn resolve(&mut self, record_number: u64) -> (String, Option<&'static str>) {
        if record_number == NTFS_ROOT_DIRECTORY_RECORD_NUMBER {
            return (String::new(), None);
        }

        let record: &NtfsRecord = match self.records.get(&record_number) {
            Some(record) => record,
            None => return (format!("<orphan>"), Some("orphan-record")),
        };

        let name: String = record
            .preferred_file_name()
            .map(|file_name| file_name.name.to_string())
            .unwrap_or_default();
        let parent_record_number: u64 = record
            .preferred_file_name()
            .map(|file_name| super::constants::file_reference_record_number(file_name.parent_file_reference))
            .unwrap_or(0);

        self.resolve_chain(record_number, parent_record_number, name)
    }

    fn resolve_chain(
        &mut self,
        record_number: u64,
        parent_record_number: u64,
        name: String,
    ) -> (String, Option<&'static str>) {
        let (parent_path, parent_anomaly): (String, Option<&'static str>) =
            self.walk_parent(record_number, parent_record_number, 0);

        let full_path: String = if parent_path.is_empty() {
            name
        } else {
            format!("{}{}{}", parent_path, self.separator, name)
        };
        (full_path, parent_anomaly)
    }

    fn walk_parent(
        &mut self,
        origin: u64,
        parent_record_number: u64,
        depth: usize,
    ) -> (String, Option<&'static str>) {
        if parent_record_number == NTFS_ROOT_DIRECTORY_RECORD_NUMBER {
            return (String::new(), None);
        }
        if depth >= self.max_depth {
            return (String::from("<cycle>"), Some("cycle-in-path"));
        }

        if let Some(visit) = self.cache.get(&parent_record_number) {
            return match visit {
                Visit::Done(path) => (path.clone(), None),
                Visit::InProgress => (String::from("<cycle>"), Some("cycle-in-path")),
            };
        }

        if parent_record_number == origin {
            return (String::from("<cycle>"), Some("cycle-in-path"));
        }

        let parent_record: &NtfsRecord = match self.records.get(&parent_record_number) {
            Some(record) => record,
            None => return (String::from("<orphan>"), Some("orphan-record")),
        };

        self.cache.insert(parent_record_number, Visit::InProgress);

        let grandparent_record_number: u64 = parent_record
            .preferred_file_name()
            .map(|file_name| super::constants::file_reference_record_number(file_name.parent_file_reference))
            .unwrap_or(0);
        let parent_name: String = parent_record
            .preferred_file_name()
            .map(|file_name| file_name.name.to_string())
            .unwrap_or_default();

        let (grandparent_path, anomaly): (String, Option<&'static str>) =
            self.walk_parent(origin, grandparent_record_number, depth + 1);

        let full_path: String = if grandparent_path.is_empty() {
            parent_name
        } else {
            format!("{}{}{}", grandparent_path, self.separator, parent_name)
        };

        self.cache.insert(parent_record_number, Visit::Done(full_path.clone()));
        (full_path, anomaly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::file_name::NtfsFileName;

    fn record_with_parent(record_number: u64, parent: u64, name: &str) -> NtfsRecord {
        let mut file_name: NtfsFileName = NtfsFileName::new();
        file_name.name = mft_types::Ucs2String::from(name);
        file_name.parent_file_reference = parent;

        NtfsRecord {
            record_number: record_number,
            sequence_number: 1,
            used_size: 0,
            allocated_size: 1024,
            flags: 0x0001,
            base_record_reference: 0,
            next_attribute_id: 0,
            standard_information: None,
            file_names: vec![file_name],
            object_id: None,
            security_descriptor: None,
            volume_name: None,
            volume_information: None,
            data_streams: Vec::new(),
            has_index_root: false,
            has_reparse_point: false,
            pending_extensions: Vec::new(),
            is_extension_incomplete: false,
            hashes: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_resolves_simple_chain() {
        let mut records: HashMap<u64, NtfsRecord> = HashMap::new();
        records.insert(10, record_with_parent(10, NTFS_ROOT_DIRECTORY_RECORD_NUMBER, "docs"));
        records.insert(11, record_with_parent(11, 10, "readme.txt"));

        let mut resolver: PathResolver = PathResolver::new(&records, '/', DEFAULT_MAX_DEPTH);
        let results = resolver.resolve_all();

        assert_eq!(results.get(&11).unwrap().0, "docs/readme.txt");
        assert!(results.get(&11).unwrap().1.is_none());
    }

    #[test]
    fn test_detects_cycle() {
        let mut records: HashMap<u64, NtfsRecord> = HashMap::new();
        records.insert(10, record_with_parent(10, 11, "a"));
        records.insert(11, record_with_parent(11, 10, "b"));

        let mut resolver: PathResolver = PathResolver::new(&records, '/', DEFAULT_MAX_DEPTH);
        let results = resolver.resolve_all();

        assert_eq!(results.get(&10).unwrap().1, Some("cycle-in-path"));
    }

    #[test]
    fn test_detects_orphan() {
        let mut records: HashMap<u64, NtfsRecord> = HashMap::new();
        records.insert(10, record_with_parent(10, 999, "a"));

        let mut resolver: PathResolver = PathResolver::new(&records, '/', DEFAULT_MAX_DEPTH);
        let results = resolver.resolve_all();

        assert_eq!(results.get(&10).unwrap().1, Some("orphan-record"));
    }
}
