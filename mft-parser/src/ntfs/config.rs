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

use super::path_resolver::DEFAULT_MAX_DEPTH;

/// Named configuration presets, replacing the dynamic option bags the
/// analyzer this crate is modeled on threaded through every stage; a
/// single struct is built once up front and passed down by reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Profile {
    Default,
    Quick,
    Forensic,
    Performance,
}

/// The run-wide configuration a streaming driver invocation is built from.
#[derive(Clone, Debug)]
pub struct Config {
    pub chunk_size: usize,
    pub compute_hashes: bool,
    pub anomaly_detection: bool,
    pub decode_extended_attributes: bool,
    pub hash_worker_count: usize,
    pub resident_data_cap: usize,
    pub path_separator: char,
    pub max_path_depth: usize,
    pub utc_offset_minutes: i32,
}

impl Config {
    /// Builds the configuration for a named profile.
    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Default => Self {
                chunk_size: 1000,
                compute_hashes: false,
                anomaly_detection: true,
                decode_extended_attributes: true,
                hash_worker_count: 4,
                resident_data_cap: super::data_attribute::DEFAULT_RESIDENT_DATA_CAP,
                path_separator: '/',
                max_path_depth: DEFAULT_MAX_DEPTH,
                utc_offset_minutes: 0,
            },
            Profile::Quick => Self {
                chunk_size: 5000,
                compute_hashes: false,
                anomaly_detection: false,
                decode_extended_attributes: false,
                hash_worker_count: 0,
                resident_data_cap: super::data_attribute::DEFAULT_RESIDENT_DATA_CAP,
                path_separator: '/',
                max_path_depth: DEFAULT_MAX_DEPTH,
                utc_offset_minutes: 0,
            },
            Profile::Forensic => Self {
                chunk_size: 500,
                compute_hashes: true,
                anomaly_detection: true,
                decode_extended_attributes: true,
                hash_worker_count: 8,
                resident_data_cap: super::data_attribute::DEFAULT_RESIDENT_DATA_CAP,
                path_separator: '/',
                max_path_depth: DEFAULT_MAX_DEPTH,
                utc_offset_minutes: 0,
            },
            Profile::Performance => Self {
                chunk_size: 10000,
                compute_hashes: false,
                anomaly_detection: false,
                decode_extended_attributes: true,
                hash_worker_count: 0,
                resident_data_cap: super::data_attribute::DEFAULT_RESIDENT_DATA_CAP,
                path_separator: '/',
                max_path_depth: DEFAULT_MAX_DEPTH,
                utc_offset_minutes: 0,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_profile(Profile::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forensic_profile_enables_hashing() {
        let config: Config = Config::from_profile(Profile::Forensic);
        assert!(config.compute_hashes);
        assert_eq!(config.chunk_size, 500);
    }

    #[test]
    fn test_quick_profile_disables_anomaly_detection() {
        let config: Config = Config::from_profile(Profile::Quick);
        assert!(!config.anomaly_detection);
    }

    #[test]
    fn test_default_profile_matches_default_trait() {
        let via_default: Config = Config::default();
        let via_profile: Config = Config::from_profile(Profile::Default);
        assert_eq!(via_default.chunk_size, via_profile.chunk_size);
    }
}
