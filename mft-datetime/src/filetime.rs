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

use std::fmt;

use mft_types::bytes_to_u64_le;

use super::epoch::Epoch;

/// Number of 100 nanosecond intervals between 1601-01-01 and 1970-01-01.
const FILETIME_TO_POSIX_OFFSET: i64 = 116_444_736_000_000_000;

/// A FILETIME timestamp, the number of 100 nanosecond intervals since 1601-01-01T00:00:00Z.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filetime {
    /// Timestamp.
    pub timestamp: u64,
}

impl Filetime {
    /// Creates a new timestamp.
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp: timestamp }
    }

    /// Reads a timestamp from a byte sequence.
    pub fn from_bytes(data: &[u8]) -> Self {
        let timestamp: u64 = bytes_to_u64_le!(data, 0);
        Self { timestamp: timestamp }
    }

    /// Retrieves the number of seconds since the POSIX epoch (1970-01-01).
    pub fn to_posix_timestamp(&self) -> i64 {
        (self.timestamp as i64 - FILETIME_TO_POSIX_OFFSET).div_euclid(10_000_000)
    }

    /// Retrieves an ISO 8601 string representation of the timestamp.
    pub fn to_iso8601_string(&self) -> String {
        let hundred_nanoseconds: i64 = self.timestamp as i64 - FILETIME_TO_POSIX_OFFSET;
        let seconds: i64 = hundred_nanoseconds.div_euclid(10_000_000);
        let fraction: i64 = hundred_nanoseconds.rem_euclid(10_000_000);

        let days: i64 = seconds.div_euclid(86400);
        let seconds_of_day: i64 = seconds.rem_euclid(86400);
        let hours: i64 = seconds_of_day / 3600;
        let minutes: i64 = (seconds_of_day % 3600) / 60;
        let seconds_of_minute: i64 = seconds_of_day % 60;

        let (year, month, day_of_month): (i32, u32, u32) = Epoch::civil_from_days(days);

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:07}",
            year, month, day_of_month, hours, minutes, seconds_of_minute, fraction
        )
    }
}

impl fmt::Display for Filetime {
    /// Formats the timestamp for display.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} (0x{:016x})",
            self.to_iso8601_string(),
            self.timestamp,
        )
    }
}
