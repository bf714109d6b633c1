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

use mft_types::{bytes_to_u32_le, bytes_to_u64_le};

use super::epoch::Epoch;

fn iso8601_from_posix_seconds(seconds: i64) -> (i32, u32, u32, i64, i64, i64) {
    let days: i64 = seconds.div_euclid(86400);
    let seconds_of_day: i64 = seconds.rem_euclid(86400);
    let hours: i64 = seconds_of_day / 3600;
    let minutes: i64 = (seconds_of_day % 3600) / 60;
    let seconds_of_minute: i64 = seconds_of_day % 60;

    let (year, month, day_of_month): (i32, u32, u32) = Epoch::civil_from_days(days);

    (year, month, day_of_month, hours, minutes, seconds_of_minute)
}

/// A 32-bit POSIX timestamp, the number of seconds since 1970-01-01T00:00:00Z.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PosixTime32 {
    /// Timestamp.
    pub timestamp: u32,
}

impl PosixTime32 {
    /// Creates a new timestamp.
    pub fn new(timestamp: u32) -> Self {
        Self { timestamp: timestamp }
    }

    /// Reads a timestamp from a byte sequence.
    pub fn from_bytes(data: &[u8]) -> Self {
        let timestamp: u32 = bytes_to_u32_le!(data, 0);
        Self { timestamp: timestamp }
    }

    /// Retrieves an ISO 8601 string representation of the timestamp.
    pub fn to_iso8601_string(&self) -> String {
        let (year, month, day_of_month, hours, minutes, seconds) =
            iso8601_from_posix_seconds(self.timestamp as i64);

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year, month, day_of_month, hours, minutes, seconds
        )
    }
}

impl fmt::Display for PosixTime32 {
    /// Formats the timestamp for display.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} (0x{:08x})",
            self.to_iso8601_string(),
            self.timestamp,
        )
    }
}

/// A 64-bit POSIX timestamp with a nanosecond fraction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PosixTime64Ns {
    /// Timestamp, the number of seconds since 1970-01-01T00:00:00Z.
    pub timestamp: u64,

    /// Fraction of second, in nanoseconds.
    pub fraction: u32,
}

impl PosixTime64Ns {
    /// Creates a new timestamp.
    pub fn new(timestamp: u64, fraction: u32) -> Self {
        Self {
            timestamp: timestamp,
            fraction: fraction,
        }
    }

    /// Reads a timestamp from a byte sequence.
    pub fn from_bytes(data: &[u8]) -> Self {
        let timestamp: u64 = bytes_to_u64_le!(data, 0);
        let fraction: u32 = bytes_to_u32_le!(data, 8);
        Self {
            timestamp: timestamp,
            fraction: fraction,
        }
    }

    /// Retrieves the number of seconds since the POSIX epoch (1970-01-01).
    pub fn to_posix_timestamp(&self) -> i64 {
        self.timestamp as i64
    }

    /// Retrieves an ISO 8601 string representation of the timestamp.
    pub fn to_iso8601_string(&self) -> String {
        let (year, month, day_of_month, hours, minutes, seconds) =
            iso8601_from_posix_seconds(self.timestamp as i64);

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            year, month, day_of_month, hours, minutes, seconds, self.fraction
        )
    }
}

impl fmt::Display for PosixTime64Ns {
    /// Formats the timestamp for display.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} (0x{:016x}:0x{:08x})",
            self.to_iso8601_string(),
            self.timestamp,
            self.fraction,
        )
    }
}
