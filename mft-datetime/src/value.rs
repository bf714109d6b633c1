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

use super::epoch::Epoch;
use super::filetime::Filetime;

/// The calendar year beyond which a FILETIME value is treated as corrupt
/// rather than as a legitimate far-future timestamp.
const MAX_SUPPORTED_YEAR: i32 = 9999;

/// A normalized, timezone-aware rendering of a FILETIME value.
///
/// The in-memory form produced by [`Filetime`] is always UTC; a
/// [`TimestampValue`] is only ever materialized at serialization time, with
/// `utc_offset_minutes` applied so the emitted string reflects the
/// requested display timezone without mutating the stored timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestampValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    pub utc_offset_minutes: i32,

    /// Set when the value is 0 (FILETIME not set).
    pub is_not_set: bool,

    /// Set when the value decodes to a year beyond [`MAX_SUPPORTED_YEAR`];
    /// such values are treated as corrupt per the NTFS forensic convention.
    pub is_out_of_range: bool,
}

impl Filetime {
    /// Determines whether the raw FILETIME value is the zero sentinel.
    pub fn is_not_set(&self) -> bool {
        self.timestamp == 0
    }

    /// Renders the timestamp with an explicit UTC offset applied for display.
    ///
    /// `utc_offset_minutes` shifts only the rendered fields; the stored
    /// `timestamp` itself always remains 100ns ticks since 1601-01-01 UTC.
    pub fn to_timestamp_value(&self, utc_offset_minutes: i32) -> TimestampValue {
        if self.is_not_set() {
            return TimestampValue {
                year: 0,
                month: 0,
                day: 0,
                hour: 0,
                minute: 0,
                second: 0,
                microsecond: 0,
                utc_offset_minutes: utc_offset_minutes,
                is_not_set: true,
                is_out_of_range: false,
            };
        }

        const FILETIME_TO_POSIX_OFFSET: i64 = 116_444_736_000_000_000;
        let hundred_nanoseconds: i64 = self.timestamp as i64 - FILETIME_TO_POSIX_OFFSET
            + (utc_offset_minutes as i64) * 60 * 10_000_000;
        let seconds: i64 = hundred_nanoseconds.div_euclid(10_000_000);
        let fraction: i64 = hundred_nanoseconds.rem_euclid(10_000_000);

        let days: i64 = seconds.div_euclid(86400);
        let seconds_of_day: i64 = seconds.rem_euclid(86400);
        let hour: u32 = (seconds_of_day / 3600) as u32;
        let minute: u32 = ((seconds_of_day % 3600) / 60) as u32;
        let second: u32 = (seconds_of_day % 60) as u32;

        let (year, month, day): (i32, u32, u32) = Epoch::civil_from_days(days);
        let is_out_of_range: bool = year > MAX_SUPPORTED_YEAR || year < -MAX_SUPPORTED_YEAR;

        if is_out_of_range {
            return TimestampValue {
                year: year,
                month: month,
                day: day,
                hour: hour,
                minute: minute,
                second: second,
                microsecond: (fraction / 10) as u32,
                utc_offset_minutes: utc_offset_minutes,
                is_not_set: false,
                is_out_of_range: true,
            };
        }

        TimestampValue {
            year: year,
            month: month,
            day: day,
            hour: hour,
            minute: minute,
            second: second,
            microsecond: (fraction / 10) as u32,
            utc_offset_minutes: utc_offset_minutes,
            is_not_set: false,
            is_out_of_range: false,
        }
    }
}

impl TimestampValue {
    /// Renders an ISO-8601 string with explicit UTC offset, or an empty
    /// string for the not-set and out-of-range sentinels.
    pub fn to_iso8601_string(&self) -> String {
        if self.is_not_set || self.is_out_of_range {
            return String::new();
        }

        let (sign, offset_hours, offset_minutes): (char, i32, i32) = if self.utc_offset_minutes < 0
        {
            ('-', -self.utc_offset_minutes / 60, -self.utc_offset_minutes % 60)
        } else {
            ('+', self.utc_offset_minutes / 60, self.utc_offset_minutes % 60)
        };
        let offset_string: String = if self.utc_offset_minutes == 0 {
            String::from("Z")
        } else {
            format!("{}{:02}:{:02}", sign, offset_hours, offset_minutes)
        };

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond,
            offset_string,
        )
    }

    /// Retrieves the number of whole seconds since the POSIX epoch, used by
    /// the body-file and timeline serializers.
    pub fn to_posix_seconds(&self) -> Option<i64> {
        if self.is_not_set || self.is_out_of_range {
            return None;
        }
        let days: i64 = days_from_civil(self.year, self.month, self.day);
        let offset_seconds: i64 = (self.utc_offset_minutes as i64) * 60;
        Some(
            days * 86400 + (self.hour as i64) * 3600 + (self.minute as i64) * 60
                + (self.second as i64)
                - offset_seconds,
        )
    }
}

/// Inverse of [`Epoch::civil_from_days`], the Howard Hinnant days-from-civil
/// algorithm.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y: i64 = if month <= 2 { (year - 1) as i64 } else { year as i64 };
    let era: i64 = if y >= 0 { y } else { y - 399 } / 400;
    let year_of_era: i64 = y - era * 400;
    let month_index: i64 = if month > 2 {
        (month - 3) as i64
    } else {
        (month + 9) as i64
    };
    let day_of_year: i64 = (153 * month_index + 2) / 5 + (day as i64) - 1;
    let day_of_era: i64 =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * 146097 + day_of_era - 719468
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.is_not_set {
            write!(formatter, "not set")
        } else if self.is_out_of_range {
            write!(formatter, "out of range ({:04}-{:02}-{:02})", self.year, self.month, self.day)
        } else {
            write!(formatter, "{}", self.to_iso8601_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_set() {
        let filetime: Filetime = Filetime::new(0);
        let value: TimestampValue = filetime.to_timestamp_value(0);
        assert!(value.is_not_set);
        assert_eq!(value.to_iso8601_string(), "");
    }

    #[test]
    fn test_known_value_utc() {
        let filetime: Filetime = Filetime::new(0x01cb3a623d0a17ce);
        let value: TimestampValue = filetime.to_timestamp_value(0);
        assert!(!value.is_not_set);
        assert!(!value.is_out_of_range);
        assert_eq!(value.to_iso8601_string(), "2010-08-12T21:06:31.546875Z");
    }

    #[test]
    fn test_known_value_with_offset() {
        let filetime: Filetime = Filetime::new(0x01cb3a623d0a17ce);
        let value: TimestampValue = filetime.to_timestamp_value(-300);
        assert_eq!(value.hour, 16);
        assert!(value.to_iso8601_string().ends_with("-05:00"));
    }

    #[test]
    fn test_out_of_range() {
        // Year 10000 and beyond is treated as corrupt.
        let filetime: Filetime = Filetime::new(u64::MAX - 1);
        let value: TimestampValue = filetime.to_timestamp_value(0);
        assert!(value.is_out_of_range);
        assert_eq!(value.to_iso8601_string(), "");
    }

    #[test]
    fn test_round_trip_posix_seconds() {
        let filetime: Filetime = Filetime::new(0x01cb3a623d0a17ce);
        let value: TimestampValue = filetime.to_timestamp_value(0);
        assert_eq!(value.to_posix_seconds(), Some(filetime.to_posix_timestamp()));
    }
}
