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

use super::filetime::Filetime;
use super::posix::{PosixTime32, PosixTime64Ns};

/// A date and time value as found in an NTFS structure.
#[derive(Clone, Debug, PartialEq)]
pub enum DateTime {
    Filetime(Filetime),
    NotSet,
    PosixTime32(PosixTime32),
    PosixTime64Ns(PosixTime64Ns),
}

impl DateTime {
    /// Retrieves an ISO 8601 string representation of the timestamp.
    pub fn to_iso8601_string(&self) -> String {
        match self {
            DateTime::Filetime(value) => value.to_iso8601_string(),
            DateTime::NotSet => String::from("not set"),
            DateTime::PosixTime32(value) => value.to_iso8601_string(),
            DateTime::PosixTime64Ns(value) => value.to_iso8601_string(),
        }
    }

    /// Retrieves the number of seconds since the POSIX epoch (1970-01-01), if known.
    pub fn to_posix_timestamp(&self) -> Option<i64> {
        match self {
            DateTime::Filetime(value) => Some(value.to_posix_timestamp()),
            DateTime::NotSet => None,
            DateTime::PosixTime32(value) => Some(value.timestamp as i64),
            DateTime::PosixTime64Ns(value) => Some(value.to_posix_timestamp()),
        }
    }
}

impl fmt::Display for DateTime {
    /// Formats the timestamp for display.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.to_iso8601_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_set_to_iso8601_string() {
        let test_struct: DateTime = DateTime::NotSet;
        assert_eq!(test_struct.to_iso8601_string().as_str(), "not set");
    }

    #[test]
    fn test_not_set_to_posix_timestamp() {
        let test_struct: DateTime = DateTime::NotSet;
        assert_eq!(test_struct.to_posix_timestamp(), None);
    }
}
