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

/// Survivable per-record anomaly kinds.
///
/// Every value here attaches to a record's notes rather than aborting the
/// run; only a failed open of the input file or a bad signature on the
/// first record is treated as fatal by the streaming driver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NtfsErrorKind {
    IoError,
    Truncated,
    BadSignature,
    FixupMismatch,
    AttributeOverflow,
    UnknownAttributeType,
    MalformedTimestamp,
    MalformedDataRun,
    CycleInPath,
    OrphanRecord,
    MissingExtension,
    Cancelled,
}

impl fmt::Display for NtfsErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            NtfsErrorKind::IoError => "IoError",
            NtfsErrorKind::Truncated => "Truncated",
            NtfsErrorKind::BadSignature => "BadSignature",
            NtfsErrorKind::FixupMismatch => "FixupMismatch",
            NtfsErrorKind::AttributeOverflow => "AttributeOverflow",
            NtfsErrorKind::UnknownAttributeType => "UnknownAttributeType",
            NtfsErrorKind::MalformedTimestamp => "MalformedTimestamp",
            NtfsErrorKind::MalformedDataRun => "MalformedDataRun",
            NtfsErrorKind::CycleInPath => "CycleInPath",
            NtfsErrorKind::OrphanRecord => "OrphanRecord",
            NtfsErrorKind::MissingExtension => "MissingExtension",
            NtfsErrorKind::Cancelled => "Cancelled",
        };
        write!(formatter, "{}", name)
    }
}

/// A single note attached to a record: the anomaly kind plus a
/// human-readable message, joined by the serializers with a semicolon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NtfsNote {
    pub kind: NtfsErrorKind,
    pub message: String,
}

impl NtfsNote {
    pub fn new(kind: NtfsErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for NtfsNote {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let note: NtfsNote = NtfsNote::new(NtfsErrorKind::FixupMismatch, "sector 1");
        assert_eq!(note.to_string(), "FixupMismatch: sector 1");
    }
}
