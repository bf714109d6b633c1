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

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mft_core::ErrorTrace;
use mft_datetime::TimestampValue;
use mft_parser::ntfs::OutputRow;

use super::full_path_or_name;

/// Writes the pipe-delimited `mactime` body-file format:
/// `MD5|name|inode|mode_as_string|uid|gid|size|atime|mtime|ctime|crtime`.
///
/// Uses the STD timestamp group; the FN group is the alternative the row
/// schema exposes for the same columns when the source's rename/creation
/// times are preferred over its any-change times.
pub fn write(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    let file: File = File::create(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create body-file output", error)
    })?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    for row in rows {
        let mode: &str = if row.is_directory { "d/drwxrwxrwx" } else { "r/rrwxrwxrwx" };
        let inode: String = format!("{}-{}", row.record_number, row.sequence_number);

        writeln!(
            writer,
            "{}|{}|{}|{}|0|0|{}|{}|{}|{}|{}",
            row.hashes.as_ref().map_or("0", |hashes| hashes.md5.as_str()),
            full_path_or_name(row),
            inode,
            mode,
            row.logical_size,
            epoch_seconds(&row.std_access_time),
            epoch_seconds(&row.std_modification_time),
            epoch_seconds(&row.std_entry_modification_time),
            epoch_seconds(&row.std_creation_time),
        )
        .map_err(|error| mft_core::error_trace_new_with_error!("Unable to write body-file row", error))?;
    }
    Ok(())
}

fn epoch_seconds(time: &TimestampValue) -> String {
    time.to_posix_seconds().map_or(String::from("0"), |seconds| seconds.to_string())
}
