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
use mft_parser::ntfs::OutputRow;

use super::full_path_or_name;

/// Writes every row as `<mft><record>...</record></mft>`. Hand-rolled
/// rather than pulled in from a crate: the retrieved reference pack has no
/// XML dependency anywhere, and the escaping surface this format needs is
/// small enough to own directly.
pub fn write(output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    let file: File = File::create(output).map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to create XML output file", error)
    })?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to write XML output", error)
    })?;
    writeln!(writer, "<mft>").map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to write XML output", error)
    })?;

    for row in rows {
        write_record(&mut writer, row).map_err(|error| {
            mft_core::error_trace_new_with_error!("Unable to write XML record", error)
        })?;
    }

    writeln!(writer, "</mft>").map_err(|error| {
        mft_core::error_trace_new_with_error!("Unable to write XML output", error)
    })
}

fn write_record(writer: &mut impl Write, row: &OutputRow) -> std::io::Result<()> {
    writeln!(writer, "  <record>")?;
    writeln!(writer, "    <record_number>{}</record_number>", row.record_number)?;
    writeln!(writer, "    <sequence_number>{}</sequence_number>", row.sequence_number)?;
    writeln!(writer, "    <active>{}</active>", row.in_use)?;
    writeln!(writer, "    <directory>{}</directory>", row.is_directory)?;
    writeln!(writer, "    <has_ads>{}</has_ads>", row.has_ads)?;
    writeln!(writer, "    <parent_record_number>{}</parent_record_number>", row.parent_record_number)?;
    writeln!(writer, "    <filename>{}</filename>", escape(&row.file_name))?;
    writeln!(writer, "    <full_path>{}</full_path>", escape(&full_path_or_name(row)))?;
    writeln!(writer, "    <std_creation_time>{}</std_creation_time>", row.std_creation_time.to_iso8601_string())?;
    writeln!(writer, "    <std_modification_time>{}</std_modification_time>", row.std_modification_time.to_iso8601_string())?;
    writeln!(writer, "    <std_entry_modification_time>{}</std_entry_modification_time>", row.std_entry_modification_time.to_iso8601_string())?;
    writeln!(writer, "    <std_access_time>{}</std_access_time>", row.std_access_time.to_iso8601_string())?;
    writeln!(writer, "    <fn_creation_time>{}</fn_creation_time>", row.fn_creation_time.to_iso8601_string())?;
    writeln!(writer, "    <fn_modification_time>{}</fn_modification_time>", row.fn_modification_time.to_iso8601_string())?;
    writeln!(writer, "    <fn_entry_modification_time>{}</fn_entry_modification_time>", row.fn_entry_modification_time.to_iso8601_string())?;
    writeln!(writer, "    <fn_access_time>{}</fn_access_time>", row.fn_access_time.to_iso8601_string())?;
    writeln!(writer, "    <logical_size>{}</logical_size>", row.logical_size)?;
    writeln!(writer, "    <physical_size>{}</physical_size>", row.physical_size)?;
    if let Some(object_id) = &row.object_id {
        writeln!(writer, "    <object_id>{}</object_id>", escape(object_id))?;
    }
    if let Some(hashes) = &row.hashes {
        writeln!(writer, "    <md5>{}</md5>", hashes.md5)?;
        writeln!(writer, "    <sha256>{}</sha256>", hashes.sha256)?;
        writeln!(writer, "    <sha512>{}</sha512>", hashes.sha512)?;
        writeln!(writer, "    <crc32>{}</crc32>", hashes.crc32)?;
    }
    writeln!(writer, "    <notes>{}</notes>", escape(&super::notes_column(row)))?;
    writeln!(writer, "  </record>")
}

/// Escapes the five characters XML text content requires.
fn escape(value: &str) -> String {
    let mut escaped: String = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a & b <c>"), "a &amp; b &lt;c&gt;");
    }
}
