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

mod bodyfile;
mod csv_writer;
mod json;
mod sqlite;
mod timeline;
mod xml;

use std::path::Path;

use mft_core::ErrorTrace;
use mft_parser::ntfs::OutputRow;

/// The output formats the `--csv|--json|--xml|--excel|--body|--timeline|--sqlite|--tsk|--l2t`
/// flags select between. `Excel` is a CSV variant with spreadsheet-friendly
/// date formatting rather than a distinct container format (the source this
/// analyzer is modeled on is inconsistent about whether it is its own
/// format).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Csv,
    Json,
    Xml,
    Excel,
    BodyFile,
    Timeline,
    Sqlite,
    Tsk,
    L2t,
}

/// Writes every row to `output` in the requested format.
pub fn write_rows(format: OutputFormat, output: &Path, rows: &[OutputRow]) -> Result<(), ErrorTrace> {
    match format {
        OutputFormat::Csv => csv_writer::write(output, rows, false),
        OutputFormat::Excel => csv_writer::write(output, rows, true),
        OutputFormat::Json => json::write(output, rows),
        OutputFormat::Xml => xml::write(output, rows),
        OutputFormat::BodyFile => bodyfile::write(output, rows),
        OutputFormat::Timeline | OutputFormat::Tsk => timeline::write_tsk(output, rows),
        OutputFormat::L2t => timeline::write_l2t(output, rows),
        OutputFormat::Sqlite => sqlite::write(output, rows),
    }
}

/// Joins a record's anomaly flags and notes into the semicolon-separated
/// free-form column every serializer exposes, per the shared row schema.
pub(crate) fn notes_column(row: &OutputRow) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(row.anomaly_flags.len() + row.notes.len());
    parts.extend(row.anomaly_flags.iter().cloned());
    parts.extend(row.notes.iter().cloned());
    parts.join("; ")
}

/// Renders the full path, falling back to the bare filename when the path
/// resolver has not run (e.g. a serializer invoked directly on rows that
/// skipped path resolution).
pub(crate) fn full_path_or_name(row: &OutputRow) -> String {
    row.full_path.clone().unwrap_or_else(|| row.file_name.clone())
}
