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

use std::path::PathBuf;

use clap::Parser;

use mft_parser::ntfs::Profile;

use crate::formats::OutputFormat;

#[derive(Parser)]
#[command(version, about = "Forensic analyzer for NTFS Master File Table images", long_about = None)]
pub struct CommandLineArguments {
    /// Path of the MFT image to analyze
    #[arg(short = 'f', long = "file")]
    pub input: PathBuf,

    /// Path of the file to write results to
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    #[arg(long, default_value_t = false)]
    pub csv: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub xml: bool,

    /// CSV with spreadsheet-friendly date formatting
    #[arg(long, default_value_t = false)]
    pub excel: bool,

    #[arg(long, default_value_t = false)]
    pub body: bool,

    #[arg(long, default_value_t = false)]
    pub timeline: bool,

    #[arg(long, default_value_t = false)]
    pub sqlite: bool,

    /// Sleuth Kit style timeline, one row per timestamp
    #[arg(long, default_value_t = false)]
    pub tsk: bool,

    /// log2timeline 17-column CSV
    #[arg(long, default_value_t = false)]
    pub l2t: bool,

    /// Compute MD5/SHA-256/SHA-512/CRC-32 over resident $DATA content
    #[arg(short = 'H', long = "hash", default_value_t = false)]
    pub hash: bool,

    /// Records per in-memory batch
    #[arg(long = "chunk-size")]
    pub chunk_size: Option<usize>,

    /// Hash worker pool size
    #[arg(long = "hash-processes")]
    pub hash_processes: Option<usize>,

    #[arg(long = "no-multiprocessing-hashes", default_value_t = false)]
    pub no_multiprocessing_hashes: bool,

    /// Named configuration preset
    #[arg(long, value_enum, default_value_t = ProfileArgument::Default)]
    pub profile: ProfileArgument,

    /// Configuration file (profile selection only; file parsing is external)
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Increase progress verbosity, repeatable
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Increase debug output, repeatable
    #[arg(short = 'd', action = clap::ArgAction::Count)]
    pub debug: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProfileArgument {
    Default,
    Quick,
    Forensic,
    Performance,
}

impl From<ProfileArgument> for Profile {
    fn from(value: ProfileArgument) -> Self {
        match value {
            ProfileArgument::Default => Profile::Default,
            ProfileArgument::Quick => Profile::Quick,
            ProfileArgument::Forensic => Profile::Forensic,
            ProfileArgument::Performance => Profile::Performance,
        }
    }
}

impl CommandLineArguments {
    /// Resolves the single output format from the mutually exclusive flags,
    /// defaulting to CSV when none are set.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        let chosen: Vec<(&str, OutputFormat)> = vec![
            ("--csv", OutputFormat::Csv),
            ("--json", OutputFormat::Json),
            ("--xml", OutputFormat::Xml),
            ("--excel", OutputFormat::Excel),
            ("--body", OutputFormat::BodyFile),
            ("--timeline", OutputFormat::Timeline),
            ("--sqlite", OutputFormat::Sqlite),
            ("--tsk", OutputFormat::Tsk),
            ("--l2t", OutputFormat::L2t),
        ]
        .into_iter()
        .filter(|(flag, _)| self.is_set(flag))
        .collect();

        match chosen.len() {
            0 => Ok(OutputFormat::Csv),
            1 => Ok(chosen[0].1),
            _ => Err(format!(
                "exactly one of --csv, --json, --xml, --excel, --body, --timeline, --sqlite, --tsk, --l2t may be given, found: {}",
                chosen.iter().map(|(flag, _)| *flag).collect::<Vec<_>>().join(", ")
            )),
        }
    }

    fn is_set(&self, flag: &str) -> bool {
        match flag {
            "--csv" => self.csv,
            "--json" => self.json,
            "--xml" => self.xml,
            "--excel" => self.excel,
            "--body" => self.body,
            "--timeline" => self.timeline,
            "--sqlite" => self.sqlite,
            "--tsk" => self.tsk,
            "--l2t" => self.l2t,
            _ => false,
        }
    }
}
