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

mod cli;
mod formats;

use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use mft_core::mediator::Mediator;
use mft_core::open_os_data_stream;
use mft_parser::ntfs::{run, Config, DriverSummary, OutputRow, Profile};

use cli::CommandLineArguments;
use formats::{write_rows, OutputFormat};

fn main() -> ExitCode {
    let arguments: CommandLineArguments = CommandLineArguments::parse();

    let format: OutputFormat = match arguments.output_format() {
        Ok(format) => format,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    Mediator {
        debug_output: arguments.debug > 0,
    }
    .make_current();

    // The input is opened once up front purely to distinguish "file cannot
    // be opened" (exit 3) from a later parse failure (exit 5); the driver
    // opens it again for the actual read.
    if let Err(error) = open_os_data_stream(&arguments.input) {
        eprintln!("Unable to open input file: {}", error);
        return ExitCode::from(3);
    }

    let config: Config = build_config(&arguments);
    let cancel: AtomicBool = AtomicBool::new(false);

    let progress_bar: Option<ProgressBar> = if arguments.verbose > 0 {
        Some(build_spinner())
    } else {
        None
    };

    let (rows, summary): (Vec<OutputRow>, DriverSummary) = match run(&arguments.input, &config, &cancel) {
        Ok(result) => result,
        Err(error) => {
            if let Some(progress_bar) = &progress_bar {
                progress_bar.abandon();
            }
            eprintln!("Fatal error parsing MFT: {}", error);
            return ExitCode::from(5);
        }
    };
    if let Some(progress_bar) = &progress_bar {
        progress_bar.finish_and_clear();
    }

    if let Err(error) = write_rows(format, &arguments.output, &rows) {
        eprintln!("Unable to write output: {}", error);
        return ExitCode::from(4);
    }

    print_summary(&summary, arguments.verbose);
    ExitCode::SUCCESS
}

/// Builds the run configuration from the selected profile, then applies any
/// explicit overrides the command line gave for chunk size and hashing.
fn build_config(arguments: &CommandLineArguments) -> Config {
    let profile: Profile = arguments.profile.into();
    let mut config: Config = Config::from_profile(profile);

    if let Some(chunk_size) = arguments.chunk_size {
        config.chunk_size = chunk_size;
    }
    if arguments.hash {
        config.compute_hashes = true;
    }
    if let Some(hash_processes) = arguments.hash_processes {
        config.hash_worker_count = hash_processes;
    }
    if arguments.no_multiprocessing_hashes {
        config.hash_worker_count = 0;
    }
    config
}

/// An indeterminate spinner shown while the driver runs. The driver itself
/// reports no intermediate progress (it is a single synchronous pass), so
/// this communicates liveness rather than a record-by-record count.
fn build_spinner() -> ProgressBar {
    let progress_bar: ProgressBar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} analyzing MFT... elapsed: {elapsed_precise}") {
        progress_bar.set_style(style);
    }
    progress_bar.enable_steady_tick(std::time::Duration::from_millis(120));
    progress_bar
}

fn print_summary(summary: &DriverSummary, verbosity: u8) {
    if verbosity == 0 {
        return;
    }
    println!(
        "processed {} records: {} active, {} deleted, {} directories, {} incomplete extensions{}",
        summary.total_records,
        summary.in_use_records,
        summary.deleted_records,
        summary.directory_records,
        summary.incomplete_extensions,
        if summary.cancelled { " (cancelled)" } else { "" },
    );
}
