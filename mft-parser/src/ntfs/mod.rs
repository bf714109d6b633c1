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

//! New Technologies File System (NTFS) Master File Table analysis.

mod anomaly;
mod attribute;
mod attribute_header;
mod attribute_list;
pub mod config;
pub mod constants;
mod data_attribute;
mod data_run;
mod driver;
pub mod errors;
mod file_name;
mod fixup;
mod hash_pipeline;
mod index;
mod object_id;
pub mod output;
mod path_resolver;
pub mod record;
mod record_header;
mod reparse_point;
mod security_descriptor;
mod standard_information;
mod volume_information;
mod volume_name;

pub use config::{Config, Profile};
pub use driver::{run, DriverSummary};
pub use errors::{NtfsErrorKind, NtfsNote};
pub use output::OutputRow;
pub use record::NtfsRecord;
