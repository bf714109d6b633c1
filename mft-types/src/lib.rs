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

mod byte_reader;
mod byte_string;
mod errors;
pub mod macros;
mod ucs2_string;
mod uuid;

pub use byte_reader::{ByteReader, OutOfBoundsError};
pub use byte_string::ByteString;
pub use errors::ParseError;
pub use ucs2_string::Ucs2String;
pub use uuid::Uuid;
