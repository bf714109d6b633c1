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

use std::error::Error;
use std::fmt;

use super::{
    bytes_to_i16_le, bytes_to_i32_le, bytes_to_i64_le, bytes_to_u16_le, bytes_to_u32_le,
    bytes_to_u64_le,
};

/// Raised when a read would run past the end of the underlying buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutOfBoundsError {
    pub offset: usize,
    pub length: usize,
    pub buffer_size: usize,
}

impl Error for OutOfBoundsError {}

impl fmt::Display for OutOfBoundsError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "Unable to read {} bytes at offset {} from a buffer of size {}",
            self.length, self.offset, self.buffer_size,
        )
    }
}

/// Bounds-checked little-endian primitive reader over a borrowed buffer.
///
/// Every accessor takes an explicit offset; the reader itself holds no
/// cursor, so a record's attribute walk can re-read overlapping spans
/// without juggling a separate position.
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Creates a new reader over a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data: data }
    }

    /// Retrieves the size of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    fn check_bounds(&self, offset: usize, length: usize) -> Result<(), OutOfBoundsError> {
        if offset.checked_add(length).map_or(true, |end| end > self.data.len()) {
            return Err(OutOfBoundsError {
                offset: offset,
                length: length,
                buffer_size: self.data.len(),
            });
        }
        Ok(())
    }

    /// Reads a fixed-size slice at an offset without copying.
    pub fn read_fixed_bytes(&self, offset: usize, length: usize) -> Result<&'a [u8], OutOfBoundsError> {
        self.check_bounds(offset, length)?;
        Ok(&self.data[offset..offset + length])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, OutOfBoundsError> {
        self.check_bounds(offset, 1)?;
        Ok(self.data[offset])
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, OutOfBoundsError> {
        self.check_bounds(offset, 1)?;
        Ok(self.data[offset] as i8)
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, OutOfBoundsError> {
        self.check_bounds(offset, 2)?;
        Ok(bytes_to_u16_le!(self.data, offset))
    }

    pub fn read_i16(&self, offset: usize) -> Result<i16, OutOfBoundsError> {
        self.check_bounds(offset, 2)?;
        Ok(bytes_to_i16_le!(self.data, offset))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, OutOfBoundsError> {
        self.check_bounds(offset, 4)?;
        Ok(bytes_to_u32_le!(self.data, offset))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, OutOfBoundsError> {
        self.check_bounds(offset, 4)?;
        Ok(bytes_to_i32_le!(self.data, offset))
    }

    pub fn read_u64(&self, offset: usize) -> Result<u64, OutOfBoundsError> {
        self.check_bounds(offset, 8)?;
        Ok(bytes_to_u64_le!(self.data, offset))
    }

    pub fn read_i64(&self, offset: usize) -> Result<i64, OutOfBoundsError> {
        self.check_bounds(offset, 8)?;
        Ok(bytes_to_i64_le!(self.data, offset))
    }

    /// Reads a signed, sign-extended integer of an arbitrary byte width (1-8),
    /// used for data-run LCN deltas whose encoded width varies per run.
    pub fn read_signed_variable(&self, offset: usize, width: usize) -> Result<i64, OutOfBoundsError> {
        if width == 0 {
            return Ok(0);
        }
        let bytes: &[u8] = self.read_fixed_bytes(offset, width)?;
        let mut value: i64 = 0;
        for (index, byte_value) in bytes.iter().enumerate() {
            value |= (*byte_value as i64) << (8 * index);
        }
        let sign_bit: i64 = 1 << (8 * width - 1);
        if value & sign_bit != 0 {
            value -= 1 << (8 * width);
        }
        Ok(value)
    }

    /// Reads an unsigned integer of an arbitrary byte width (1-8).
    pub fn read_unsigned_variable(&self, offset: usize, width: usize) -> Result<u64, OutOfBoundsError> {
        if width == 0 {
            return Ok(0);
        }
        let bytes: &[u8] = self.read_fixed_bytes(offset, width)?;
        let mut value: u64 = 0;
        for (index, byte_value) in bytes.iter().enumerate() {
            value |= (*byte_value as u64) << (8 * index);
        }
        Ok(value)
    }
}
