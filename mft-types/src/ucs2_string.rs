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

use std::cmp::Ordering;

use super::{bytes_to_u16_be, bytes_to_u16_le};

/// 16-bit Universal Coded Character Set (UCS-2) string.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ucs2String {
    /// Elements.
    pub elements: Vec<u16>,
}

impl Ucs2String {
    /// Creates a new UCS-2 string.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Reads a big-endian UCS-2 string from a byte sequence.
    pub fn from_be_bytes(data: &[u8]) -> Self {
        let data_size: usize = data.len();
        let mut elements: Vec<u16> = Vec::new();

        for data_offset in (0..data_size).step_by(2) {
            let value_16bit: u16 = bytes_to_u16_be!(data, data_offset);
            if value_16bit == 0 {
                break;
            }
            elements.push(value_16bit);
        }
        Self { elements: elements }
    }

    /// Reads a little-endian UCS-2 string from a byte sequence.
    pub fn from_le_bytes(data: &[u8]) -> Self {
        let mut elements: Vec<u16> = Vec::new();
        Ucs2String::read_elements_le(&mut elements, data);

        Self { elements: elements }
    }

    /// Determines if the UCS-2 string is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Retrieves the length (or size) of the UCS-2 string.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    // TODO: add read_elements_be

    /// Reads a little-endian UCS-2 string from a byte sequence.
    pub fn read_elements_le(elements: &mut Vec<u16>, data: &[u8]) {
        let data_size: usize = data.len();

        for data_offset in (0..data_size).step_by(2) {
            let value_16bit: u16 = bytes_to_u16_le!(data, data_offset);
            if value_16bit == 0 {
                break;
            }
            elements.push(value_16bit);
        }
    }

    /// Compares two UCS-2 strings.
    pub fn compare(&self, other: &Self) -> Ordering {
        let self_size: usize = self.elements.len();
        let other_size: usize = other.len();

        let mut element_index: usize = 0;
        while element_index < self_size && element_index < other_size {
            let self_element: u16 = self.elements[element_index];
            let other_element: u16 = other.elements[element_index];

            if self_element < other_element {
                return Ordering::Less;
            }
            if self_element > other_element {
                return Ordering::Greater;
            }
            element_index += 1;
        }
        if element_index < other_size {
            return Ordering::Less;
        }
        if element_index < self_size {
            return Ordering::Greater;
        }
        Ordering::Equal
    }

    /// Converts the UCS-2 string to a `String`.
    pub fn to_string(&self) -> String {
        // TODO: escape the escape character (\)
        self.elements
            .iter()
            .map(|element| match char::from_u32(*element as u32) {
                Some(unicode_character) => unicode_character.to_string(),
                None => format!("\\{{{:04x}}}", element),
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

impl From<&[u16]> for Ucs2String {
    /// Converts a [`&[u16]`] into a [`Ucs2String`]
    fn from(slice: &[u16]) -> Self {
        let elements: &[u16] = match slice.iter().position(|ucs2_value| *ucs2_value == 0) {
            Some(slice_index) => &slice[0..slice_index],
            None => &slice,
        };
        Self {
            elements: Vec::from(elements),
        }
    }
}

impl From<&str> for Ucs2String {
    /// Converts a [`&str`] into a [`Ucs2String`]
    fn from(string: &str) -> Self {
        // TODO: add support for escaped non UTF-16 characters.
        Self {
            elements: string.encode_utf16().collect(),
        }
    }
}

impl From<&String> for Ucs2String {
    /// Converts a [`&String`] into a [`Ucs2String`]
    #[inline(always)]
    fn from(string: &String) -> Self {
        Self::from(string.as_str())
    }
}

impl From<&Vec<u16>> for Ucs2String {
    /// Converts a [`&Vec<u16>`] into a [`Ucs2String`]
    #[inline(always)]
    fn from(vector: &Vec<u16>) -> Self {
        Self::from(vector.as_slice())
    }
}
