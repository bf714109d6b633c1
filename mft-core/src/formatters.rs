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

/// Formats a byte sequence as a lowercase hexadecimal string.
pub fn format_as_string(data: &[u8]) -> String {
    data.iter()
        .map(|byte_value| format!("{:02x}", byte_value))
        .collect::<Vec<String>>()
        .join("")
}

/// Formats a byte sequence as a hexdump, optionally grouping bytes per 4-byte word.
pub fn format_as_hexdump(data: &[u8], group: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (line_offset, line_data) in data.chunks(16).enumerate() {
        let mut hex_column: String = String::new();

        for (byte_index, byte_value) in line_data.iter().enumerate() {
            if group && byte_index > 0 && byte_index % 4 == 0 {
                hex_column.push(' ');
            }
            hex_column.push_str(&format!("{:02x} ", byte_value));
        }
        let ascii_column: String = line_data
            .iter()
            .map(|byte_value| {
                if *byte_value >= 0x20 && *byte_value < 0x7f {
                    *byte_value as char
                } else {
                    '.'
                }
            })
            .collect::<String>();

        lines.push(format!(
            "{:08x}  {:<54}  {}\n",
            line_offset * 16,
            hex_column,
            ascii_column
        ));
    }
    lines.join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_as_string() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(format_as_string(&data), "deadbeef");
    }

    #[test]
    fn test_format_as_hexdump() {
        let data: Vec<u8> = vec![0x41, 0x42, 0x43];
        let hexdump: String = format_as_hexdump(&data, false);
        assert!(hexdump.contains("41 42 43"));
        assert!(hexdump.contains("ABC"));
    }
}
