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

mod crc32;

pub use crc32::{Crc32Context, ReversedCrc32Context};

/// The IEEE 802.3 CRC-32 polynomial, used by PKZIP, Ethernet and most file formats.
pub const CRC32_IEEE_POLYNOMIAL: u32 = 0x04c11db7;

/// Creates a context for calculating an IEEE 802.3 CRC-32 checksum.
pub fn new_crc32_context() -> Crc32Context {
    Crc32Context::new(CRC32_IEEE_POLYNOMIAL, 0xffffffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_crc32_context() {
        let mut test_context: Crc32Context = new_crc32_context();

        test_context.update(b"123456789");
        let test_checksum: u32 = test_context.finalize();

        assert_eq!(test_checksum, 0xcbf43926);
    }
}
