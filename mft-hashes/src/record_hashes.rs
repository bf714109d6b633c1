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

use super::contexts::{Crc32Context, DigestHashContext, Md5Context, Sha256Context, Sha512Context};

/// The four digest hashes computed over a record's resident `$DATA` content.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordHashes {
    pub md5: String,
    pub sha256: String,
    pub sha512: String,
    pub crc32: String,
}

impl RecordHashes {
    /// Computes all four digests over a single byte slice in one pass.
    pub fn compute(data: &[u8]) -> Self {
        let mut md5_context: Md5Context = Md5Context::new();
        let mut sha256_context: Sha256Context = Sha256Context::new();
        let mut sha512_context: Sha512Context = Sha512Context::new();
        let mut crc32_context: Crc32Context = Crc32Context::new();

        md5_context.update(data);
        sha256_context.update(data);
        sha512_context.update(data);
        crc32_context.update(data);

        Self {
            md5: md5_context.finalize(),
            sha256: sha256_context.finalize(),
            sha512: sha512_context.finalize(),
            crc32: crc32_context.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        let data: &[u8] = b"hello, mft";
        let first: RecordHashes = RecordHashes::compute(data);
        let second: RecordHashes = RecordHashes::compute(data);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_empty() {
        let hashes: RecordHashes = RecordHashes::compute(&[]);
        assert_eq!(hashes.md5, "d41d8cd98f00b204e9800998ecf8427e");
    }
}
