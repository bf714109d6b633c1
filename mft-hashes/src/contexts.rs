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

use md5::{Digest, Md5};
use sha2::{Sha256, Sha512};

use mft_checksums::new_crc32_context;
use mft_core::formatters::format_as_string;

/// A streaming digest hash context: feed content with `update`, then
/// consume it with `finalize` to obtain a lowercase hex digest.
pub trait DigestHashContext {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> String;
}

/// MD5 digest context.
#[derive(Default)]
pub struct Md5Context {
    hasher: Md5,
}

impl Md5Context {
    pub fn new() -> Self {
        Self { hasher: Md5::new() }
    }
}

impl DigestHashContext for Md5Context {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self) -> String {
        format_as_string(&self.hasher.finalize())
    }
}

/// SHA-256 digest context.
#[derive(Default)]
pub struct Sha256Context {
    hasher: Sha256,
}

impl Sha256Context {
    pub fn new() -> Self {
        Self { hasher: Sha256::new() }
    }
}

impl DigestHashContext for Sha256Context {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self) -> String {
        format_as_string(&self.hasher.finalize())
    }
}

/// SHA-512 digest context.
#[derive(Default)]
pub struct Sha512Context {
    hasher: Sha512,
}

impl Sha512Context {
    pub fn new() -> Self {
        Self { hasher: Sha512::new() }
    }
}

impl DigestHashContext for Sha512Context {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self) -> String {
        format_as_string(&self.hasher.finalize())
    }
}

/// CRC-32 (IEEE 802.3) context, rendered as an 8-digit lowercase hex string
/// for consistency with the other digest contexts.
pub struct Crc32Context {
    context: mft_checksums::Crc32Context,
}

impl Default for Crc32Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32Context {
    pub fn new() -> Self {
        Self { context: new_crc32_context() }
    }
}

impl DigestHashContext for Crc32Context {
    fn update(&mut self, data: &[u8]) {
        self.context.update(data);
    }

    fn finalize(self) -> String {
        format!("{:08x}", self.context.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_empty() {
        let context: Md5Context = Md5Context::new();
        assert_eq!(context.finalize(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_sha256_known_value() {
        let mut context: Sha256Context = Sha256Context::new();
        context.update(b"abc");
        assert_eq!(
            context.finalize(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        );
    }

    #[test]
    fn test_crc32_known_value() {
        let mut context: Crc32Context = Crc32Context::new();
        context.update(b"123456789");
        assert_eq!(context.finalize(), "cbf43926");
    }
}
