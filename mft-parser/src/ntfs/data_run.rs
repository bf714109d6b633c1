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

use mft_types::ByteReader;

use super::errors::{NtfsErrorKind, NtfsNote};

/// A single (length, LCN) pair of a non-resident attribute's run list.
///
/// `lcn` is `None` for a sparse run (a run whose offset field declared zero
/// width); otherwise it is the cumulative, already-delta-applied logical
/// cluster number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NtfsDataRun {
    pub length_in_clusters: u64,
    pub lcn: Option<i64>,
}

/// Decodes the compressed VCN-to-LCN run list starting at `offset` in
/// `data`. Stops at the terminating 0x00 header byte or the end of the
/// buffer, whichever comes first; a truncated list is reported via `notes`
/// but whatever runs were decoded are still returned.
pub fn decode_data_runs(
    data: &[u8],
    offset: usize,
    notes: &mut Vec<NtfsNote>,
) -> Vec<NtfsDataRun> {
    let reader: ByteReader = ByteReader::new(data);
    let mut runs: Vec<NtfsDataRun> = Vec::new();
    let mut cursor: usize = offset;
    let mut running_lcn: i64 = 0;

    loop {
        let header_byte: u8 = match reader.read_u8(cursor) {
            Ok(value) => value,
            Err(_) => {
                notes.push(NtfsNote::new(
                    NtfsErrorKind::MalformedDataRun,
                    "data run list runs past the end of the attribute",
                ));
                break;
            }
        };
        if header_byte == 0x00 {
            break;
        }
        let length_width: usize = (header_byte & 0x0f) as usize;
        let offset_width: usize = ((header_byte >> 4) & 0x0f) as usize;
        cursor += 1;

        let length_in_clusters: u64 = match reader.read_unsigned_variable(cursor, length_width) {
            Ok(value) => value,
            Err(_) => {
                notes.push(NtfsNote::new(
                    NtfsErrorKind::MalformedDataRun,
                    "data run length field runs past the end of the attribute",
                ));
                break;
            }
        };
        cursor += length_width;

        let lcn: Option<i64> = if offset_width == 0 {
            None
        } else {
            let lcn_delta: i64 = match reader.read_signed_variable(cursor, offset_width) {
                Ok(value) => value,
                Err(_) => {
                    notes.push(NtfsNote::new(
                        NtfsErrorKind::MalformedDataRun,
                        "data run offset field runs past the end of the attribute",
                    ));
                    break;
                }
            };
            running_lcn += lcn_delta;
            Some(running_lcn)
        };
        cursor += offset_width;

        runs.push(NtfsDataRun {
            length_in_clusters: length_in_clusters,
            lcn: lcn,
        });
    }

    runs
}

/// Sum of the run lengths, used to check against `ceil(allocated_size /
/// cluster_size)` per the data-run size invariant.
pub fn total_length_in_clusters(runs: &[NtfsDataRun]) -> u64 {
    runs.iter().map(|run| run.length_in_clusters).sum()
}
