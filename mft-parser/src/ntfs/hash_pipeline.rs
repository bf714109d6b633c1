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

use std::sync::mpsc;
use std::thread;

use mft_hashes::RecordHashes;

/// The only parallel stage of the pipeline: everything else runs on the
/// single streaming-driver thread. A bounded queue hands jobs to a fixed
/// pool of `std::thread` workers; results carry their original index so
/// the caller can restore ascending record-number order regardless of
/// which worker finished first or how the OS scheduled them.
///
/// `worker_count == 0` runs the jobs inline on the calling thread, used by
/// the `--no-multiprocessing-hashes` CLI flag and by profiles that leave
/// hashing off entirely (those never call this at all).
pub fn compute_hashes_ordered(jobs: Vec<Vec<u8>>, worker_count: usize) -> Vec<RecordHashes> {
    if worker_count == 0 || jobs.len() <= 1 {
        return jobs.iter().map(|data| RecordHashes::compute(data)).collect();
    }

    let job_count: usize = jobs.len();
    let (job_sender, job_receiver) = mpsc::channel::<(usize, Vec<u8>)>();
    let job_receiver = std::sync::Arc::new(std::sync::Mutex::new(job_receiver));
    let (result_sender, result_receiver) = mpsc::channel::<(usize, RecordHashes)>();

    let actual_worker_count: usize = worker_count.min(job_count);
    let mut workers: Vec<thread::JoinHandle<()>> = Vec::with_capacity(actual_worker_count);

    for _ in 0..actual_worker_count {
        let job_receiver = job_receiver.clone();
        let result_sender = result_sender.clone();

        workers.push(thread::spawn(move || {
            loop {
                let job = {
                    let receiver = job_receiver.lock().unwrap();
                    receiver.recv()
                };
                match job {
                    Ok((index, data)) => {
                        let hashes: RecordHashes = RecordHashes::compute(&data);
                        if result_sender.send((index, hashes)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }));
    }
    drop(result_sender);

    for (index, data) in jobs.into_iter().enumerate() {
        // The channel is unbounded in std, so this never blocks; the bound
        // on in-flight work is the worker count itself.
        let _ = job_sender.send((index, data));
    }
    drop(job_sender);

    let mut results: Vec<Option<RecordHashes>> = (0..job_count).map(|_| None).collect();
    for (index, hashes) in result_receiver {
        results[index] = Some(hashes);
    }

    for worker in workers {
        let _ = worker.join();
    }

    results.into_iter().map(|hashes| hashes.expect("every job produced exactly one result")).collect()
}
