// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! Integration tests for the chunked backfill driver.

use gneiss::exec::backfill::{run_backfill, ChunkBackfiller, KeySpan, TxnRunner};

/// Runner that retries conflict-tagged failures, like the engine's managed
/// transaction wrapper.
struct RetryingRunner {
    max_retries: usize,
}

impl TxnRunner for RetryingRunner {
    fn run(&self, work: &mut dyn FnMut() -> Result<(), String>) -> Result<(), String> {
        let mut tries = 0;
        loop {
            match work() {
                Ok(()) => return Ok(()),
                Err(err) if err.contains("conflict") && tries < self.max_retries => {
                    tries += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Walks a keyspace of single-byte keys `[0, limit)`, failing the first
/// attempt of every chunk with a retryable conflict. Work is idempotent:
/// a retried attempt reprocesses the same span head.
struct FlakyBackfiller {
    limit: u8,
    fail_next: bool,
    attempts: usize,
    committed_chunks: usize,
}

impl FlakyBackfiller {
    fn new(limit: u8) -> Self {
        Self {
            limit,
            fail_next: true,
            attempts: 0,
            committed_chunks: 0,
        }
    }
}

impl ChunkBackfiller for FlakyBackfiller {
    fn run_chunk(
        &mut self,
        span: &KeySpan,
        chunk_size: usize,
    ) -> Result<Option<Vec<u8>>, String> {
        self.attempts += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err("retryable txn conflict".to_string());
        }
        self.fail_next = true;
        self.committed_chunks += 1;
        let at = span.start.first().copied().unwrap_or(0);
        let next = at.saturating_add(chunk_size as u8);
        if next >= self.limit {
            Ok(None)
        } else {
            Ok(Some(vec![next]))
        }
    }
}

#[test]
fn conflicts_are_retried_by_the_runner() {
    let runner = RetryingRunner { max_retries: 2 };
    let mut backfiller = FlakyBackfiller::new(40);
    let outcome = run_backfill(
        &runner,
        &mut backfiller,
        KeySpan::new(vec![0], vec![40]),
        10,
        None,
    )
    .expect("backfill");

    assert_eq!(outcome.chunks_processed, 4);
    assert!(outcome.resume_key.is_none());
    assert_eq!(backfiller.committed_chunks, 4);
    // Every chunk took one conflicted attempt plus one committed attempt.
    assert_eq!(backfiller.attempts, 8);
}

#[test]
fn fatal_errors_propagate_without_retry() {
    struct FatalBackfiller;
    impl ChunkBackfiller for FatalBackfiller {
        fn run_chunk(
            &mut self,
            _span: &KeySpan,
            _chunk_size: usize,
        ) -> Result<Option<Vec<u8>>, String> {
            Err("descriptor mismatch".to_string())
        }
    }

    let runner = RetryingRunner { max_retries: 5 };
    let err = run_backfill(
        &runner,
        &mut FatalBackfiller,
        KeySpan::new(vec![0], vec![1]),
        1,
        None,
    )
    .unwrap_err();
    assert_eq!(err, "descriptor mismatch");
}

#[test]
fn budgeted_run_resumes_where_it_stopped() {
    let runner = RetryingRunner { max_retries: 2 };
    let mut backfiller = FlakyBackfiller::new(60);

    let first = run_backfill(
        &runner,
        &mut backfiller,
        KeySpan::new(vec![0], vec![60]),
        10,
        Some(2),
    )
    .expect("first run");
    assert_eq!(first.chunks_processed, 2);
    let resume_key = first.resume_key.expect("partial completion resume key");
    assert_eq!(resume_key, vec![20]);

    let second = run_backfill(
        &runner,
        &mut backfiller,
        KeySpan::new(resume_key, vec![60]),
        10,
        None,
    )
    .expect("second run");
    assert!(second.resume_key.is_none());
    assert_eq!(first.chunks_processed + second.chunks_processed, 6);
    assert_eq!(backfiller.committed_chunks, 6);
}
