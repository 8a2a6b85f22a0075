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
//! Chunked transactional backfill driver.
//!
//! Responsibilities:
//! - Converts a contiguous key span plus a chunk size into repeated
//!   bounded-size units of work, one managed transaction per chunk.
//! - Tracks the resume key so a partially completed span can be continued
//!   by a later run.
//!
//! Key exported interfaces:
//! - Types: `KeySpan`, `BackfillOutcome`.
//! - Traits: `TxnRunner`, `ChunkBackfiller`.
//!
//! Current limitations:
//! - Conflict detection and retry live entirely inside the `TxnRunner`
//!   implementation; the driver only observes success or a terminal error.

use tracing::debug;

/// A contiguous key range, end-exclusive. An empty `end` means "to the end
/// of the keyspace".
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySpan {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

impl KeySpan {
    pub fn new(start: Vec<u8>, end: Vec<u8>) -> Self {
        Self { start, end }
    }
}

/// External transaction contract: run `work` under a managed transaction and
/// retry on conflict before returning. The driver never retries on its own;
/// chunk work must stay idempotent so a runner-level retry re-runs it safely.
pub trait TxnRunner {
    fn run(&self, work: &mut dyn FnMut() -> Result<(), String>) -> Result<(), String>;
}

/// One bounded unit of backfill work over the head of a span.
pub trait ChunkBackfiller {
    /// Processes at most `chunk_size` rows starting at `span.start` and
    /// returns the key to resume from, or `None` once the span is exhausted.
    fn run_chunk(&mut self, span: &KeySpan, chunk_size: usize)
        -> Result<Option<Vec<u8>>, String>;
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BackfillOutcome {
    pub chunks_processed: u64,
    /// Key to continue from when the chunk budget ran out before the span was
    /// exhausted; `None` means the span completed.
    pub resume_key: Option<Vec<u8>>,
}

/// Drives `backfiller` over `span`, one transaction per chunk. An optional
/// `chunk_budget` bounds how many chunks this invocation may process; hitting
/// it reports partial completion through `resume_key`.
pub fn run_backfill(
    runner: &dyn TxnRunner,
    backfiller: &mut dyn ChunkBackfiller,
    span: KeySpan,
    chunk_size: usize,
    chunk_budget: Option<u64>,
) -> Result<BackfillOutcome, String> {
    if chunk_size == 0 {
        return Err("backfill chunk size must be positive".to_string());
    }
    let mut remaining = span;
    let mut outcome = BackfillOutcome::default();
    loop {
        if let Some(budget) = chunk_budget {
            if outcome.chunks_processed >= budget {
                debug!(
                    "backfill budget of {} chunks reached, resuming at {:?}",
                    budget, remaining.start
                );
                outcome.resume_key = Some(remaining.start.clone());
                return Ok(outcome);
            }
        }
        let mut resume = None;
        runner.run(&mut || {
            resume = backfiller.run_chunk(&remaining, chunk_size)?;
            Ok(())
        })?;
        outcome.chunks_processed += 1;
        match resume {
            Some(key) => {
                debug!(
                    "backfill chunk {} done, next key {:?}",
                    outcome.chunks_processed, key
                );
                remaining.start = key;
            }
            None => {
                debug!(
                    "backfill span complete after {} chunks",
                    outcome.chunks_processed
                );
                return Ok(outcome);
            }
        }
    }
}
