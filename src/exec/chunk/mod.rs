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
//! Chunk: the unit of data flowing through the vectorized execution
//! pipeline.
//!
//! Responsibilities:
//! - Holds one typed column vector per output slot, all sharing one logical
//!   row count, with an optional selection vector narrowing the live rows.
//! - Bounds every chunk to `MAX_CHUNK_SIZE` rows so per-operation memory and
//!   cache footprint stay fixed, and supports in-place reuse across chunks
//!   of work instead of reallocation.
//!
//! Key exported interfaces:
//! - Types: `Chunk`, `Column`, `ColumnData`, `NullMask`, `ScalarType`,
//!   `Selection`.
//!
//! Current limitations:
//! - A chunk is single-owner state: one worker mutates it at a time and
//!   ownership transfers (never shares) between pipeline stages.

mod arrow_io;
mod column;
mod nulls;
mod scalar_type;
mod selection;

pub use column::{Column, ColumnData};
pub use nulls::NullMask;
pub use scalar_type::ScalarType;
pub use selection::Selection;

use crate::common::config;

/// Maximum number of rows a chunk may hold.
pub const MAX_CHUNK_SIZE: usize = 4096;

/// A bounded-size collection of equal-length column vectors.
#[derive(Clone, Debug)]
pub struct Chunk {
    columns: Vec<Column>,
    selection: Option<Selection>,
    /// Caller-injected forced-null flags, consumed only by the
    /// copy-with-overrides path.
    nil_overrides: Option<Vec<bool>>,
    count: usize,
    capacity: usize,
}

impl Chunk {
    /// A chunk with one column per scalar type, sized to the configured
    /// default capacity.
    pub fn new(column_types: &[ScalarType]) -> Self {
        Self::with_capacity(column_types, config::default_chunk_capacity())
    }

    pub fn with_capacity(column_types: &[ScalarType], capacity: usize) -> Self {
        assert!(
            capacity <= MAX_CHUNK_SIZE,
            "chunk capacity {capacity} exceeds maximum {MAX_CHUNK_SIZE}"
        );
        let columns = column_types
            .iter()
            .map(|t| Column::with_capacity(*t, capacity))
            .collect();
        Self {
            columns,
            selection: None,
            nil_overrides: None,
            count: 0,
            capacity,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of live rows: the selection length when one is attached,
    /// the logical count otherwise.
    pub fn row_count(&self) -> usize {
        self.selection.as_ref().map_or(self.count, Selection::len)
    }

    /// Logical row count, ignoring any selection.
    pub fn total_row_count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        assert!(
            count <= self.capacity,
            "chunk count {count} exceeds capacity {}",
            self.capacity
        );
        self.count = count;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Detaches the selection, restoring all of `[0, count)` as live.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn set_nil_overrides(&mut self, nils: Vec<bool>) {
        self.nil_overrides = Some(nils);
    }

    pub fn nil_overrides(&self) -> Option<&[bool]> {
        self.nil_overrides.as_deref()
    }

    pub fn take_nil_overrides(&mut self) -> Option<Vec<bool>> {
        self.nil_overrides.take()
    }

    /// Iterates live row positions in selection order.
    pub fn selected_indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match &self.selection {
            Some(selection) => selection.iter(),
            None => Box::new(0..self.count),
        }
    }

    /// Clears the chunk for the next unit of work, keeping every allocation.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.reset();
        }
        self.selection = None;
        self.nil_overrides = None;
        self.count = 0;
    }

    /// Allocated bytes across all columns and the override buffer.
    pub fn byte_size(&self) -> usize {
        let columns: usize = self.columns.iter().map(Column::byte_size).sum();
        let overrides = self
            .nil_overrides
            .as_ref()
            .map_or(0, |nils| nils.capacity());
        columns + overrides
    }

    /// One row rendered for diagnostics, e.g. `[4, 1, NULL]`.
    pub fn pretty_row(&self, row: usize) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.pretty_value_at(row))
            .collect();
        format!("[{}]", cells.join(", "))
    }

    /// Live rows rendered for diagnostics, bounded by the configured row
    /// limit. Never on a hot path.
    pub fn pretty_print(&self) -> String {
        let limit = config::pretty_chunk_rows();
        let mut out = String::new();
        for row in self.selected_indices().take(limit) {
            out.push_str(&self.pretty_row(row));
            out.push('\n');
        }
        let total = self.row_count();
        if total > limit {
            out.push_str(&format!("... ({total} rows total)\n"));
        }
        out
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            selection: None,
            nil_overrides: None,
            count: 0,
            capacity: 0,
        }
    }
}
