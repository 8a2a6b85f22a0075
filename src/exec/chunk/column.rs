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
//! Typed column vectors and their bulk append/copy kernels.
//!
//! Responsibilities:
//! - Owns the native value buffer and null mask for one column of a chunk.
//! - Hosts the selection-driven gather/copy kernels used on every chunk
//!   boundary by producers and consumers.
//!
//! Key exported interfaces:
//! - Types: `Column`, `ColumnData`.
//!
//! Current limitations:
//! - Type dispatch happens once per call via `dispatch_column_pairs!`; an
//!   operand pairing outside the expansion set is a programming error and
//!   panics instead of degrading to per-element dispatch.

use super::nulls::NullMask;
use super::scalar_type::ScalarType;

/// Native storage for one column, one variant per [`ScalarType`].
///
/// Fixed-width types hold a plain `Vec` of the native representation
/// (`Boolean` packs into `u8` 0/1). `Binary` holds all value bytes
/// back-to-back with `offsets[i]` marking the exclusive end of value `i`.
#[derive(Clone, Debug)]
pub enum ColumnData {
    Boolean { values: Vec<u8> },
    Int8 { values: Vec<i8> },
    Int16 { values: Vec<i16> },
    Int32 { values: Vec<i32> },
    Int64 { values: Vec<i64> },
    Float32 { values: Vec<f32> },
    Float64 { values: Vec<f64> },
    Date32 { values: Vec<i32> },
    TimestampMicros { values: Vec<i64> },
    Decimal128 { values: Vec<i128>, precision: u8, scale: i8 },
    Binary { offsets: Vec<usize>, data: Vec<u8> },
}

/// Expands one algorithmic body per same-type operand pairing: `$fixed` once
/// for every fixed-width variant, `$binary` once for the variable-width
/// layout. The match runs once per call; the loops inside the bodies run over
/// native buffers with no per-element type checks. A pairing with no arm is a
/// missing specialization and aborts loudly.
macro_rules! dispatch_column_pairs {
    (
        $op:literal, $dst:expr, $src:expr,
        fixed: |$d:ident, $s:ident| $fixed:block,
        binary: |$doff:ident, $ddata:ident, $soff:ident, $sdata:ident| $binary:block $(,)?
    ) => {
        match ($dst, $src) {
            (ColumnData::Boolean { values: $d }, ColumnData::Boolean { values: $s }) => $fixed,
            (ColumnData::Int8 { values: $d }, ColumnData::Int8 { values: $s }) => $fixed,
            (ColumnData::Int16 { values: $d }, ColumnData::Int16 { values: $s }) => $fixed,
            (ColumnData::Int32 { values: $d }, ColumnData::Int32 { values: $s }) => $fixed,
            (ColumnData::Int64 { values: $d }, ColumnData::Int64 { values: $s }) => $fixed,
            (ColumnData::Float32 { values: $d }, ColumnData::Float32 { values: $s }) => $fixed,
            (ColumnData::Float64 { values: $d }, ColumnData::Float64 { values: $s }) => $fixed,
            (ColumnData::Date32 { values: $d }, ColumnData::Date32 { values: $s }) => $fixed,
            (ColumnData::TimestampMicros { values: $d }, ColumnData::TimestampMicros { values: $s }) => {
                $fixed
            }
            (
                ColumnData::Decimal128 { values: $d, .. },
                ColumnData::Decimal128 { values: $s, .. },
            ) => $fixed,
            (
                ColumnData::Binary { offsets: $doff, data: $ddata },
                ColumnData::Binary { offsets: $soff, data: $sdata },
            ) => $binary,
            (dst, src) => panic!(
                "{}: unhandled column type pairing {} vs {}",
                $op,
                dst.scalar_type(),
                src.scalar_type()
            ),
        }
    };
}

/// Typed push/get accessors for the fixed-width variants, generated from one
/// template per (name, variant, native type) row.
macro_rules! fixed_width_accessors {
    ($(($push:ident, $get:ident, $variant:ident, $ty:ty)),* $(,)?) => {
        $(
            pub fn $push(&mut self, value: $ty) {
                match &mut self.data {
                    ColumnData::$variant { values, .. } => {
                        values.push(value);
                        let len = values.len();
                        self.nulls.ensure_capacity(len);
                    }
                    other => panic!(
                        concat!(stringify!($push), ": unhandled column type {}"),
                        other.scalar_type()
                    ),
                }
            }

            /// `None` when the position is null.
            pub fn $get(&self, pos: usize) -> Option<$ty> {
                if self.nulls.is_null(pos) {
                    return None;
                }
                match &self.data {
                    ColumnData::$variant { values, .. } => Some(values[pos]),
                    other => panic!(
                        concat!(stringify!($get), ": unhandled column type {}"),
                        other.scalar_type()
                    ),
                }
            }
        )*
    };
}

impl ColumnData {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ColumnData::Boolean { .. } => ScalarType::Boolean,
            ColumnData::Int8 { .. } => ScalarType::Int8,
            ColumnData::Int16 { .. } => ScalarType::Int16,
            ColumnData::Int32 { .. } => ScalarType::Int32,
            ColumnData::Int64 { .. } => ScalarType::Int64,
            ColumnData::Float32 { .. } => ScalarType::Float32,
            ColumnData::Float64 { .. } => ScalarType::Float64,
            ColumnData::Date32 { .. } => ScalarType::Date32,
            ColumnData::TimestampMicros { .. } => ScalarType::TimestampMicros,
            ColumnData::Decimal128 {
                precision, scale, ..
            } => ScalarType::Decimal128 {
                precision: *precision,
                scale: *scale,
            },
            ColumnData::Binary { .. } => ScalarType::Binary,
        }
    }

    /// Number of logical values currently stored.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Boolean { values } => values.len(),
            ColumnData::Int8 { values } => values.len(),
            ColumnData::Int16 { values } => values.len(),
            ColumnData::Int32 { values } => values.len(),
            ColumnData::Int64 { values } => values.len(),
            ColumnData::Float32 { values } => values.len(),
            ColumnData::Float64 { values } => values.len(),
            ColumnData::Date32 { values } => values.len(),
            ColumnData::TimestampMicros { values } => values.len(),
            ColumnData::Decimal128 { values, .. } => values.len(),
            ColumnData::Binary { offsets, .. } => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) {
        match self {
            ColumnData::Boolean { values } => values.clear(),
            ColumnData::Int8 { values } => values.clear(),
            ColumnData::Int16 { values } => values.clear(),
            ColumnData::Int32 { values } => values.clear(),
            ColumnData::Int64 { values } => values.clear(),
            ColumnData::Float32 { values } => values.clear(),
            ColumnData::Float64 { values } => values.clear(),
            ColumnData::Date32 { values } => values.clear(),
            ColumnData::TimestampMicros { values } => values.clear(),
            ColumnData::Decimal128 { values, .. } => values.clear(),
            ColumnData::Binary { offsets, data } => {
                offsets.clear();
                data.clear();
            }
        }
    }

    /// Appends the type's zero value; the caller marks the slot null.
    fn push_default(&mut self) {
        match self {
            ColumnData::Boolean { values } => values.push(0),
            ColumnData::Int8 { values } => values.push(0),
            ColumnData::Int16 { values } => values.push(0),
            ColumnData::Int32 { values } => values.push(0),
            ColumnData::Int64 { values } => values.push(0),
            ColumnData::Float32 { values } => values.push(0.0),
            ColumnData::Float64 { values } => values.push(0.0),
            ColumnData::Date32 { values } => values.push(0),
            ColumnData::TimestampMicros { values } => values.push(0),
            ColumnData::Decimal128 { values, .. } => values.push(0),
            ColumnData::Binary { offsets, data } => offsets.push(data.len()),
        }
    }

    fn byte_size(&self) -> usize {
        fn vec_bytes<T>(values: &Vec<T>) -> usize {
            values.capacity() * std::mem::size_of::<T>()
        }
        match self {
            ColumnData::Boolean { values } => vec_bytes(values),
            ColumnData::Int8 { values } => vec_bytes(values),
            ColumnData::Int16 { values } => vec_bytes(values),
            ColumnData::Int32 { values } => vec_bytes(values),
            ColumnData::Int64 { values } => vec_bytes(values),
            ColumnData::Float32 { values } => vec_bytes(values),
            ColumnData::Float64 { values } => vec_bytes(values),
            ColumnData::Date32 { values } => vec_bytes(values),
            ColumnData::TimestampMicros { values } => vec_bytes(values),
            ColumnData::Decimal128 { values, .. } => vec_bytes(values),
            ColumnData::Binary { offsets, data } => vec_bytes(offsets) + vec_bytes(data),
        }
    }
}

/// Byte range of value `idx` in a `Binary` layout.
fn binary_bounds(offsets: &[usize], idx: usize) -> (usize, usize) {
    let lo = if idx == 0 { 0 } else { offsets[idx - 1] };
    (lo, offsets[idx])
}

fn truncate_binary(offsets: &mut Vec<usize>, data: &mut Vec<u8>, len: usize) {
    offsets.truncate(len);
    let end = offsets.last().copied().unwrap_or(0);
    data.truncate(end);
}

/// Index widths accepted by the selection-driven kernels. Both widths run
/// the same monomorphized body.
trait SelIndex: Copy {
    fn to_usize(self) -> usize;
}

impl SelIndex for u16 {
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl SelIndex for u64 {
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// A homogeneous, contiguous store of one scalar type's values plus the null
/// mask for those positions. A column exclusively owns both; all mutation
/// goes through its operations.
#[derive(Clone, Debug)]
pub struct Column {
    data: ColumnData,
    nulls: NullMask,
}

impl Column {
    pub fn new(scalar_type: ScalarType) -> Self {
        Self::with_capacity(scalar_type, 0)
    }

    pub fn with_capacity(scalar_type: ScalarType, capacity: usize) -> Self {
        let data = match scalar_type {
            ScalarType::Boolean => ColumnData::Boolean {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Int8 => ColumnData::Int8 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Int16 => ColumnData::Int16 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Int32 => ColumnData::Int32 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Int64 => ColumnData::Int64 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Float32 => ColumnData::Float32 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Float64 => ColumnData::Float64 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Date32 => ColumnData::Date32 {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::TimestampMicros => ColumnData::TimestampMicros {
                values: Vec::with_capacity(capacity),
            },
            ScalarType::Decimal128 { precision, scale } => ColumnData::Decimal128 {
                values: Vec::with_capacity(capacity),
                precision,
                scale,
            },
            ScalarType::Binary => ColumnData::Binary {
                offsets: Vec::with_capacity(capacity),
                data: Vec::new(),
            },
        };
        Self {
            data,
            nulls: NullMask::with_len(capacity),
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_nulls(&self) -> bool {
        self.nulls.has_nulls()
    }

    pub fn is_null(&self, pos: usize) -> bool {
        self.nulls.is_null(pos)
    }

    pub fn set_null(&mut self, pos: usize) {
        self.nulls.set_null(pos);
    }

    pub fn set_null_range(&mut self, start: usize, len: usize) {
        self.nulls.set_null_range(start, len);
    }

    pub fn unset_nulls(&mut self) {
        self.nulls.unset_all();
    }

    /// Clears values and nulls while keeping allocations, so a chunk can be
    /// refilled without churning the allocator.
    pub fn reset(&mut self) {
        self.data.clear();
        self.nulls.unset_all();
    }

    /// Allocated bytes backing this column, value buffer plus null words.
    pub fn byte_size(&self) -> usize {
        self.data.byte_size() + self.nulls.byte_size()
    }

    /// Extends this column's values by `from_length` elements starting at
    /// `to_length`, copying `src`'s first `from_length` values verbatim, then
    /// transfers null bits for the appended range. If `src` has no nulls the
    /// grown mask words already read back non-null, so no bit scan runs.
    pub fn append(&mut self, src: &Column, to_length: usize, from_length: usize) {
        assert!(
            self.len() >= to_length,
            "append: destination length {} < toLength {}",
            self.len(),
            to_length
        );
        assert!(
            src.len() >= from_length,
            "append: source length {} < fromLength {}",
            src.len(),
            from_length
        );
        dispatch_column_pairs!(
            "append", &mut self.data, &src.data,
            fixed: |to, from| {
                to.truncate(to_length);
                to.extend_from_slice(&from[..from_length]);
            },
            binary: |to_offsets, to_data, from_offsets, from_data| {
                truncate_binary(to_offsets, to_data, to_length);
                for idx in 0..from_length {
                    let (lo, hi) = binary_bounds(from_offsets, idx);
                    to_data.extend_from_slice(&from_data[lo..hi]);
                    to_offsets.push(to_data.len());
                }
            },
        );
        if from_length > 0 {
            self.nulls.grow(from_length);
            if src.nulls.has_nulls() {
                for pos in 0..from_length {
                    if src.nulls.is_null(pos) {
                        self.nulls.set_null(to_length + pos);
                    }
                }
            }
        }
    }

    /// Append's gather variant: the `count` source elements are taken from
    /// `src` at `sel[0..count]` rather than sequentially, null bits included.
    pub fn append_with_sel(&mut self, src: &Column, sel: &[u16], count: usize, to_length: usize) {
        assert!(
            sel.len() >= count,
            "append_with_sel: selection length {} < count {}",
            sel.len(),
            count
        );
        assert!(
            self.len() >= to_length,
            "append_with_sel: destination length {} < toLength {}",
            self.len(),
            to_length
        );
        dispatch_column_pairs!(
            "append_with_sel", &mut self.data, &src.data,
            fixed: |to, from| {
                to.truncate(to_length);
                to.reserve(count);
                for &idx in &sel[..count] {
                    to.push(from[idx as usize]);
                }
            },
            binary: |to_offsets, to_data, from_offsets, from_data| {
                truncate_binary(to_offsets, to_data, to_length);
                for &idx in &sel[..count] {
                    let (lo, hi) = binary_bounds(from_offsets, idx as usize);
                    to_data.extend_from_slice(&from_data[lo..hi]);
                    to_offsets.push(to_data.len());
                }
            },
        );
        if count > 0 {
            self.nulls.grow(count);
            if src.nulls.has_nulls() {
                for (slot, &idx) in sel[..count].iter().enumerate() {
                    if src.nulls.is_null(idx as usize) {
                        self.nulls.set_null(to_length + slot);
                    }
                }
            }
        }
    }

    /// Overwrites value positions `[0, end_idx - start_idx)` with `src`'s
    /// values from `[start_idx, end_idx)`. Value buffers only: null state is
    /// the caller's to manage around a plain range copy.
    pub fn copy(&mut self, src: &Column, start_idx: usize, end_idx: usize) {
        assert!(
            start_idx <= end_idx && src.len() >= end_idx,
            "copy: range [{start_idx}, {end_idx}) out of bounds for source length {}",
            src.len()
        );
        let n = end_idx - start_idx;
        dispatch_column_pairs!(
            "copy", &mut self.data, &src.data,
            fixed: |to, from| {
                if to.len() < n {
                    to.resize(n, Default::default());
                }
                to[..n].copy_from_slice(&from[start_idx..end_idx]);
            },
            binary: |to_offsets, to_data, from_offsets, from_data| {
                to_offsets.clear();
                to_data.clear();
                for idx in start_idx..end_idx {
                    let (lo, hi) = binary_bounds(from_offsets, idx);
                    to_data.extend_from_slice(&from_data[lo..hi]);
                    to_offsets.push(to_data.len());
                }
            },
        );
    }

    /// Gather-copy with chunk-local (16-bit) selection indices.
    pub fn copy_with_sel_u16(&mut self, src: &Column, sel: &[u16], n: usize) {
        self.copy_with_sel(src, sel, n);
    }

    /// Gather-copy with 64-bit selection indices.
    pub fn copy_with_sel_u64(&mut self, src: &Column, sel: &[u64], n: usize) {
        self.copy_with_sel(src, sel, n);
    }

    /// Clears all destination nulls, then fills slot `i` from the selected
    /// source position: null positions are marked (their value slot is left
    /// stale; nulls are never read), everything else is gathered. A source
    /// without nulls skips the bit checks entirely.
    fn copy_with_sel<I: SelIndex>(&mut self, src: &Column, sel: &[I], n: usize) {
        assert!(
            sel.len() >= n,
            "copy_with_sel: selection length {} < n {}",
            sel.len(),
            n
        );
        self.nulls.unset_all();
        let nulls = &mut self.nulls;
        dispatch_column_pairs!(
            "copy_with_sel", &mut self.data, &src.data,
            fixed: |to, from| {
                if to.len() < n {
                    to.resize(n, Default::default());
                }
                if src.nulls.has_nulls() {
                    for slot in 0..n {
                        let at = sel[slot].to_usize();
                        if src.nulls.is_null(at) {
                            nulls.set_null(slot);
                        } else {
                            to[slot] = from[at];
                        }
                    }
                } else {
                    for slot in 0..n {
                        to[slot] = from[sel[slot].to_usize()];
                    }
                }
            },
            binary: |to_offsets, to_data, from_offsets, from_data| {
                to_offsets.clear();
                to_data.clear();
                if src.nulls.has_nulls() {
                    for slot in 0..n {
                        let at = sel[slot].to_usize();
                        if src.nulls.is_null(at) {
                            nulls.set_null(slot);
                        } else {
                            let (lo, hi) = binary_bounds(from_offsets, at);
                            to_data.extend_from_slice(&from_data[lo..hi]);
                        }
                        to_offsets.push(to_data.len());
                    }
                } else {
                    for slot in 0..n {
                        let (lo, hi) = binary_bounds(from_offsets, sel[slot].to_usize());
                        to_data.extend_from_slice(&from_data[lo..hi]);
                        to_offsets.push(to_data.len());
                    }
                }
            },
        );
    }

    /// As [`Column::copy_with_sel_u64`], but `nils[i] == true` forces slot
    /// `i` null regardless of the source bit (unmatched outer-join rows and
    /// similar caller-injected nulls).
    pub fn copy_with_sel_and_nils(
        &mut self,
        src: &Column,
        sel: &[u64],
        n: usize,
        nils: &[bool],
    ) {
        assert!(
            sel.len() >= n && nils.len() >= n,
            "copy_with_sel_and_nils: selection length {} or nils length {} < n {}",
            sel.len(),
            nils.len(),
            n
        );
        self.nulls.unset_all();
        let nulls = &mut self.nulls;
        dispatch_column_pairs!(
            "copy_with_sel_and_nils", &mut self.data, &src.data,
            fixed: |to, from| {
                if to.len() < n {
                    to.resize(n, Default::default());
                }
                if src.nulls.has_nulls() {
                    for slot in 0..n {
                        if nils[slot] || src.nulls.is_null(sel[slot] as usize) {
                            nulls.set_null(slot);
                        } else {
                            to[slot] = from[sel[slot] as usize];
                        }
                    }
                } else {
                    for slot in 0..n {
                        if nils[slot] {
                            nulls.set_null(slot);
                        } else {
                            to[slot] = from[sel[slot] as usize];
                        }
                    }
                }
            },
            binary: |to_offsets, to_data, from_offsets, from_data| {
                to_offsets.clear();
                to_data.clear();
                for slot in 0..n {
                    if nils[slot] || src.nulls.is_null(sel[slot] as usize) {
                        nulls.set_null(slot);
                    } else {
                        let (lo, hi) = binary_bounds(from_offsets, sel[slot] as usize);
                        to_data.extend_from_slice(&from_data[lo..hi]);
                    }
                    to_offsets.push(to_data.len());
                }
            },
        );
    }

    /// Human-readable rendering of one value, or `"NULL"`. Diagnostics only.
    pub fn pretty_value_at(&self, pos: usize) -> String {
        if self.nulls.is_null(pos) {
            return "NULL".to_string();
        }
        match &self.data {
            ColumnData::Boolean { values } => {
                let rendered = if values[pos] != 0 { "true" } else { "false" };
                rendered.to_string()
            }
            ColumnData::Int8 { values } => values[pos].to_string(),
            ColumnData::Int16 { values } => values[pos].to_string(),
            ColumnData::Int32 { values } => values[pos].to_string(),
            ColumnData::Int64 { values } => values[pos].to_string(),
            ColumnData::Float32 { values } => values[pos].to_string(),
            ColumnData::Float64 { values } => values[pos].to_string(),
            ColumnData::Date32 { values } => pretty_date32(values[pos]),
            ColumnData::TimestampMicros { values } => pretty_timestamp_micros(values[pos]),
            ColumnData::Decimal128 { values, scale, .. } => pretty_decimal128(values[pos], *scale),
            ColumnData::Binary { offsets, data } => {
                let (lo, hi) = binary_bounds(offsets, pos);
                String::from_utf8_lossy(&data[lo..hi]).into_owned()
            }
        }
    }

    fixed_width_accessors!(
        (push_i8, get_i8, Int8, i8),
        (push_i16, get_i16, Int16, i16),
        (push_i32, get_i32, Int32, i32),
        (push_i64, get_i64, Int64, i64),
        (push_f32, get_f32, Float32, f32),
        (push_f64, get_f64, Float64, f64),
        (push_date32, get_date32, Date32, i32),
        (push_timestamp_micros, get_timestamp_micros, TimestampMicros, i64),
        (push_decimal128, get_decimal128, Decimal128, i128),
    );

    pub fn push_bool(&mut self, value: bool) {
        match &mut self.data {
            ColumnData::Boolean { values } => {
                values.push(u8::from(value));
                let len = values.len();
                self.nulls.ensure_capacity(len);
            }
            other => panic!("push_bool: unhandled column type {}", other.scalar_type()),
        }
    }

    pub fn get_bool(&self, pos: usize) -> Option<bool> {
        if self.nulls.is_null(pos) {
            return None;
        }
        match &self.data {
            ColumnData::Boolean { values } => Some(values[pos] != 0),
            other => panic!("get_bool: unhandled column type {}", other.scalar_type()),
        }
    }

    pub fn push_bytes(&mut self, value: &[u8]) {
        match &mut self.data {
            ColumnData::Binary { offsets, data } => {
                data.extend_from_slice(value);
                offsets.push(data.len());
                let len = offsets.len();
                self.nulls.ensure_capacity(len);
            }
            other => panic!("push_bytes: unhandled column type {}", other.scalar_type()),
        }
    }

    pub fn get_bytes(&self, pos: usize) -> Option<&[u8]> {
        if self.nulls.is_null(pos) {
            return None;
        }
        match &self.data {
            ColumnData::Binary { offsets, data } => {
                let (lo, hi) = binary_bounds(offsets, pos);
                Some(&data[lo..hi])
            }
            other => panic!("get_bytes: unhandled column type {}", other.scalar_type()),
        }
    }

    /// Appends a null slot: the value buffer gets the type's zero value and
    /// the new position is marked null.
    pub fn push_null(&mut self) {
        self.data.push_default();
        let len = self.data.len();
        self.nulls.set_null(len - 1);
    }
}

fn pretty_date32(days: i32) -> String {
    match chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0) {
        Some(ts) => ts.date_naive().to_string(),
        None => format!("date32({days})"),
    }
}

fn pretty_timestamp_micros(micros: i64) -> String {
    match chrono::DateTime::from_timestamp_micros(micros) {
        Some(ts) => ts.naive_utc().to_string(),
        None => format!("timestamp_micros({micros})"),
    }
}

fn pretty_decimal128(value: i128, scale: i8) -> String {
    if scale <= 0 {
        return value.to_string();
    }
    let factor = 10i128.pow(scale as u32);
    let int_part = value / factor;
    let frac = (value % factor).unsigned_abs();
    let sign = if value < 0 && int_part == 0 { "-" } else { "" };
    format!("{}{}.{:0width$}", sign, int_part, frac, width = scale as usize)
}
