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
//! Integration tests for the columnar chunk kernel.

use gneiss::exec::chunk::{Chunk, Column, ScalarType, Selection, MAX_CHUNK_SIZE};

use crate::common::TestConfig;

mod common;

fn assert_type_accessible<T: 'static>() {
    let type_name = std::any::type_name::<T>();
    assert!(
        !type_name.is_empty(),
        "type name for {} should not be empty",
        std::any::type_name::<T>()
    );
}

/// Pushes one deterministic sample value of the column's type, derived from
/// `seed` so different seeds render differently.
fn push_sample(column: &mut Column, seed: i64) {
    match column.scalar_type() {
        ScalarType::Boolean => column.push_bool(seed % 2 == 0),
        ScalarType::Int8 => column.push_i8(seed as i8),
        ScalarType::Int16 => column.push_i16(seed as i16),
        ScalarType::Int32 => column.push_i32(seed as i32),
        ScalarType::Int64 => column.push_i64(seed),
        ScalarType::Float32 => column.push_f32(seed as f32 + 0.25),
        ScalarType::Float64 => column.push_f64(seed as f64 + 0.5),
        ScalarType::Date32 => column.push_date32(seed as i32),
        ScalarType::TimestampMicros => column.push_timestamp_micros(seed * 1_000_000),
        ScalarType::Decimal128 { .. } => column.push_decimal128(i128::from(seed) * 1_000),
        ScalarType::Binary => column.push_bytes(format!("v{seed}").as_bytes()),
    }
}

fn sample_column(scalar_type: ScalarType, len: usize, null_at: Option<usize>) -> Column {
    let mut column = Column::new(scalar_type);
    for seed in 0..len {
        if null_at == Some(seed) {
            column.push_null();
        } else {
            push_sample(&mut column, seed as i64 + 1);
        }
    }
    column
}

fn int64_column(values: &[Option<i64>]) -> Column {
    let mut column = Column::new(ScalarType::Int64);
    for value in values {
        match value {
            Some(v) => column.push_i64(*v),
            None => column.push_null(),
        }
    }
    column
}

#[test]
fn test_exec_module_structure() {
    assert_type_accessible::<gneiss::exec::chunk::Chunk>();
    assert_type_accessible::<gneiss::exec::chunk::Column>();
    assert_type_accessible::<gneiss::exec::chunk::NullMask>();
    assert_type_accessible::<gneiss::exec::chunk::Selection>();
}

#[test]
fn test_exec_config_loading() {
    let test_config = TestConfig::new().expect("Failed to create test config");
    let config = test_config.load_config().expect("Failed to load config");

    assert_eq!(config.exec.default_chunk_capacity, 1024);
    assert!(config.exec.default_chunk_capacity <= MAX_CHUNK_SIZE);
    assert_eq!(config.debug.pretty_chunk_rows, 8);
}

#[test]
fn append_matches_source_for_every_type() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 4, Some(2));
        let mut dst = Column::new(scalar_type);
        dst.append(&src, 0, 4);
        for pos in 0..4 {
            assert_eq!(
                dst.pretty_value_at(pos),
                src.pretty_value_at(pos),
                "type {scalar_type} pos {pos}"
            );
            assert_eq!(
                dst.is_null(pos),
                src.is_null(pos),
                "type {scalar_type} pos {pos}"
            );
        }
    }
}

#[test]
fn append_into_populated_destination() {
    let src = int64_column(&[Some(10), None, Some(30)]);
    let mut dst = int64_column(&[Some(1), Some(2)]);
    dst.append(&src, 2, 3);

    assert_eq!(dst.len(), 5);
    assert_eq!(dst.get_i64(0), Some(1));
    assert_eq!(dst.get_i64(1), Some(2));
    assert_eq!(dst.get_i64(2), Some(10));
    assert_eq!(dst.get_i64(3), None);
    assert_eq!(dst.get_i64(4), Some(30));
}

#[test]
fn append_without_source_nulls_yields_non_null_range() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 8, None);
        assert!(!src.has_nulls());
        let mut dst = sample_column(scalar_type, 2, Some(0));
        dst.append(&src, 2, 8);
        for pos in 2..10 {
            assert!(!dst.is_null(pos), "type {scalar_type} pos {pos}");
        }
        // The pre-existing null in the untouched prefix survives.
        assert!(dst.is_null(0));
    }
}

#[test]
fn append_zero_length_is_noop() {
    let src = int64_column(&[Some(9)]);
    let mut dst = int64_column(&[Some(1), None]);
    let before: Vec<String> = (0..2).map(|p| dst.pretty_value_at(p)).collect();

    dst.append(&src, 2, 0);

    assert_eq!(dst.len(), 2);
    let after: Vec<String> = (0..2).map(|p| dst.pretty_value_at(p)).collect();
    assert_eq!(before, after);
    assert!(!dst.is_null(0));
    assert!(dst.is_null(1));
}

#[test]
fn append_with_sel_gathers_values_and_nulls() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 4, Some(2));
        let sel: [u16; 3] = [3, 0, 2];
        let mut dst = Column::new(scalar_type);
        dst.append_with_sel(&src, &sel, 3, 0);
        for (slot, &idx) in sel.iter().enumerate() {
            assert_eq!(
                dst.is_null(slot),
                src.is_null(idx as usize),
                "type {scalar_type} slot {slot}"
            );
            if !dst.is_null(slot) {
                assert_eq!(
                    dst.pretty_value_at(slot),
                    src.pretty_value_at(idx as usize),
                    "type {scalar_type} slot {slot}"
                );
            }
        }
    }
}

#[test]
fn reference_gather_scenario() {
    // A vector of 4 integers [1, 2, NULL, 4] gathered with selection
    // [3, 0, 2] into an empty destination.
    let src = int64_column(&[Some(1), Some(2), None, Some(4)]);

    let mut dst = Column::new(ScalarType::Int64);
    dst.copy_with_sel_u16(&src, &[3, 0, 2], 3);
    assert_eq!(dst.get_i64(0), Some(4));
    assert_eq!(dst.get_i64(1), Some(1));
    assert!(dst.is_null(2));

    let mut dst64 = Column::new(ScalarType::Int64);
    dst64.copy_with_sel_u64(&src, &[3, 0, 2], 3);
    assert_eq!(dst64.get_i64(0), Some(4));
    assert_eq!(dst64.get_i64(1), Some(1));
    assert!(dst64.is_null(2));
}

#[test]
fn copy_with_sel_without_source_nulls_takes_fast_path() {
    let src = int64_column(&[Some(5), Some(6), Some(7)]);
    let mut dst = int64_column(&[None, None, None]);
    dst.copy_with_sel_u16(&src, &[2, 2, 0], 3);
    assert!(!dst.has_nulls());
    assert_eq!(dst.get_i64(0), Some(7));
    assert_eq!(dst.get_i64(1), Some(7));
    assert_eq!(dst.get_i64(2), Some(5));
}

#[test]
fn overrides_force_null_regardless_of_source() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 4, Some(1));
        let sel: [u64; 4] = [0, 1, 2, 3];
        let nils = [true, false, true, false];
        let mut dst = Column::new(scalar_type);
        dst.copy_with_sel_and_nils(&src, &sel, 4, &nils);

        assert!(dst.is_null(0), "override wins over non-null source");
        assert!(dst.is_null(1), "source null passes through");
        assert!(dst.is_null(2), "override wins");
        assert!(!dst.is_null(3), "type {scalar_type}");
        assert_eq!(dst.pretty_value_at(3), src.pretty_value_at(3));
    }
}

#[test]
fn unset_nulls_is_idempotent() {
    let mut column = int64_column(&[None, Some(2), None]);
    assert!(column.has_nulls());

    column.unset_nulls();
    let first: Vec<bool> = (0..3).map(|p| column.is_null(p)).collect();
    column.unset_nulls();
    let second: Vec<bool> = (0..3).map(|p| column.is_null(p)).collect();

    assert_eq!(first, second);
    assert!(!column.has_nulls());
}

#[test]
fn copy_round_trip_is_exact() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 6, None);
        let mut dst = Column::new(scalar_type);
        dst.copy(&src, 1, 5);
        let first: Vec<String> = (0..4).map(|p| dst.pretty_value_at(p)).collect();
        dst.copy(&src, 1, 5);
        let second: Vec<String> = (0..4).map(|p| dst.pretty_value_at(p)).collect();
        assert_eq!(first, second, "type {scalar_type}");
        for (slot, idx) in (1..5).enumerate() {
            assert_eq!(first[slot], src.pretty_value_at(idx), "type {scalar_type}");
        }
    }
}

#[test]
fn every_operation_runs_for_every_type() {
    for scalar_type in ScalarType::ALL {
        let src = sample_column(scalar_type, 4, Some(2));
        let sel16: [u16; 2] = [3, 1];
        let sel64: [u64; 2] = [3, 1];
        let nils = [false, true];

        let mut dst = Column::new(scalar_type);
        dst.append(&src, 0, 4);
        dst.append_with_sel(&src, &sel16, 2, 4);
        assert_eq!(dst.len(), 6);

        dst.copy(&src, 0, 4);
        dst.copy_with_sel_u16(&src, &sel16, 2);
        dst.copy_with_sel_u64(&src, &sel64, 2);
        dst.copy_with_sel_and_nils(&src, &sel64, 2, &nils);
        assert!(dst.is_null(1));

        for pos in 0..4 {
            let rendered = src.pretty_value_at(pos);
            assert!(!rendered.is_empty(), "type {scalar_type} pos {pos}");
        }
    }
}

#[test]
fn chunk_selection_attach_detach() {
    let mut chunk = Chunk::with_capacity(&[ScalarType::Int64], 16);
    let column = chunk.column_mut(0).unwrap();
    for v in 0..8 {
        column.push_i64(v * 10);
    }
    chunk.set_count(8);

    chunk.set_selection(Selection::from_predicate(8, |row| row >= 6));
    assert_eq!(chunk.row_count(), 2);
    let live: Vec<usize> = chunk.selected_indices().collect();
    assert_eq!(live, vec![6, 7]);

    chunk.clear_selection();
    assert_eq!(chunk.row_count(), 8);
}

#[test]
fn chunk_reuse_holds_capacity_invariant_across_cycles() {
    let capacity = 1024;
    let mut chunk = Chunk::with_capacity(&[ScalarType::Int64, ScalarType::Binary], capacity);
    let mut steady_state_bytes = None;

    for cycle in 0..1000 {
        chunk.reset();
        for row in 0..capacity {
            let ints = chunk.column_mut(0).unwrap();
            if row % 13 == 0 {
                ints.push_null();
            } else {
                ints.push_i64((cycle * capacity + row) as i64 % 977);
            }
            let bytes = chunk.column_mut(1).unwrap();
            bytes.push_bytes(format!("row{}", row % 7).as_bytes());
        }
        chunk.set_count(capacity);

        assert_eq!(chunk.total_row_count(), capacity);
        assert!(chunk.is_full());
        assert!(chunk.total_row_count() <= MAX_CHUNK_SIZE);
        for column in chunk.columns() {
            assert_eq!(column.len(), capacity);
        }
        assert!(chunk.column(0).unwrap().is_null(0));
        assert!(!chunk.column(1).unwrap().has_nulls());

        // After the first cycle the buffers are warm: reuse must not grow
        // the footprint.
        match steady_state_bytes {
            None => {
                if cycle >= 1 {
                    steady_state_bytes = Some(chunk.byte_size());
                }
            }
            Some(bytes) => assert_eq!(chunk.byte_size(), bytes, "cycle {cycle}"),
        }
    }
}

#[test]
fn chunk_export_import_round_trip() {
    let mut chunk = Chunk::with_capacity(
        &[
            ScalarType::Int32,
            ScalarType::Boolean,
            ScalarType::Binary,
            ScalarType::Decimal128 {
                precision: 12,
                scale: 3,
            },
        ],
        8,
    );
    {
        let ints = chunk.column_mut(0).unwrap();
        ints.push_i32(1);
        ints.push_null();
        ints.push_i32(3);
    }
    {
        let bools = chunk.column_mut(1).unwrap();
        bools.push_bool(true);
        bools.push_bool(false);
        bools.push_null();
    }
    {
        let bytes = chunk.column_mut(2).unwrap();
        bytes.push_bytes(b"north");
        bytes.push_bytes(b"");
        bytes.push_null();
    }
    {
        let decimals = chunk.column_mut(3).unwrap();
        decimals.push_decimal128(1_500);
        decimals.push_decimal128(-25);
        decimals.push_null();
    }
    chunk.set_count(3);

    let batch = chunk.to_record_batch().expect("export");
    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.num_columns(), 4);

    let imported = Chunk::from_record_batch(&batch).expect("import");
    assert_eq!(imported.total_row_count(), 3);
    for (index, column) in chunk.columns().iter().enumerate() {
        let round_tripped = imported.column(index).unwrap();
        for pos in 0..3 {
            assert_eq!(
                round_tripped.pretty_value_at(pos),
                column.pretty_value_at(pos),
                "column {index} pos {pos}"
            );
        }
    }
}

#[test]
fn pretty_print_respects_row_limit_shape() {
    let mut chunk = Chunk::with_capacity(&[ScalarType::Int64], 32);
    let column = chunk.column_mut(0).unwrap();
    for v in 0..4 {
        column.push_i64(v);
    }
    chunk.set_count(4);
    let rendered = chunk.pretty_print();
    assert!(rendered.contains("[0]"), "rendered={rendered}");
    assert!(rendered.contains("[3]"), "rendered={rendered}");
}
