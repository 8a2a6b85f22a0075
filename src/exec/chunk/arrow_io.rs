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
//! Arrow interop for chunks crossing the kernel boundary.
//!
//! Pipeline stages outside the kernel speak Arrow `RecordBatch`. Export
//! materializes the selection (only live rows leave the kernel) and turns
//! null bits into Arrow validity; import fills freshly allocated columns.
//! Column names are positional (`c0`, `c1`, ...); slot naming belongs to
//! the plan layer, not the kernel.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BinaryArray, BinaryBuilder, BooleanArray, BooleanBuilder, Date32Array,
    Date32Builder, Decimal128Array, Decimal128Builder, Float32Array, Float32Builder, Float64Array,
    Float64Builder, Int16Array, Int16Builder, Int32Array, Int32Builder, Int64Array, Int64Builder,
    Int8Array, Int8Builder, RecordBatch, RecordBatchOptions, TimestampMicrosecondArray,
    TimestampMicrosecondBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

use super::{Chunk, Column, ColumnData, ScalarType, MAX_CHUNK_SIZE};

pub(crate) fn scalar_type_to_arrow(scalar_type: ScalarType) -> DataType {
    match scalar_type {
        ScalarType::Boolean => DataType::Boolean,
        ScalarType::Int8 => DataType::Int8,
        ScalarType::Int16 => DataType::Int16,
        ScalarType::Int32 => DataType::Int32,
        ScalarType::Int64 => DataType::Int64,
        ScalarType::Float32 => DataType::Float32,
        ScalarType::Float64 => DataType::Float64,
        ScalarType::Date32 => DataType::Date32,
        ScalarType::TimestampMicros => DataType::Timestamp(TimeUnit::Microsecond, None),
        ScalarType::Decimal128 { precision, scale } => DataType::Decimal128(precision, scale),
        ScalarType::Binary => DataType::Binary,
    }
}

pub(crate) fn scalar_type_from_arrow(data_type: &DataType) -> Result<ScalarType, String> {
    match data_type {
        DataType::Boolean => Ok(ScalarType::Boolean),
        DataType::Int8 => Ok(ScalarType::Int8),
        DataType::Int16 => Ok(ScalarType::Int16),
        DataType::Int32 => Ok(ScalarType::Int32),
        DataType::Int64 => Ok(ScalarType::Int64),
        DataType::Float32 => Ok(ScalarType::Float32),
        DataType::Float64 => Ok(ScalarType::Float64),
        DataType::Date32 => Ok(ScalarType::Date32),
        DataType::Timestamp(TimeUnit::Microsecond, None) => Ok(ScalarType::TimestampMicros),
        DataType::Decimal128(precision, scale) => Ok(ScalarType::Decimal128 {
            precision: *precision,
            scale: *scale,
        }),
        DataType::Binary => Ok(ScalarType::Binary),
        other => Err(format!("unsupported arrow type for chunk import: {other}")),
    }
}

macro_rules! build_primitive {
    ($builder:ty, $values:expr, $column:expr, $rows:expr) => {{
        let mut builder = <$builder>::with_capacity($rows.len());
        for &row in $rows {
            if $column.is_null(row) {
                builder.append_null();
            } else {
                builder.append_value($values[row]);
            }
        }
        Arc::new(builder.finish()) as ArrayRef
    }};
}

macro_rules! read_primitive {
    ($array_type:ty, $push:ident, $array:expr, $column:expr, $context:literal) => {{
        let array = $array
            .as_any()
            .downcast_ref::<$array_type>()
            .ok_or_else(|| format!("{}: unexpected array representation", $context))?;
        for row in 0..array.len() {
            if array.is_null(row) {
                $column.push_null();
            } else {
                $column.$push(array.value(row));
            }
        }
    }};
}

fn column_to_array(column: &Column, rows: &[usize]) -> Result<ArrayRef, String> {
    let array = match column.data() {
        ColumnData::Boolean { values } => {
            let mut builder = BooleanBuilder::with_capacity(rows.len());
            for &row in rows {
                if column.is_null(row) {
                    builder.append_null();
                } else {
                    builder.append_value(values[row] != 0);
                }
            }
            Arc::new(builder.finish()) as ArrayRef
        }
        ColumnData::Int8 { values } => build_primitive!(Int8Builder, values, column, rows),
        ColumnData::Int16 { values } => build_primitive!(Int16Builder, values, column, rows),
        ColumnData::Int32 { values } => build_primitive!(Int32Builder, values, column, rows),
        ColumnData::Int64 { values } => build_primitive!(Int64Builder, values, column, rows),
        ColumnData::Float32 { values } => build_primitive!(Float32Builder, values, column, rows),
        ColumnData::Float64 { values } => build_primitive!(Float64Builder, values, column, rows),
        ColumnData::Date32 { values } => build_primitive!(Date32Builder, values, column, rows),
        ColumnData::TimestampMicros { values } => {
            build_primitive!(TimestampMicrosecondBuilder, values, column, rows)
        }
        ColumnData::Decimal128 {
            values,
            precision,
            scale,
        } => {
            let mut builder = Decimal128Builder::with_capacity(rows.len())
                .with_precision_and_scale(*precision, *scale)
                .map_err(|e| format!("decimal export failed: {e}"))?;
            for &row in rows {
                if column.is_null(row) {
                    builder.append_null();
                } else {
                    builder.append_value(values[row]);
                }
            }
            Arc::new(builder.finish()) as ArrayRef
        }
        ColumnData::Binary { .. } => {
            let mut builder = BinaryBuilder::new();
            for &row in rows {
                match column.get_bytes(row) {
                    Some(value) => builder.append_value(value),
                    None => builder.append_null(),
                }
            }
            Arc::new(builder.finish()) as ArrayRef
        }
    };
    Ok(array)
}

fn fill_column_from_array(column: &mut Column, array: &ArrayRef) -> Result<(), String> {
    match column.scalar_type() {
        ScalarType::Boolean => {
            read_primitive!(BooleanArray, push_bool, array, column, "boolean import")
        }
        ScalarType::Int8 => read_primitive!(Int8Array, push_i8, array, column, "int8 import"),
        ScalarType::Int16 => read_primitive!(Int16Array, push_i16, array, column, "int16 import"),
        ScalarType::Int32 => read_primitive!(Int32Array, push_i32, array, column, "int32 import"),
        ScalarType::Int64 => read_primitive!(Int64Array, push_i64, array, column, "int64 import"),
        ScalarType::Float32 => {
            read_primitive!(Float32Array, push_f32, array, column, "float32 import")
        }
        ScalarType::Float64 => {
            read_primitive!(Float64Array, push_f64, array, column, "float64 import")
        }
        ScalarType::Date32 => {
            read_primitive!(Date32Array, push_date32, array, column, "date32 import")
        }
        ScalarType::TimestampMicros => read_primitive!(
            TimestampMicrosecondArray,
            push_timestamp_micros,
            array,
            column,
            "timestamp import"
        ),
        ScalarType::Decimal128 { .. } => read_primitive!(
            Decimal128Array,
            push_decimal128,
            array,
            column,
            "decimal import"
        ),
        ScalarType::Binary => {
            read_primitive!(BinaryArray, push_bytes, array, column, "binary import")
        }
    }
    Ok(())
}

impl Chunk {
    /// Exports the live rows as an Arrow `RecordBatch`. The selection is
    /// materialized during export, so downstream consumers see a dense batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch, String> {
        let rows: Vec<usize> = self.selected_indices().collect();
        let mut fields = Vec::with_capacity(self.column_count());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.column_count());
        for (index, column) in self.columns().iter().enumerate() {
            fields.push(Field::new(
                format!("c{index}"),
                scalar_type_to_arrow(column.scalar_type()),
                true,
            ));
            arrays.push(column_to_array(column, &rows)?);
        }
        let schema = Arc::new(Schema::new(fields));
        let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
        RecordBatch::try_new_with_options(schema, arrays, &options)
            .map_err(|e| format!("chunk export failed: {e}"))
    }

    /// Imports an Arrow `RecordBatch` into a fresh chunk, one column per
    /// field. Batches wider than `MAX_CHUNK_SIZE` rows are rejected: they
    /// cannot flow through the kernel as a single chunk.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Self, String> {
        let rows = batch.num_rows();
        if rows > MAX_CHUNK_SIZE {
            return Err(format!(
                "record batch has {rows} rows, above the maximum chunk size {MAX_CHUNK_SIZE}"
            ));
        }
        let mut column_types = Vec::with_capacity(batch.num_columns());
        for field in batch.schema().fields() {
            column_types.push(scalar_type_from_arrow(field.data_type())?);
        }
        let mut chunk = Chunk::with_capacity(&column_types, rows);
        for (index, array) in batch.columns().iter().enumerate() {
            let column = chunk
                .column_mut(index)
                .ok_or_else(|| format!("missing chunk column {index}"))?;
            fill_column_from_array(column, array)?;
        }
        chunk.set_count(rows);
        Ok(chunk)
    }
}
