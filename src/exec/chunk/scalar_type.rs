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
//! The closed registry of scalar types a chunk column can hold.

use std::fmt;

/// Identifier for one of the fixed set of native value kinds.
///
/// `ScalarType` is dispatch metadata only; storage lives in
/// [`ColumnData`](super::ColumnData), one variant per type. Adding a type
/// means adding a variant here, a matching `ColumnData` variant, and arms in
/// the column dispatcher; the exhaustive matches plus the type sweep in the
/// integration tests keep the three in sync.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Days since the Unix epoch.
    Date32,
    /// Microseconds since the Unix epoch, no time zone.
    TimestampMicros,
    Decimal128 {
        precision: u8,
        scale: i8,
    },
    /// Variable-length byte string.
    Binary,
}

impl ScalarType {
    /// One representative instance of every registered type. Tests iterate
    /// this to force coverage of each specialization; a new variant that is
    /// missing here fails the count check below.
    pub const ALL: [ScalarType; 11] = [
        ScalarType::Boolean,
        ScalarType::Int8,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Date32,
        ScalarType::TimestampMicros,
        ScalarType::Decimal128 {
            precision: 38,
            scale: 9,
        },
        ScalarType::Binary,
    ];

    /// Native element size in bytes, or `None` for variable-width types.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            ScalarType::Boolean | ScalarType::Int8 => Some(1),
            ScalarType::Int16 => Some(2),
            ScalarType::Int32 | ScalarType::Float32 | ScalarType::Date32 => Some(4),
            ScalarType::Int64 | ScalarType::Float64 | ScalarType::TimestampMicros => Some(8),
            ScalarType::Decimal128 { .. } => Some(16),
            ScalarType::Binary => None,
        }
    }

    pub const fn is_fixed_width(self) -> bool {
        self.fixed_width().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
            ScalarType::Date32 => "date32",
            ScalarType::TimestampMicros => "timestamp_micros",
            ScalarType::Decimal128 { .. } => "decimal128",
            ScalarType::Binary => "binary",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Decimal128 { precision, scale } => {
                write!(f, "decimal128({precision},{scale})")
            }
            other => write!(f, "{}", other.name()),
        }
    }
}
