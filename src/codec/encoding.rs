use crate::catalog::{Column, ColumnType, Schema, Value};
use crate::query::executor::row::Row;

use super::error::{CodecError, CodecResult};
use super::varint::{put_uvarint, put_varint};

/// Encode a row with the layout of its own schema
pub fn encode_row(row: &Row) -> CodecResult<Vec<u8>> {
    encode_values(row.schema(), row.values())
}

/// Encode `values` with the layout of `schema`.
///
/// Fields are written back to back in column order, each occupying exactly
/// the column's width. Integer fields are varints padded with zeros.
pub fn encode_values(schema: &Schema, values: &[Value]) -> CodecResult<Vec<u8>> {
    if values.len() != schema.column_count() {
        return Err(CodecError::LengthMismatch {
            context: format!("row of {}", schema.table_name()),
            expected: schema.column_count(),
            actual: values.len(),
        });
    }

    let widths = field_widths(schema)?;
    let mut buf = vec![0u8; widths.iter().sum()];
    let mut offset = 0;
    for ((column, value), width) in schema.columns().iter().zip(values).zip(widths) {
        encode_field(column, value, &mut buf[offset..offset + width])?;
        offset += width;
    }
    Ok(buf)
}

/// Width of every column, failing on a FixedString without a length
pub(crate) fn field_widths(schema: &Schema) -> CodecResult<Vec<usize>> {
    schema
        .columns()
        .iter()
        .map(|column| {
            column
                .width()
                .ok_or_else(|| CodecError::MissingFixedLength(column.name().to_string()))
        })
        .collect()
}

fn encode_field(column: &Column, value: &Value, field: &mut [u8]) -> CodecResult<()> {
    let width = field.len();
    let overflow = || CodecError::FieldOverflow {
        column: column.name().to_string(),
        width,
    };

    let written = match (column.column_type(), value) {
        (ColumnType::Int32, Value::Int32(v)) => put_varint(field, i64::from(*v)),
        (ColumnType::Int64, Value::Int64(v)) => put_varint(field, *v),
        (ColumnType::UInt32, Value::UInt32(v)) => put_uvarint(field, u64::from(*v)),
        (ColumnType::UInt64, Value::UInt64(v)) => put_uvarint(field, *v),
        (ColumnType::Date, Value::Date(d)) => put_varint(field, d.timestamp()),
        (ColumnType::FixedString, Value::FixedString(s)) => {
            if s.len() != width {
                return Err(CodecError::LengthMismatch {
                    context: format!("column {}", column.name()),
                    expected: width,
                    actual: s.len(),
                });
            }
            field.copy_from_slice(s.as_bytes());
            Some(s.len())
        }
        (expected, value) => {
            return Err(CodecError::TypeMismatch {
                column: column.name().to_string(),
                expected,
                actual: value.column_type(),
            });
        }
    };

    written.map(|_| ()).ok_or_else(overflow)
}
