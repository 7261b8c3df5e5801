use std::sync::Arc;

use crate::catalog::{Column, ColumnType, Date, Schema, Value};
use crate::query::executor::row::Row;

use super::encoding::field_widths;
use super::error::{CodecError, CodecResult};
use super::varint::{read_uvarint, read_varint};

/// Decode a row laid out by `schema`.
///
/// Bytes past the schema's total width are ignored.
pub fn decode_row(buf: &[u8], schema: Arc<Schema>) -> CodecResult<Row> {
    let widths = field_widths(&schema)?;
    let expected: usize = widths.iter().sum();
    if buf.len() < expected {
        return Err(CodecError::TruncatedBuffer {
            expected,
            actual: buf.len(),
        });
    }

    let mut values = Vec::with_capacity(widths.len());
    let mut offset = 0;
    for (column, width) in schema.columns().iter().zip(widths) {
        values.push(decode_field(column, &buf[offset..offset + width])?);
        offset += width;
    }
    Ok(Row::new(schema, values))
}

fn decode_field(column: &Column, field: &[u8]) -> CodecResult<Value> {
    let malformed = || CodecError::MalformedVarint(column.name().to_string());
    let signed = || read_varint(field).map(|(v, _)| v).ok_or_else(malformed);
    let unsigned = || read_uvarint(field).map(|(v, _)| v).ok_or_else(malformed);

    let value = match column.column_type() {
        ColumnType::Int32 => Value::Int32(i32::try_from(signed()?).map_err(|_| malformed())?),
        ColumnType::Int64 => Value::Int64(signed()?),
        ColumnType::UInt32 => Value::UInt32(u32::try_from(unsigned()?).map_err(|_| malformed())?),
        ColumnType::UInt64 => Value::UInt64(unsigned()?),
        ColumnType::Date => Value::Date(Date::from_timestamp(signed()?)),
        ColumnType::FixedString => {
            let s = std::str::from_utf8(field)
                .map_err(|_| CodecError::InvalidUtf8(column.name().to_string()))?;
            Value::FixedString(s.to_string())
        }
    };
    Ok(value)
}
