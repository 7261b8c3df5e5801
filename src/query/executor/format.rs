// Result Formatting
//
// Renders row sets for display: a box-drawn table for terminals and a JSON
// array of objects for machine consumers.

use serde_json::{Map, Number, Value as JsonValue};

use crate::catalog::Value;
use crate::query::executor::row::Row;

/// Render rows as a box-drawn table with a trailing row count
pub fn prettify(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return "(0 rows)\n".to_string();
    };

    let headers: Vec<String> = first.column_names().map(str::to_string).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.values().iter().map(Value::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&headers, &widths));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &cells {
        out.push_str(&line(row, &widths));
    }
    out.push_str(&border(&widths, '└', '┴', '┘'));

    let noun = if rows.len() == 1 { "row" } else { "rows" };
    out.push_str(&format!("({} {})\n", rows.len(), noun));
    out
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&middle.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    format!("│{}│\n", padded.join("│"))
}

/// Convert one value to JSON: integers as numbers, strings and dates as strings
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Int32(v) => JsonValue::Number(Number::from(*v)),
        Value::Int64(v) => JsonValue::Number(Number::from(*v)),
        Value::UInt32(v) => JsonValue::Number(Number::from(*v)),
        Value::UInt64(v) => JsonValue::Number(Number::from(*v)),
        Value::FixedString(s) => JsonValue::String(s.clone()),
        Value::Date(d) => JsonValue::String(d.to_string()),
    }
}

/// Render rows as a JSON array of column-to-value objects
pub fn to_json(rows: &[Row]) -> JsonValue {
    let objects = rows
        .iter()
        .map(|row| {
            let object: Map<String, JsonValue> = row
                .column_names()
                .zip(row.values())
                .map(|(name, value)| (name.to_string(), value_to_json(value)))
                .collect();
            JsonValue::Object(object)
        })
        .collect();
    JsonValue::Array(objects)
}
