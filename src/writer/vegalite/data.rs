//! Inline data conversion for the Vega-Lite writer
//!
//! Vega-Lite specs produced here carry their data inline as an array of row
//! objects. Polars values are converted cell by cell.

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::render::level_key;
use crate::{GgpickError, Result};

/// Convert one cell of a column to JSON
pub(super) fn column_value_to_json(column: &Column, idx: usize) -> Value {
    let any_value = match column.get(idx) {
        Ok(v) => v,
        Err(_) => return Value::Null,
    };

    match any_value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::Number(v.into()),
        AnyValue::Int16(v) => Value::Number(v.into()),
        AnyValue::Int32(v) => Value::Number(v.into()),
        AnyValue::Int64(v) => Value::Number(v.into()),
        AnyValue::UInt8(v) => Value::Number(v.into()),
        AnyValue::UInt16(v) => Value::Number(v.into()),
        AnyValue::UInt32(v) => Value::Number(v.into()),
        AnyValue::UInt64(v) => Value::Number(v.into()),
        // NaN and infinities have no JSON representation
        AnyValue::Float32(v) => serde_json::Number::from_f64(v as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => {
            let date = chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
                .map(|epoch| epoch + chrono::Duration::days(days as i64));
            match date {
                Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
                None => Value::Null,
            }
        }
        other => {
            tracing::debug!("Converting unsupported Polars type to string: {:?}", other);
            Value::String(format!("{}", other))
        }
    }
}

/// Rows of `column` whose value is one of `levels`, and the JSON value of each
/// level in `levels` order
pub(super) fn rows_with_levels(
    column: &Column,
    levels: &[String],
) -> Result<(Vec<usize>, Vec<Value>)> {
    let mut rows = Vec::new();
    let mut domain: Vec<Option<Value>> = vec![None; levels.len()];

    for i in 0..column.len() {
        let value = column
            .get(i)
            .map_err(|e| GgpickError::WriterError(format!("Failed to read row: {}", e)))?;
        let key = level_key(&value);
        if let Some(pos) = levels.iter().position(|level| *level == key) {
            rows.push(i);
            if domain[pos].is_none() {
                domain[pos] = Some(column_value_to_json(column, i));
            }
        }
    }

    Ok((rows, domain.into_iter().flatten().collect()))
}

/// Convert the given DataFrame rows into Vega-Lite inline `values` (one object per row)
pub(super) fn dataframe_to_values(df: &DataFrame, rows: &[usize]) -> Result<Vec<Value>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let columns = names
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<_>>>()
        .map_err(|e| GgpickError::WriterError(format!("Failed to get columns: {}", e)))?;

    let mut values = Vec::with_capacity(rows.len());
    for &i in rows {
        let mut row = Map::new();
        for (name, column) in names.iter().zip(&columns) {
            row.insert(name.clone(), column_value_to_json(column, i));
        }
        values.push(Value::Object(row));
    }
    Ok(values)
}
