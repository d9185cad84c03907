//! Encoding channel construction for Vega-Lite writer
//!
//! Each binding of the plot becomes one encoding channel. Bindings carry their
//! own field type; the DataFrame is only consulted to keep continuous channels
//! from being fed text.

use polars::prelude::*;
use serde_json::{json, Value};

use crate::plot::{Aesthetic, Binding, FieldType};
use crate::render::is_numeric_dtype;
use crate::{GgpickError, Result};

/// Vega-Lite channel name for an aesthetic
pub(super) fn map_aesthetic_name(aesthetic: Aesthetic) -> &'static str {
    aesthetic.name()
}

/// Infer Vega-Lite field type from DataFrame column
pub(super) fn infer_field_type(df: &DataFrame, field: &str) -> &'static str {
    match df.column(field) {
        Ok(column) if is_numeric_dtype(column.dtype()) => "quantitative",
        Ok(column) if matches!(column.dtype(), DataType::Date) => "temporal",
        _ => "nominal",
    }
}

/// Build the encoding channel for one binding
pub(super) fn build_encoding_channel(binding: &Binding, df: &DataFrame) -> Result<Value> {
    let field = binding.column.name();
    let inferred = infer_field_type(df, field);

    if binding.field_type == FieldType::Quantitative && inferred != "quantitative" {
        return Err(GgpickError::WriterError(format!(
            "Column '{}' is {} and cannot be encoded as quantitative {}",
            field, inferred, binding.aesthetic
        )));
    }

    let mut channel = json!({
        "field": field,
        "type": binding.field_type.as_str(),
        "title": binding.label,
    });

    // Positional scales hug the data instead of always including zero
    if binding.aesthetic.is_positional() {
        channel["scale"] = json!({"zero": false});
    }

    Ok(channel)
}
