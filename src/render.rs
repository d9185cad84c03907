//! Plot construction with error and warning capture
//!
//! Rendering turns a complete [`Assignment`] into a [`ScatterPlot`] after checking
//! the bound columns against the dataset. Nothing escapes this boundary: fatal
//! problems become the outcome's `error`, non-fatal diagnostics become its
//! `warning`, and a clean render leaves both empty.

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::cascade::Assignment;
use crate::plot::{Aesthetic, Binding, FieldType, ScatterPlot};
use crate::{GgpickError, Result};

/// Maximum number of distinct values the shape palette can draw
pub const MAX_SHAPES: usize = 6;

/// Result of one render attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderOutcome {
    pub plot: Option<ScatterPlot>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl RenderOutcome {
    pub fn is_ok(&self) -> bool {
        self.plot.is_some() && self.error.is_none()
    }
}

/// Render the plot for `assignment` against `data`.
///
/// Returns `None` while the assignment is incomplete; that is the normal
/// "still configuring" state and not an error.
pub fn render(assignment: &Assignment, data: &DataFrame) -> Option<RenderOutcome> {
    let columns = assignment.complete()?;
    let plot = ScatterPlot::new(columns);

    let outcome = match build_plot(plot, data) {
        Ok((plot, warnings)) => {
            let warning = if warnings.is_empty() {
                None
            } else {
                Some(warnings.join("\n"))
            };
            debug!(
                "Rendered {} with {} warning(s)",
                assignment,
                warnings.len()
            );
            RenderOutcome {
                plot: Some(plot),
                error: None,
                warning,
            }
        }
        Err(e) => {
            warn!("Render of {} failed: {}", assignment, e);
            RenderOutcome {
                plot: None,
                error: Some(e.to_string()),
                warning: None,
            }
        }
    };
    Some(outcome)
}

/// Check every binding of `plot` against `data`, collecting warnings.
///
/// Shape levels beyond the palette keep no symbol, so their rows are dropped
/// together with rows holding missing values.
pub fn build_plot(mut plot: ScatterPlot, data: &DataFrame) -> Result<(ScatterPlot, Vec<String>)> {
    let mut warnings = Vec::new();

    for binding in &plot.bindings {
        let column = data.column(binding.column.name()).map_err(|_| {
            GgpickError::RenderError(format!(
                "Column '{}' bound to {} does not exist in the dataset",
                binding.column, binding.aesthetic
            ))
        })?;
        validate_binding(binding, column)?;
    }

    if let Some(shape) = plot.column(Aesthetic::Shape) {
        let levels = shape_levels(data.column(shape.name()).map_err(|e| {
            GgpickError::InternalError(format!("Failed to read shape column: {}", e))
        })?)?;
        if levels.len() > MAX_SHAPES {
            warnings.push(format!(
                "The shape palette can deal with a maximum of {} discrete values because more \
                 than {} becomes difficult to discriminate; you have {}. Consider choosing a \
                 column with fewer distinct values for shape.",
                MAX_SHAPES,
                MAX_SHAPES,
                levels.len()
            ));
            plot.shape_levels = Some(levels.into_iter().take(MAX_SHAPES).collect());
        }
    }

    let removed = count_removed_rows(&plot, data)?;
    if removed > 0 {
        warnings.push(format!(
            "Removed {} row{} containing missing values (geom_point).",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
    }

    Ok((plot, warnings))
}

/// Continuous aesthetics need numeric data; discrete ones accept anything
fn validate_binding(binding: &Binding, column: &polars::prelude::Column) -> Result<()> {
    if binding.field_type == FieldType::Nominal {
        return Ok(());
    }
    if is_numeric_dtype(column.dtype()) {
        Ok(())
    } else {
        Err(GgpickError::RenderError(format!(
            "Discrete value supplied to continuous scale: column '{}' has type {} and cannot \
             be mapped to {}",
            binding.column,
            column.dtype(),
            binding.aesthetic
        )))
    }
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    use DataType::*;
    matches!(
        dtype,
        Int8 | Int16 | Int32 | Int64 | UInt8 | UInt16 | UInt32 | UInt64 | Float32 | Float64
    )
}

fn is_missing(value: &AnyValue) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::Float32(v) => v.is_nan(),
        _ => false,
    }
}

fn cell<'a>(column: &'a polars::prelude::Column, row: usize) -> Result<AnyValue<'a>> {
    column
        .get(row)
        .map_err(|e| GgpickError::InternalError(format!("Failed to read row: {}", e)))
}

/// Identity of a value as a shape level
pub(crate) fn level_key(value: &AnyValue) -> String {
    value.to_string()
}

/// Distinct non-missing values of a column in palette order: numeric columns
/// sort by value, anything else by text
pub(crate) fn shape_levels(column: &polars::prelude::Column) -> Result<Vec<String>> {
    let numeric = is_numeric_dtype(column.dtype());
    let mut seen = HashSet::new();
    let mut levels: Vec<(f64, String)> = Vec::new();

    for row in 0..column.len() {
        let value = cell(column, row)?;
        if is_missing(&value) {
            continue;
        }
        let key = level_key(&value);
        if seen.insert(key.clone()) {
            let order = if numeric {
                value.extract::<f64>().unwrap_or(f64::NAN)
            } else {
                0.0
            };
            levels.push((order, key));
        }
    }

    levels.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(levels.into_iter().map(|(_, key)| key).collect())
}

/// Rows that are not drawn: a bound column is missing, or the shape value has
/// no symbol
fn count_removed_rows(plot: &ScatterPlot, data: &DataFrame) -> Result<usize> {
    let columns = plot
        .bindings
        .iter()
        .map(|b| data.column(b.column.name()))
        .collect::<PolarsResult<Vec<_>>>()
        .map_err(|e| GgpickError::InternalError(format!("Failed to get columns: {}", e)))?;

    let shape = match (&plot.shape_levels, plot.column(Aesthetic::Shape)) {
        (Some(levels), Some(shape)) => {
            let column = data.column(shape.name()).map_err(|e| {
                GgpickError::InternalError(format!("Failed to read shape column: {}", e))
            })?;
            Some((levels, column))
        }
        _ => None,
    };

    let mut removed = 0;
    for row in 0..data.height() {
        let mut dropped = false;
        for column in &columns {
            if is_missing(&cell(column, row)?) {
                dropped = true;
                break;
            }
        }
        if !dropped {
            if let Some((levels, column)) = &shape {
                dropped = !levels.contains(&level_key(&cell(column, row)?));
            }
        }
        if dropped {
            removed += 1;
        }
    }
    Ok(removed)
}
