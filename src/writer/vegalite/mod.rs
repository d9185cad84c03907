//! Vega-Lite JSON writer implementation
//!
//! Converts a scatter plot description and its DataFrame into a Vega-Lite
//! specification for web-based rendering.
//!
//! # Mapping Strategy
//!
//! - point geom -> Vega-Lite `point` mark (filled)
//! - plot bindings -> Vega-Lite encoding channels, titled with column labels
//! - Polars DataFrame -> Vega-Lite inline data
//!
//! # Example
//!
//! ```rust,ignore
//! use ggpick::writer::{Writer, VegaLiteWriter};
//!
//! let writer = VegaLiteWriter::new();
//! let vega_json = writer.write(&plot, &dataframe)?;
//! // Can be rendered in browser with vega-embed
//! ```

mod data;
mod encoding;

use crate::plot::{Aesthetic, GeomTrait, GeomType, ScatterPlot};
use crate::writer::Writer;
use crate::{DataFrame, GgpickError, Result};
use serde_json::{json, Map, Value};

use data::{dataframe_to_values, rows_with_levels};
use encoding::{build_encoding_channel, map_aesthetic_name};

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v6 specifications.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
        }
    }

    /// Build the specification as a JSON value
    pub fn to_value(&self, plot: &ScatterPlot, data: &DataFrame) -> Result<Value> {
        self.validate(plot)?;

        for binding in &plot.bindings {
            if data.column(binding.column.name()).is_err() {
                return Err(GgpickError::WriterError(format!(
                    "Column '{}' bound to {} does not exist in the data",
                    binding.column, binding.aesthetic
                )));
            }
        }

        let mut vl_spec = json!({
            "$schema": self.schema
        });

        // Responsive plot sizing
        vl_spec["width"] = json!("container");
        vl_spec["height"] = json!("container");

        let (rows, shape_domain) = drawn_rows(plot, data)?;
        vl_spec["data"] = json!({"values": dataframe_to_values(data, &rows)?});
        vl_spec["mark"] = geom_to_mark(plot.geom.geom_type());

        let mut encoding = Map::new();
        for binding in &plot.bindings {
            let mut channel = build_encoding_channel(binding, data)?;
            if binding.aesthetic == Aesthetic::Shape {
                if let Some(domain) = &shape_domain {
                    channel["scale"] = json!({"domain": domain});
                }
            }
            encoding.insert(map_aesthetic_name(binding.aesthetic).to_string(), channel);
        }
        vl_spec["encoding"] = Value::Object(encoding);

        Ok(vl_spec)
    }
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows to inline, and the shape scale domain when the palette is limited
fn drawn_rows(plot: &ScatterPlot, data: &DataFrame) -> Result<(Vec<usize>, Option<Vec<Value>>)> {
    match (&plot.shape_levels, plot.column(Aesthetic::Shape)) {
        (Some(levels), Some(shape)) => {
            let column = data.column(shape.name()).map_err(|e| {
                GgpickError::WriterError(format!("Failed to read shape column: {}", e))
            })?;
            let (rows, domain) = rows_with_levels(column, levels)?;
            Ok((rows, Some(domain)))
        }
        _ => Ok(((0..data.height()).collect(), None)),
    }
}

/// Vega-Lite mark for a geom
pub(crate) fn geom_to_mark(geom: GeomType) -> Value {
    match geom {
        GeomType::Point => json!({"type": "point", "filled": true, "clip": true}),
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, plot: &ScatterPlot, data: &DataFrame) -> Result<String> {
        let vl_spec = self.to_value(plot, data)?;
        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            GgpickError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }

    fn validate(&self, plot: &ScatterPlot) -> Result<()> {
        let aesthetics = plot.geom.aesthetics();

        for binding in &plot.bindings {
            if !aesthetics.is_supported(binding.aesthetic.name()) {
                return Err(GgpickError::RenderError(format!(
                    "Aesthetic '{}' is not supported by geom '{}'",
                    binding.aesthetic, plot.geom
                )));
            }
        }

        let mapped: Vec<&str> = plot.bindings.iter().map(|b| b.aesthetic.name()).collect();
        plot.geom
            .validate_required_aesthetics(&mapped)
            .map_err(|e| GgpickError::RenderError(format!("Plot validation failed: {}", e)))
    }
}
