//! Scatter plot description
//!
//! A `ScatterPlot` is the render instruction produced once every aesthetic slot
//! holds a column: point geometry plus one labelled binding per aesthetic.
//! It carries no data; writers combine it with the dataset.

use serde::{Deserialize, Serialize};

use super::{Aesthetic, Column, Point};

/// How a bound column is scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Continuous numeric scale
    Quantitative,
    /// Categorical scale
    Nominal,
}

impl FieldType {
    pub fn for_aesthetic(aesthetic: Aesthetic) -> Self {
        if aesthetic.is_discrete() {
            FieldType::Nominal
        } else {
            FieldType::Quantitative
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Quantitative => "quantitative",
            FieldType::Nominal => "nominal",
        }
    }
}

/// A column bound to an aesthetic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub aesthetic: Aesthetic,
    pub column: Column,
    /// Axis or legend title
    pub label: String,
    pub field_type: FieldType,
}

impl Binding {
    pub fn new(aesthetic: Aesthetic, column: Column) -> Self {
        Self {
            aesthetic,
            column,
            label: column.label().to_string(),
            field_type: FieldType::for_aesthetic(aesthetic),
        }
    }
}

/// Point-geometry plot with one binding per aesthetic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub geom: Point,
    /// Bindings in selection order
    pub bindings: Vec<Binding>,
    /// Shape levels that get a symbol, in palette order. `None` draws every level;
    /// rows whose shape value is not listed are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_levels: Option<Vec<String>>,
}

impl ScatterPlot {
    /// Bind `columns[i]` to the i-th aesthetic of the selection order
    pub fn new(columns: [Column; 5]) -> Self {
        Self {
            geom: Point,
            bindings: Aesthetic::ALL
                .into_iter()
                .zip(columns)
                .map(|(aesthetic, column)| Binding::new(aesthetic, column))
                .collect(),
            shape_levels: None,
        }
    }

    pub fn binding(&self, aesthetic: Aesthetic) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.aesthetic == aesthetic)
    }

    pub fn column(&self, aesthetic: Aesthetic) -> Option<Column> {
        self.binding(aesthetic).map(|b| b.column)
    }

    pub fn label(&self, aesthetic: Aesthetic) -> Option<&str> {
        self.binding(aesthetic).map(|b| b.label.as_str())
    }
}
