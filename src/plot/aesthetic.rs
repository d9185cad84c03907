//! Aesthetic slots of the scatter plot
//!
//! The dashboard exposes one selector per aesthetic. Selectors are ordered: each
//! one only becomes visible once every selector before it holds a column.
//!
//! # Continuous vs Discrete
//!
//! Position, color and size are continuous channels. Shape is always discrete:
//! numerically encoded columns are treated as categories when bound to it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GgpickError;

static SELECTION_ORDER: [Aesthetic; 5] = Aesthetic::ALL;

/// One of the five aesthetic roles a column can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aesthetic {
    X,
    Y,
    #[serde(alias = "colour")]
    Color,
    Size,
    Shape,
}

impl Aesthetic {
    /// All aesthetics, in selection order
    pub const ALL: [Aesthetic; 5] = [
        Aesthetic::X,
        Aesthetic::Y,
        Aesthetic::Color,
        Aesthetic::Size,
        Aesthetic::Shape,
    ];

    /// Zero-based position in the selection order
    pub fn index(self) -> usize {
        match self {
            Aesthetic::X => 0,
            Aesthetic::Y => 1,
            Aesthetic::Color => 2,
            Aesthetic::Size => 3,
            Aesthetic::Shape => 4,
        }
    }

    /// Look up an aesthetic by its zero-based position
    pub fn from_index(index: usize) -> Option<Self> {
        Aesthetic::ALL.get(index).copied()
    }

    /// Aesthetics that come before this one in the selection order
    pub fn upstream(self) -> &'static [Aesthetic] {
        &SELECTION_ORDER[..self.index()]
    }

    /// Aesthetics that come after this one in the selection order
    pub fn downstream(self) -> &'static [Aesthetic] {
        &SELECTION_ORDER[self.index() + 1..]
    }

    /// Aesthetic (and encoding channel) name
    pub fn name(self) -> &'static str {
        match self {
            Aesthetic::X => "x",
            Aesthetic::Y => "y",
            Aesthetic::Color => "color",
            Aesthetic::Size => "size",
            Aesthetic::Shape => "shape",
        }
    }

    /// Title of the selector control
    pub fn title(self) -> &'static str {
        match self {
            Aesthetic::X => "X-axis",
            Aesthetic::Y => "Y-axis",
            Aesthetic::Color => "Color",
            Aesthetic::Size => "Size",
            Aesthetic::Shape => "Shape",
        }
    }

    /// Whether bound values are treated as categories
    pub fn is_discrete(self) -> bool {
        matches!(self, Aesthetic::Shape)
    }

    pub fn is_positional(self) -> bool {
        matches!(self, Aesthetic::X | Aesthetic::Y)
    }
}

impl std::fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Aesthetic {
    type Err = GgpickError;

    /// Accepts the aesthetic name (`colour` included) or the 1-based slot number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if let Ok(number) = value.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(Aesthetic::from_index)
                .ok_or_else(|| {
                    GgpickError::ParseError(format!("Slot number {} is out of range 1..=5", number))
                });
        }
        match value.as_str() {
            "x" => Ok(Aesthetic::X),
            "y" => Ok(Aesthetic::Y),
            "color" | "colour" => Ok(Aesthetic::Color),
            "size" => Ok(Aesthetic::Size),
            "shape" => Ok(Aesthetic::Shape),
            _ => Err(GgpickError::ParseError(format!(
                "Unknown aesthetic '{}' (expected x, y, color, size or shape)",
                s
            ))),
        }
    }
}
