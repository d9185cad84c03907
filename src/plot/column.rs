//! Dataset columns and their display labels
//!
//! The dataset has a fixed set of eleven numeric columns. Each column has a short
//! name (as it appears in the data) and a human-readable label used for axis and
//! legend titles.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GgpickError;

/// A column of the built-in dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Mpg,
    Cyl,
    Disp,
    Hp,
    Drat,
    Wt,
    Qsec,
    Vs,
    Am,
    Gear,
    Carb,
}

impl Column {
    /// All columns, in dataset order
    pub const ALL: [Column; 11] = [
        Column::Mpg,
        Column::Cyl,
        Column::Disp,
        Column::Hp,
        Column::Drat,
        Column::Wt,
        Column::Qsec,
        Column::Vs,
        Column::Am,
        Column::Gear,
        Column::Carb,
    ];

    /// Column name as it appears in the dataset
    pub fn name(self) -> &'static str {
        match self {
            Column::Mpg => "mpg",
            Column::Cyl => "cyl",
            Column::Disp => "disp",
            Column::Hp => "hp",
            Column::Drat => "drat",
            Column::Wt => "wt",
            Column::Qsec => "qsec",
            Column::Vs => "vs",
            Column::Am => "am",
            Column::Gear => "gear",
            Column::Carb => "carb",
        }
    }

    /// Human-readable label used for axis and legend titles
    pub fn label(self) -> &'static str {
        match self {
            Column::Mpg => "Miles Per Gallon",
            Column::Cyl => "Number of Cylinders",
            Column::Disp => "Displacement (cu.in.)",
            Column::Hp => "Gross Horsepower",
            Column::Drat => "Rear Axle Ratio",
            Column::Wt => "Weight (1000 lbs)",
            Column::Qsec => "1/4 Mile Time",
            Column::Vs => "Engine (0 = V-shaped, 1 = straight)",
            Column::Am => "Transmission",
            Column::Gear => "Number of Gears",
            Column::Carb => "Number of Carburetors",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = GgpickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Column::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                GgpickError::ParseError(format!(
                    "Unknown column '{}' (expected one of: {})",
                    s,
                    Column::ALL
                        .iter()
                        .map(|c| c.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
