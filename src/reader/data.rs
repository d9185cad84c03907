//! Built-in `mtcars` dataset
//!
//! Fuel consumption and ten aspects of design and performance for 32 automobiles
//! (1973-74 models), as published in the 1974 Motor Trend US magazine. All columns
//! are stored as `f64`.

use polars::prelude::*;

use crate::{GgpickError, Result};

const MPG: [f64; 32] = [
    21.0, 21.0, 22.8, 21.4, 18.7, 18.1, 14.3, 24.4, 22.8, 19.2, 17.8, 16.4, 17.3, 15.2, 10.4, 10.4,
    14.7, 32.4, 30.4, 33.9, 21.5, 15.5, 15.2, 13.3, 19.2, 27.3, 26.0, 30.4, 15.8, 19.7, 15.0, 21.4,
];

const CYL: [f64; 32] = [
    6.0, 6.0, 4.0, 6.0, 8.0, 6.0, 8.0, 4.0, 4.0, 6.0, 6.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 4.0, 4.0,
    4.0, 4.0, 8.0, 8.0, 8.0, 8.0, 4.0, 4.0, 4.0, 8.0, 6.0, 8.0, 4.0,
];

const DISP: [f64; 32] = [
    160.0, 160.0, 108.0, 258.0, 360.0, 225.0, 360.0, 146.7, 140.8, 167.6, 167.6, 275.8, 275.8,
    275.8, 472.0, 460.0, 440.0, 78.7, 75.7, 71.1, 120.1, 318.0, 304.0, 350.0, 400.0, 79.0, 120.3,
    95.1, 351.0, 145.0, 301.0, 121.0,
];

const HP: [f64; 32] = [
    110.0, 110.0, 93.0, 110.0, 175.0, 105.0, 245.0, 62.0, 95.0, 123.0, 123.0, 180.0, 180.0, 180.0,
    205.0, 215.0, 230.0, 66.0, 52.0, 65.0, 97.0, 150.0, 150.0, 245.0, 175.0, 66.0, 91.0, 113.0,
    264.0, 175.0, 335.0, 109.0,
];

const DRAT: [f64; 32] = [
    3.90, 3.90, 3.85, 3.08, 3.15, 2.76, 3.21, 3.69, 3.92, 3.92, 3.92, 3.07, 3.07, 3.07, 2.93, 3.00,
    3.23, 4.08, 4.93, 4.22, 3.70, 2.76, 3.15, 3.73, 3.08, 4.08, 4.43, 3.77, 4.22, 3.62, 3.54, 4.11,
];

const WT: [f64; 32] = [
    2.620, 2.875, 2.320, 3.215, 3.440, 3.460, 3.570, 3.190, 3.150, 3.440, 3.440, 4.070, 3.730,
    3.780, 5.250, 5.424, 5.345, 2.200, 1.615, 1.835, 2.465, 3.520, 3.435, 3.840, 3.845, 1.935,
    2.140, 1.513, 3.170, 2.770, 3.570, 2.780,
];

const QSEC: [f64; 32] = [
    16.46, 17.02, 18.61, 19.44, 17.02, 20.22, 15.84, 20.00, 22.90, 18.30, 18.90, 17.40, 17.60,
    18.00, 17.98, 17.82, 17.42, 19.47, 18.52, 19.90, 20.01, 16.87, 17.30, 15.41, 17.05, 18.90,
    16.70, 16.90, 14.50, 15.50, 14.60, 18.60,
];

const VS: [f64; 32] = [
    0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0,
    1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
];

const AM: [f64; 32] = [
    1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const GEAR: [f64; 32] = [
    4.0, 4.0, 4.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0,
    4.0, 3.0, 3.0, 3.0, 3.0, 3.0, 4.0, 5.0, 5.0, 5.0, 5.0, 5.0, 4.0,
];

const CARB: [f64; 32] = [
    4.0, 4.0, 1.0, 1.0, 2.0, 1.0, 4.0, 2.0, 2.0, 4.0, 4.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 1.0, 2.0,
    1.0, 1.0, 2.0, 2.0, 4.0, 2.0, 1.0, 2.0, 2.0, 4.0, 6.0, 8.0, 2.0,
];

/// Build the `mtcars` DataFrame (32 rows, 11 columns)
pub fn mtcars() -> Result<DataFrame> {
    df! {
        "mpg" => &MPG,
        "cyl" => &CYL,
        "disp" => &DISP,
        "hp" => &HP,
        "drat" => &DRAT,
        "wt" => &WT,
        "qsec" => &QSEC,
        "vs" => &VS,
        "am" => &AM,
        "gear" => &GEAR,
        "carb" => &CARB,
    }
    .map_err(|e| GgpickError::DataError(format!("Failed to build mtcars dataset: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Column;

    #[test]
    fn test_shape() {
        let df = mtcars().unwrap();
        assert_eq!(df.shape(), (32, 11));
    }

    #[test]
    fn test_column_order_matches_known_columns() {
        let df = mtcars().unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let expected: Vec<String> = Column::ALL.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_all_columns_numeric() {
        let df = mtcars().unwrap();
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::Float64);
        }
    }

    #[test]
    fn test_known_values() {
        let df = mtcars().unwrap();
        let mpg = df.column("mpg").unwrap();
        assert_eq!(mpg.get(0).unwrap(), AnyValue::Float64(21.0));
        let carb = df.column("carb").unwrap();
        assert_eq!(carb.get(30).unwrap(), AnyValue::Float64(8.0));
    }
}
