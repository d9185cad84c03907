//! Data source layer for ggpick
//!
//! The dashboard works on one fixed, read-only table that is built once at
//! startup and shared by every render. Readers hand that table out as a Polars
//! DataFrame.
//!
//! # Example
//!
//! ```rust
//! use ggpick::reader::{BuiltinReader, Reader};
//!
//! let df = BuiltinReader::new().read()?;
//! assert_eq!(df.shape(), (32, 11));
//! # Ok::<(), ggpick::GgpickError>(())
//! ```

use crate::plot::Column;
use crate::{DataFrame, GgpickError, Result};

pub mod data;

pub use data::mtcars;

/// Trait for data source readers
pub trait Reader {
    /// Produce the dataset as a DataFrame
    ///
    /// # Errors
    ///
    /// Returns `GgpickError::DataError` if the table cannot be built or lacks one of
    /// the known columns.
    fn read(&self) -> Result<DataFrame>;
}

/// Reader for the dataset compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReader;

impl BuiltinReader {
    pub fn new() -> Self {
        Self
    }
}

impl Reader for BuiltinReader {
    fn read(&self) -> Result<DataFrame> {
        let df = mtcars()?;
        check_columns(&df)?;
        Ok(df)
    }
}

/// Verify that every known column exists in `df`
pub fn check_columns(df: &DataFrame) -> Result<()> {
    let missing: Vec<&str> = Column::ALL
        .iter()
        .map(|c| c.name())
        .filter(|name| df.column(name).is_err())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GgpickError::DataError(format!(
            "Dataset is missing column(s): {}",
            missing.join(", ")
        )))
    }
}
