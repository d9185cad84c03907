//! Output writer abstraction layer for ggpick
//!
//! Writers turn a [`ScatterPlot`] plus the dataset into an output format.
//!
//! # Example
//!
//! ```rust,ignore
//! use ggpick::writer::{Writer, VegaLiteWriter};
//!
//! let writer = VegaLiteWriter::new();
//! let json = writer.write(&plot, &dataframe)?;
//! println!("{}", json);
//! ```

use crate::plot::ScatterPlot;
use crate::{DataFrame, Result};

pub mod vegalite;

pub use vegalite::VegaLiteWriter;

/// Trait for visualization output writers
pub trait Writer {
    /// The output type produced by this writer.
    type Output;

    /// Generate output from a plot description and its data
    ///
    /// # Errors
    ///
    /// Returns `GgpickError::WriterError` if the plot references data that is
    /// missing or output generation fails, and `GgpickError::RenderError` if the
    /// plot is incompatible with this writer.
    fn write(&self, plot: &ScatterPlot, data: &DataFrame) -> Result<Self::Output>;

    /// Validate that a plot is compatible with this writer
    fn validate(&self, plot: &ScatterPlot) -> Result<()>;
}
