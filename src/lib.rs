/*!
# ggpick - cascading aesthetic selection for scatter plots

ggpick lets a user bind the columns of a fixed dataset (`mtcars`) to the five
aesthetics of a scatter plot, one slot at a time:

```text
x-axis -> y-axis -> color -> size -> shape
```

Every slot only offers the columns that no earlier slot has taken, and changing
a slot clears every slot after it. Once all five slots are bound, the plot is
rendered into a point-geometry plot description and written out as Vega-Lite.

## Core Components

- [`plot`] - Columns, aesthetics and the scatter plot description
- [`cascade`] - Slot assignment and the cascading selection rules
- [`render`] - Plot construction with error/warning capture
- [`session`] - The dashboard session driving both from user events
- [`reader`] - The built-in dataset
- [`writer`] - Output writers (Vega-Lite)
*/

pub mod cascade;
pub mod plot;
pub mod reader;
pub mod render;
pub mod session;

#[cfg(feature = "vegalite")]
pub mod writer;

// Re-export key types for convenience
pub use cascade::{available_for, reduce, set_slot, Assignment, Event};
pub use plot::{Aesthetic, Column, ScatterPlot};
pub use render::{render, RenderOutcome};
pub use session::Session;

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum GgpickError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Hidden slot: {0}")]
    HiddenSlot(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, GgpickError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
