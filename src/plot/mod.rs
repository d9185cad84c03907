//! Plot types for the dashboard
//!
//! This module contains the types describing what can be plotted and how:
//!
//! - `column` - The fixed dataset columns and their labels
//! - `aesthetic` - The five aesthetic slots, in selection order
//! - `geom` - Geom trait and the point geom
//! - `scatter` - The scatter plot render instruction

pub mod aesthetic;
pub mod column;
pub mod geom;
pub mod scatter;

// Re-export all types for convenience
pub use aesthetic::*;
pub use column::*;
pub use geom::*;
pub use scatter::*;
