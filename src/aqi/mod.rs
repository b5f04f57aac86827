//! AQI computation: breakpoint interpolation, aggregation, classification
//! and contribution breakdowns.

pub mod aggregation;
pub mod breakpoints;
pub mod category;
pub mod error;
pub mod explain;
pub mod parser;
pub mod subindex;

pub use aggregation::*;
pub use breakpoints::BreakpointTable;
pub use category::*;
pub use error::AqiError;
pub use explain::*;
pub use parser::*;
pub use subindex::*;
