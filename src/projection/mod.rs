//! Column projection for aerofed
//!
//! Turns a request and its table into the ordered output columns every
//! row of the result is aligned to.

mod column;
mod projector;

pub use column::{ColumnDescriptor, Projection};
pub use projector::{ColumnProjector, ProjectionOutcome};
