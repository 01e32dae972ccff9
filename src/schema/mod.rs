//! Table catalog for aerofed
//!
//! The catalog is a read-only lookup consumed by projection and
//! per-document materialization:
//!
//! - Ordered field list per table (drives `SELECT *`)
//! - Field-name lookup (drives explicit column lists)
//! - Declared column types (drives value coercion)

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{ColumnType, Schema, Table, TableField};
