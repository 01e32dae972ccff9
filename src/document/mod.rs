//! Schema-less document access
//!
//! Document store hits and aggregation payloads arrive as untyped JSON.
//! `DocumentTree` gives them typed, path-addressed accessors so call
//! sites never match on JSON shapes directly.

mod tree;

pub use tree::DocumentTree;
