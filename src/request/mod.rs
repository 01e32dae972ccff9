//! Request model consumed by result materialization
//!
//! The SQL translator parses the statement, picks the table and decides
//! whether the backend query carries single-value or bucketed
//! aggregations. This module holds that output; nothing here parses SQL.

mod ast;
mod request;

pub use ast::{SelectColumn, SelectStatement};
pub use request::{RequestError, RequestSpec, SqlRequest};
