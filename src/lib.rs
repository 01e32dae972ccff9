//! aerofed - result materialization for SQL federated onto a document store
//!
//! A SQL request is translated into a search or aggregation query elsewhere;
//! this crate turns the backend's response back into typed rows:
//!
//! - `schema`: tables and typed fields
//! - `request`: parsed SELECT plus aggregate-shape flags
//! - `document`: path lookups into nested JSON hits
//! - `projection`: ordered output columns
//! - `results`: finalization, row storage and both iteration contracts
//! - `observability`: logs, events, counters
//! - `cli`: offline materialization of captured responses

pub mod cli;
pub mod document;
pub mod observability;
pub mod projection;
pub mod request;
pub mod results;
pub mod schema;
