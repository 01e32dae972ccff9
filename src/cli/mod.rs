//! CLI module for aerofed
//!
//! Offline tooling over captured backend responses:
//! - columns: print the projection of a request
//! - materialize: finalize a response and print its rows

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{columns, materialize, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{read_input, write_error, write_response};
