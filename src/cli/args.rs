//! CLI argument definitions using clap
//!
//! Commands:
//! - aerofed columns --schema <path> --request <path>
//! - aerofed materialize --schema <path> --request <path> --response <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aerofed - materialize captured search responses into SQL rows
#[derive(Parser, Debug)]
#[command(name = "aerofed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the output columns of a request
    Columns {
        /// Path to a schema definition file
        #[arg(long)]
        schema: PathBuf,

        /// Path to a request description file
        #[arg(long)]
        request: PathBuf,
    },

    /// Finalize a captured search response and print its rows
    Materialize {
        /// Path to a schema definition file
        #[arg(long)]
        schema: PathBuf,

        /// Path to a request description file
        #[arg(long)]
        request: PathBuf,

        /// Path to a captured search response body
        #[arg(long)]
        response: PathBuf,

        /// Path to reader configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_materialize() {
        let cli = Cli::try_parse_from([
            "aerofed",
            "materialize",
            "--schema",
            "s.json",
            "--request",
            "r.json",
            "--response",
            "hits.json",
        ])
        .unwrap();

        match cli.command {
            Command::Materialize {
                response, config, ..
            } => {
                assert_eq!(response, PathBuf::from("hits.json"));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_columns_takes_no_config() {
        let result = Cli::try_parse_from([
            "aerofed",
            "columns",
            "--schema",
            "s.json",
            "--request",
            "r.json",
            "--config",
            "c.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_columns_requires_request() {
        let result = Cli::try_parse_from(["aerofed", "columns", "--schema", "s.json"]);
        assert!(result.is_err());
    }
}
