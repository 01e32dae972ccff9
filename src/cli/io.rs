//! JSON I/O handling for CLI
//!
//! - Output: a single JSON object per invocation on stdout
//! - Inputs are files, UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read an input file as UTF-8 text
pub fn read_input(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&response)
}

fn write_line(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"table": "orders"}"#).unwrap();
        assert_eq!(read_input(&path).unwrap(), r#"{"table": "orders"}"#);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_input(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_IO_ERROR");
        assert!(err.to_string().contains("missing.json"));
    }
}
