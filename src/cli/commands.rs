//! CLI command implementations
//!
//! Commands build a JSON payload; `run_command` writes it to stdout as a
//! success or error response.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::observability::WriterDiagnostics;
use crate::projection::{ColumnProjector, Projection};
use crate::request::{RequestSpec, SqlRequest};
use crate::results::{CellValue, RawResponse, ReaderConfig, ResultReader, ResultWarning};
use crate::schema::SchemaLoader;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command and write its response
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Columns { schema, request } => columns(&schema, &request),
        Command::Materialize {
            schema,
            request,
            response,
            config,
        } => materialize(&schema, &request, &response, config.as_deref()),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e)
        }
    }
}

/// Output columns of a request
///
/// No response is read, so aggregate requests are projected as if the
/// backend returned aggregations.
pub fn columns(schema_path: &Path, request_path: &Path) -> CliResult<Value> {
    let request = load_request(schema_path, request_path)?;

    let expects_aggregations = request.has_single_value || request.has_multi_value;
    let outcome = ColumnProjector::project(&request, expects_aggregations);

    Ok(json!({
        "columns": columns_json(&outcome.projection),
        "warnings": warnings_json(&outcome.warnings),
    }))
}

/// Finalize a captured search response and collect its rows
pub fn materialize(
    schema_path: &Path,
    request_path: &Path,
    response_path: &Path,
    config_path: Option<&Path>,
) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let request = load_request(schema_path, request_path)?;

    let body = read_input(response_path)?;
    let response = RawResponse::from_search_json(&body)?;

    let diagnostics = WriterDiagnostics::new(io::stderr(), config.severity()?);
    let mut reader = ResultReader::new(request)
        .with_response(response)
        .with_config(config)
        .with_diagnostics(Arc::new(diagnostics));

    reader.finalize()?;

    let columns = columns_json(reader.projection());
    let rows: Vec<Value> = reader
        .create_iterator()
        .map(|msg| Value::Array(msg.values.iter().map(CellValue::to_json).collect()))
        .collect();
    let data = json!({
        "columns": columns,
        "rows": rows,
        "total": reader.total(),
        "warnings": warnings_json(reader.warnings()),
    });

    reader.close();
    Ok(data)
}

fn load_config(path: Option<&Path>) -> CliResult<ReaderConfig> {
    match path {
        Some(path) => Ok(ReaderConfig::load(path)?),
        None => Ok(ReaderConfig::default()),
    }
}

fn load_request(schema_path: &Path, request_path: &Path) -> CliResult<SqlRequest> {
    let schema = SchemaLoader::load_file(schema_path)?;
    let content = read_input(request_path)?;
    let spec: RequestSpec = serde_json::from_str(&content).map_err(|e| {
        CliError::Request(format!("Invalid request {}: {}", request_path.display(), e))
    })?;
    Ok(spec.resolve(schema)?)
}

fn columns_json(projection: &Projection) -> Vec<Value> {
    projection
        .iter()
        .map(|col| {
            json!({
                "name": col.name,
                "ordinal": col.ordinal,
                "type": col.column_type.type_name(),
            })
        })
        .collect()
}

fn warnings_json(warnings: &[ResultWarning]) -> Vec<Value> {
    warnings
        .iter()
        .map(|w| json!({"code": w.code(), "message": w.to_string()}))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content.to_string()).unwrap();
        path
    }

    fn create_schema(dir: &TempDir) -> PathBuf {
        write(
            dir,
            "schema.json",
            json!({
                "name": "shop",
                "tables": [{
                    "name": "orders",
                    "fields": [
                        {"name": "_id", "type": "string"},
                        {"name": "price", "type": "float"},
                        {"name": "qty", "type": "int"}
                    ]
                }]
            }),
        )
    }

    #[test]
    fn test_columns_star() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({"table": "orders", "select": {"star": true}}),
        );

        let data = columns(&schema, &request).unwrap();
        let cols = data["columns"].as_array().unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[1]["name"], "price");
        assert_eq!(cols[1]["type"], "number");
        assert_eq!(cols[2]["ordinal"], 2);
    }

    #[test]
    fn test_columns_reports_unresolved() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({
                "table": "orders",
                "select": {"columns": [
                    {"expression": "qty", "source_field": "qty"},
                    {"expression": "color", "source_field": "color"}
                ]}
            }),
        );

        let data = columns(&schema, &request).unwrap();
        assert_eq!(data["columns"].as_array().unwrap().len(), 1);
        assert_eq!(data["warnings"][0]["code"], "AERO_RESULT_UNRESOLVED_COLUMN");
    }

    #[test]
    fn test_materialize_documents() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({"table": "orders", "select": {"star": true}}),
        );
        let response = write(
            &dir,
            "response.json",
            json!({"hits": {"total": 2, "hits": [
                {"_id": "a", "_source": {"price": 1.5, "qty": 3}},
                {"_id": "b", "_source": {"price": 2.0}}
            ]}}),
        );

        let data = materialize(&schema, &request, &response, None).unwrap();
        assert_eq!(data["total"], 2);
        assert_eq!(data["rows"][0], json!(["a", 1.5, 3]));
        assert_eq!(data["rows"][1], json!(["b", 2.0, null]));
    }

    #[test]
    fn test_materialize_count_star() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({
                "table": "orders",
                "select": {"columns": [{"expression": "count(*)", "count_star": true}]}
            }),
        );
        let response = write(
            &dir,
            "response.json",
            json!({"hits": {"total": {"value": 42, "relation": "eq"}, "hits": []}}),
        );

        let data = materialize(&schema, &request, &response, None).unwrap();
        assert_eq!(data["columns"][0]["name"], "count");
        assert_eq!(data["rows"], json!([[42]]));
    }

    #[test]
    fn test_materialize_conflict() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({
                "table": "orders",
                "select": {"columns": [{"expression": "avg(price)", "source_field": "price"}]},
                "single_value": true,
                "multi_value": true
            }),
        );
        let response = write(&dir, "response.json", json!({"aggregations": {}}));

        let err = materialize(&schema, &request, &response, None).unwrap_err();
        assert_eq!(err.code(), "AERO_RESULT_AGGREGATE_CONFLICT");
    }

    #[test]
    fn test_materialize_unknown_table() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({"table": "users", "select": {"star": true}}),
        );
        let response = write(&dir, "response.json", json!({}));

        let err = materialize(&schema, &request, &response, None).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_REQUEST_ERROR");
    }

    #[test]
    fn test_malformed_request_is_request_error() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = dir.path().join("request.json");
        fs::write(&request, r#"{"table": "orders", "select": "#).unwrap();
        let response = write(&dir, "response.json", json!({}));

        let err = materialize(&schema, &request, &response, None).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_REQUEST_ERROR");
        assert!(err.to_string().contains("Invalid request"));

        let err = columns(&schema, &request).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_REQUEST_ERROR");
    }

    #[test]
    fn test_request_with_wrong_shape_is_request_error() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(&dir, "request.json", json!({"select": {"star": true}}));

        let err = columns(&schema, &request).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_REQUEST_ERROR");
    }

    #[test]
    fn test_missing_request_is_io_error() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);

        let err = columns(&schema, &dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_IO_ERROR");
    }

    #[test]
    fn test_materialize_rejects_bad_config() {
        let dir = TempDir::new().unwrap();
        let schema = create_schema(&dir);
        let request = write(
            &dir,
            "request.json",
            json!({"table": "orders", "select": {"star": true}}),
        );
        let response = write(&dir, "response.json", json!({}));
        let config = write(&dir, "config.json", json!({"source_prefix": ""}));

        let err = materialize(&schema, &request, &response, Some(&config)).unwrap_err();
        assert_eq!(err.code(), "AERO_CLI_CONFIG_ERROR");
    }
}
