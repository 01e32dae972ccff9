//! Schema loader for reading table catalogs from disk
//!
//! A schema file is a single JSON object:
//!
//! ```json
//! {
//!   "name": "es",
//!   "source_type": "elasticsearch",
//!   "tables": [
//!     {"name": "orders", "fields": [{"name": "price", "type": "number"}]}
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Schema, Table, TableField};

#[derive(Debug, Deserialize)]
struct SchemaFile {
    name: String,
    #[serde(default = "default_source_type")]
    source_type: String,
    #[serde(default)]
    tables: Vec<TableFile>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    name: String,
    fields: Vec<TableField>,
}

fn default_source_type() -> String {
    "elasticsearch".to_string()
}

/// Loads schema files and keeps an in-memory registry keyed by schema name.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaLoader {
    /// Creates a loader for the given directory. Nothing is read until `load_all`.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory is treated as empty.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| SchemaError::Io {
            path: self.schema_dir.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SchemaError::Io {
                path: self.schema_dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        // Directory order is platform dependent
        paths.sort();

        for path in paths {
            let schema = Self::load_file(&path)?;
            self.register(schema)?;
        }

        Ok(())
    }

    /// Reads and validates a single schema file.
    pub fn load_file(path: &Path) -> SchemaResult<Arc<Schema>> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Parses a schema definition held in memory.
    pub fn from_json_str(content: &str) -> SchemaResult<Arc<Schema>> {
        Self::parse("<in-memory>", content)
    }

    fn parse(location: &str, content: &str) -> SchemaResult<Arc<Schema>> {
        let file: SchemaFile = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(location, format!("Invalid JSON: {}", e)))?;

        let mut tables = Vec::with_capacity(file.tables.len());
        for table in file.tables {
            if table.fields.is_empty() {
                return Err(SchemaError::EmptyTable(table.name));
            }
            let mut seen = HashSet::new();
            for field in &table.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        table: table.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            tables.push(Table::new(table.name, table.fields));
        }

        Ok(Arc::new(Schema::new(file.name, file.source_type, tables)))
    }

    /// Registers a schema directly.
    pub fn register(&mut self, schema: Arc<Schema>) -> SchemaResult<()> {
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateSchema(schema.name.clone()));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Checks if a schema exists.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;
    use tempfile::TempDir;

    const ORDERS: &str = r#"{
        "name": "es",
        "tables": [
            {"name": "orders", "fields": [
                {"name": "_id", "type": "string"},
                {"name": "price", "type": "number"},
                {"name": "qty", "type": "int"}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_in_memory() {
        let schema = SchemaLoader::from_json_str(ORDERS).unwrap();
        assert_eq!(schema.name, "es");
        assert_eq!(schema.source_type, "elasticsearch");
        let table = schema.table("orders").unwrap();
        assert_eq!(table.field("qty").unwrap().field_type, ColumnType::Integer);
    }

    #[test]
    fn test_rejects_empty_table() {
        let result = SchemaLoader::from_json_str(
            r#"{"name": "es", "tables": [{"name": "t", "fields": []}]}"#,
        );
        assert!(matches!(result, Err(SchemaError::EmptyTable(t)) if t == "t"));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let result = SchemaLoader::from_json_str(
            r#"{"name": "es", "tables": [{"name": "t", "fields": [
                {"name": "a", "type": "string"},
                {"name": "a", "type": "integer"}
            ]}]}"#,
        );
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = SchemaLoader::from_json_str("{not json");
        assert_eq!(result.unwrap_err().code(), "AERO_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_load_all_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("es.json"), ORDERS).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        loader.load_all().unwrap();

        assert_eq!(loader.schema_count(), 1);
        assert!(loader.exists("es"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());
        let schema = SchemaLoader::from_json_str(ORDERS).unwrap();

        loader.register(schema.clone()).unwrap();
        let result = loader.register(schema);
        assert_eq!(result.unwrap_err().code(), "AERO_SCHEMA_DUPLICATE");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = SchemaLoader::load_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(SchemaError::Io { .. })));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(&temp_dir.path().join("absent"));
        loader.load_all().unwrap();
        assert_eq!(loader.schema_count(), 0);
    }
}
