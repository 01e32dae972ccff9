//! Cell values and row messages

use std::fmt;

use serde_json::Value;

/// A single materialized value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or unset; a legitimate SQL NULL
    Null,
    /// UTF-8 text (string and time columns, bucket keys)
    Text(String),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Number(f64),
    /// Boolean
    Bool(bool),
    /// JSON-encoded structured value
    Blob(Vec<u8>),
}

impl CellValue {
    /// Converts an aggregation scalar.
    ///
    /// Whole numbers become `Integer`, other numbers `Number`. Objects and
    /// arrays are re-encoded as JSON bytes.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => match serde_json::to_vec(value) {
                Ok(bytes) => CellValue::Blob(bytes),
                Err(_) => CellValue::Null,
            },
        }
    }

    /// Renders the cell for JSON output; blobs are emitted as their JSON text
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Integer(i) => Value::from(*i),
            CellValue::Number(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Blob(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Blob(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

/// One row, positionally aligned to the projection
pub type Row = Vec<CellValue>;

/// A row handed out by the pull-stream iterator
#[derive(Debug, Clone, PartialEq)]
pub struct ValsMessage {
    /// Row values
    pub values: Row,
    /// Sequence number, equal to the cursor after the pull (starts at 1)
    pub id: u64,
}

impl ValsMessage {
    pub fn new(values: Row, id: u64) -> Self {
        Self { values, id }
    }

    /// Returns the sequence number
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the row values
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(42)), CellValue::Integer(42));
        assert_eq!(CellValue::from_json(&json!(19.5)), CellValue::Number(19.5));
        assert_eq!(CellValue::from_json(&json!("x")), CellValue::Text("x".into()));
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_from_json_structured() {
        let cell = CellValue::from_json(&json!({"a": 1}));
        assert_eq!(cell, CellValue::Blob(br#"{"a":1}"#.to_vec()));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(CellValue::Integer(3).to_json(), json!(3));
        assert_eq!(CellValue::Number(1.5).to_json(), json!(1.5));
        assert_eq!(CellValue::Null.to_json(), json!(null));
        assert_eq!(CellValue::Number(f64::NAN).to_json(), json!(null));
        assert_eq!(CellValue::Blob(b"[1,2]".to_vec()).to_json(), json!("[1,2]"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::from("a").to_string(), "a");
        assert_eq!(CellValue::from(7i64).to_string(), "7");
    }

    #[test]
    fn test_message_accessors() {
        let msg = ValsMessage::new(vec![CellValue::Integer(1)], 4);
        assert_eq!(msg.id(), 4);
        assert_eq!(msg.values(), &[CellValue::Integer(1)]);
    }
}
