//! Typed accessors over schema-less JSON trees
//!
//! Paths are split on `/` when the path contains one, otherwise on `.`:
//! `"avg_price/value"`, `"_source.price"`. At every level the longest
//! literal key wins, so a flattened key like `"address.city"` is found
//! before descending into `"address"`. Numeric segments index arrays.
//!
//! The `*_in` accessors take pre-split segments instead. Each segment is
//! resolved on its own with `.` as the only separator, so a field name
//! containing `/` is never split.

use serde_json::Value;

/// A document store hit or aggregation payload
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    root: Value,
}

impl DocumentTree {
    /// Wraps a JSON value
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// An empty tree (JSON null)
    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    /// Returns the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consumes the tree, returning the JSON value
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Returns true for null, `{}` and `[]`
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        match &self.root {
            Value::Null => 0,
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }

    /// Raw value at path
    pub fn get_raw(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        let sep = if path.contains('/') { "/" } else { "." };
        let segments: Vec<&str> = path.split(sep).collect();
        lookup(&self.root, &segments, sep)
    }

    /// Raw value under `segments`, resolving each segment separately
    pub fn get_in(&self, segments: &[&str]) -> Option<&Value> {
        let mut current = &self.root;
        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            let parts: Vec<&str> = segment.split('.').collect();
            current = lookup(current, &parts, ".")?;
        }
        Some(current)
    }

    /// Value at path rendered as text.
    ///
    /// Numbers and booleans are formatted; objects, arrays and null are `None`.
    pub fn get_string(&self, path: &str) -> Option<String> {
        as_string(self.get_raw(path)?)
    }

    /// Value at path as a 64-bit integer.
    ///
    /// Floats truncate toward zero; numeric strings are parsed.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        as_i64(self.get_raw(path)?)
    }

    /// Value at path as a 64-bit float; numeric strings are parsed
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        as_f64(self.get_raw(path)?)
    }

    /// `get_string` over segments
    pub fn string_in(&self, segments: &[&str]) -> Option<String> {
        as_string(self.get_in(segments)?)
    }

    /// `get_i64` over segments
    pub fn i64_in(&self, segments: &[&str]) -> Option<i64> {
        as_i64(self.get_in(segments)?)
    }

    /// `get_f64` over segments
    pub fn f64_in(&self, segments: &[&str]) -> Option<f64> {
        as_f64(self.get_in(segments)?)
    }

    /// Array at path as a list of sub-trees; anything else yields an empty list
    pub fn helpers(&self, path: &str) -> Vec<DocumentTree> {
        match self.get_raw(path) {
            Some(Value::Array(items)) => items.iter().cloned().map(DocumentTree::new).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for DocumentTree {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::empty()
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lookup<'a>(value: &'a Value, segments: &[&str], sep: &str) -> Option<&'a Value> {
    if segments.is_empty() {
        return Some(value);
    }
    match value {
        Value::Object(map) => {
            for take in (1..=segments.len()).rev() {
                let key = segments[..take].join(sep);
                if let Some(child) = map.get(&key) {
                    if let Some(found) = lookup(child, &segments[take..], sep) {
                        return Some(found);
                    }
                }
            }
            None
        }
        Value::Array(items) => {
            let index: usize = segments[0].parse().ok()?;
            lookup(items.get(index)?, &segments[1..], sep)
        }
        _ => None,
    }
}
