//! Parsed SELECT structures handed over by the SQL translator.

use serde::{Deserialize, Serialize};

/// One selected expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// Expression text as written, e.g. `avg(price)`
    pub expression: String,
    /// `AS` alias, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Underlying document field, e.g. `price`
    #[serde(default)]
    pub source_field: String,
    /// True for `COUNT(*)`
    #[serde(default)]
    pub count_star: bool,
}

impl SelectColumn {
    /// A bare field reference
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            expression: name.clone(),
            alias: None,
            source_field: name,
            count_star: false,
        }
    }

    /// An aggregate call over a field, e.g. `aggregate("avg", "price")`
    pub fn aggregate(function: &str, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            expression: format!("{}({})", function, field),
            alias: None,
            source_field: field,
            count_star: false,
        }
    }

    /// `COUNT(*)`
    pub fn count_star() -> Self {
        Self {
            expression: "count(*)".to_string(),
            alias: None,
            source_field: String::new(),
            count_star: true,
        }
    }

    /// Sets the `AS` alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Result key: the alias when present, otherwise the expression text.
    ///
    /// Aggregations are named by this key in the backend response.
    pub fn key(&self) -> &str {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.expression,
        }
    }
}

/// A parsed SELECT statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// `SELECT *`
    #[serde(default)]
    pub star: bool,
    /// Selected expressions in statement order
    #[serde(default)]
    pub columns: Vec<SelectColumn>,
    /// GROUP BY expressions in statement order
    #[serde(default)]
    pub group_by: Vec<String>,
}

impl SelectStatement {
    /// `SELECT *`
    pub fn star() -> Self {
        Self {
            star: true,
            ..Default::default()
        }
    }

    /// An explicit column list
    pub fn columns(columns: Vec<SelectColumn>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Adds GROUP BY expressions
    pub fn with_group_by(mut self, group_by: Vec<String>) -> Self {
        self.group_by = group_by;
        self
    }

    /// True when the statement is exactly `SELECT COUNT(*)`
    pub fn is_count_star(&self) -> bool {
        self.columns.len() == 1 && self.columns[0].count_star
    }
}
