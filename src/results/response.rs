//! Raw backend response handed over after query dispatch.

use serde::Deserialize;
use serde_json::Value;

use crate::document::DocumentTree;

use super::errors::{ResultError, ResultResult};

/// Hits, aggregations and hit count of one backend query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    /// Hits in backend order
    pub documents: Vec<DocumentTree>,
    /// Aggregation tree keyed by aggregation name
    pub aggregations: DocumentTree,
    /// Total matching hits
    pub total: u64,
    /// Scroll cursor for paging, if the backend returned one
    pub scroll_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "_scroll_id", default)]
    scroll_id: Option<String>,
    #[serde(default)]
    hits: Option<SearchHits>,
    #[serde(default)]
    aggregations: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    total: Option<HitTotal>,
    #[serde(default)]
    hits: Vec<Value>,
}

/// Older backends report a bare number, newer ones `{"value": n, "relation": ".."}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitTotal {
    Count(u64),
    Object { value: u64 },
}

impl RawResponse {
    /// Plain hits
    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            total: documents.len() as u64,
            documents: documents.into_iter().map(DocumentTree::new).collect(),
            ..Default::default()
        }
    }

    /// An aggregation tree
    pub fn with_aggregations(aggregations: Value) -> Self {
        Self {
            aggregations: DocumentTree::new(aggregations),
            ..Default::default()
        }
    }

    /// Overrides the total hit count
    pub fn total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    /// Decodes a search response body
    pub fn from_search_json(body: &str) -> ResultResult<Self> {
        let parsed: SearchBody = serde_json::from_str(body)
            .map_err(|e| ResultError::invalid_response(format!("Invalid search response: {}", e)))?;
        Ok(Self::from_body(parsed))
    }

    /// Decodes an already-parsed search response
    pub fn from_search_value(body: Value) -> ResultResult<Self> {
        let parsed: SearchBody = serde_json::from_value(body)
            .map_err(|e| ResultError::invalid_response(format!("Invalid search response: {}", e)))?;
        Ok(Self::from_body(parsed))
    }

    fn from_body(body: SearchBody) -> Self {
        let (total, hits) = match body.hits {
            Some(hits) => {
                let total = match hits.total {
                    Some(HitTotal::Count(n)) | Some(HitTotal::Object { value: n }) => n,
                    None => hits.hits.len() as u64,
                };
                (total, hits.hits)
            }
            None => (0, Vec::new()),
        };

        Self {
            documents: hits.into_iter().map(DocumentTree::new).collect(),
            aggregations: body
                .aggregations
                .map(DocumentTree::new)
                .unwrap_or_default(),
            total,
            scroll_id: body.scroll_id,
        }
    }

    /// Returns true if the aggregation tree has entries
    pub fn has_aggregations(&self) -> bool {
        !self.aggregations.is_empty()
    }
}
