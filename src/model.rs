//! Wire and storage records: nodes, edges and the combined graph payload

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Persisted node. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Create-node payload.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// parser, rejects them. Unknown fields (a client-sent `id` included) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewNode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NewNode {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Parse a request body. Malformed JSON is a client error.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Both fields must be non-empty. No trimming or length caps.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(GraphError::EmptyField);
        }
        Ok(())
    }

    pub fn into_node(self, id: i64) -> Node {
        Node {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Directed reference between two node ids. Endpoints are not checked
/// against the node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: i64,
    pub target_id: i64,
}

/// Response for a full graph read. Row order is whatever the store returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
