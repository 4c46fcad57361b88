//! GraphService - transport-agnostic request handling
//!
//! Both the HTTP server and the gateway handler call into one `GraphService`.
//! It owns nothing but the shared store handle; there is no per-request state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{CombinedData, NewNode, Node};
use crate::storage::GraphStore;

/// Fixed health payload. Health never touches storage.
pub const HEALTH_BODY: &str = r#"{"status":"ok"}"#;

#[derive(Clone)]
pub struct GraphService {
    store: Arc<dyn GraphStore>,
}

impl GraphService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Parse, validate and persist one node from a raw request body
    pub async fn create_node_from_json(&self, body: &[u8]) -> Result<Node> {
        let node = NewNode::from_json(body)?;
        self.create_node(node).await
    }

    /// Validate and persist one node. Not idempotent: identical payloads
    /// produce distinct rows.
    pub async fn create_node(&self, node: NewNode) -> Result<Node> {
        node.validate()?;
        let node = self.store.insert_node(node).await?;
        info!(id = node.id, "node created");
        Ok(node)
    }

    /// Load every node and every edge. Either read failing fails the whole call.
    pub async fn list_graph(&self) -> Result<CombinedData> {
        let nodes = self.store.all_nodes().await?;
        let edges = self.store.all_edges().await?;
        debug!(nodes = nodes.len(), edges = edges.len(), "graph loaded");
        Ok(CombinedData { nodes, edges })
    }

    pub fn health(&self) -> &'static str {
        HEALTH_BODY
    }
}
