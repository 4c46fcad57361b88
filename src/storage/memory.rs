//! MemoryStore - in-process node and connection tables
//!
//! Ephemeral: contents live as long as the process. Ids start at 1 and
//! increase monotonically, like an AUTO_INCREMENT column.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{GraphError, Result};
use crate::model::{Edge, NewNode, Node};
use crate::storage::GraphStore;

#[derive(Default)]
struct Tables {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the connection table. There is no API path that creates edges;
    /// this stands in for rows written by something outside the service.
    pub fn with_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let store = Self::new();
        store.write_tables().edges.extend(edges);
        store
    }

    pub fn node_count(&self) -> usize {
        self.read_tables().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.read_tables().edges.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(GraphError::StoreClosed);
        }
        Ok(())
    }

    // A poisoned lock still holds consistent rows: every write is a single push.
    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn insert_node(&self, node: NewNode) -> Result<Node> {
        self.check_open()?;
        let mut tables = self.write_tables();
        tables.next_id += 1;
        let node = node.into_node(tables.next_id);
        tables.nodes.push(node.clone());
        Ok(node)
    }

    async fn all_nodes(&self) -> Result<Vec<Node>> {
        self.check_open()?;
        Ok(self.read_tables().nodes.clone())
    }

    async fn all_edges(&self) -> Result<Vec<Edge>> {
        self.check_open()?;
        Ok(self.read_tables().edges.clone())
    }

    async fn ping(&self) -> Result<()> {
        self.check_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
