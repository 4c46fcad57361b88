//! Storage adapters for nodes and connections
//!
//! - `MySqlStore` talks to the relational `nodes` / `connections` tables
//! - `MemoryStore` keeps both tables in process (ephemeral, never persisted)
//!
//! Both sit behind [`GraphStore`] so request handlers only ever see an
//! `Arc<dyn GraphStore>` constructed once at startup.

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Edge, NewNode, Node};

/// Shared storage handle
///
/// Send + Sync required: one handle serves every concurrent request.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Insert one node and return it with the store-assigned id
    async fn insert_node(&self, node: NewNode) -> Result<Node>;

    /// All rows of the node table, in store order
    async fn all_nodes(&self) -> Result<Vec<Node>>;

    /// All rows of the connection table, in store order
    async fn all_edges(&self) -> Result<Vec<Edge>>;

    /// Connectivity check
    async fn ping(&self) -> Result<()>;

    /// Release the handle. Further calls fail.
    async fn close(&self);

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}
