//! MySqlStore - relational backend over a sqlx MySQL pool
//!
//! Expects the schema to exist already:
//!
//! ```sql
//! CREATE TABLE nodes (id INT AUTO_INCREMENT PRIMARY KEY, title TEXT NOT NULL, content TEXT NOT NULL);
//! CREATE TABLE connections (source_id INT NOT NULL, target_id INT NOT NULL);
//! ```
//!
//! Id columns may be signed or unsigned; unsigned values above `i64::MAX`
//! are reported as storage errors.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlRow};
use sqlx::{Connection, Row};
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::model::{Edge, NewNode, Node};
use crate::storage::GraphStore;

const INSERT_NODE: &str = "INSERT INTO nodes(title, content) VALUES(?, ?)";
const SELECT_NODES: &str = "SELECT id, title, content FROM nodes";
const SELECT_EDGES: &str = "SELECT source_id, target_id FROM connections";

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open the pool and verify connectivity.
    ///
    /// A failed ping here is the caller's signal to abort startup; there is
    /// no retry.
    pub async fn connect_with(options: MySqlConnectOptions) -> Result<Self> {
        let pool = MySqlPool::connect_with(options).await?;
        let store = Self { pool };
        store.ping().await?;
        Ok(store)
    }

    /// Wrap an already-built pool. No connectivity check is made.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GraphStore for MySqlStore {
    async fn insert_node(&self, node: NewNode) -> Result<Node> {
        let done = sqlx::query(INSERT_NODE)
            .bind(&node.title)
            .bind(&node.content)
            .execute(&self.pool)
            .await?;

        let id = id_from_unsigned(done.last_insert_id())?;
        Ok(node.into_node(id))
    }

    async fn all_nodes(&self) -> Result<Vec<Node>> {
        let rows = sqlx::query(SELECT_NODES).fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "loaded nodes");

        rows.iter()
            .map(|row| -> Result<Node> {
                Ok(Node {
                    id: decode_id(row, "id")?,
                    title: row.try_get("title")?,
                    content: row.try_get("content")?,
                })
            })
            .collect()
    }

    async fn all_edges(&self) -> Result<Vec<Edge>> {
        let rows = sqlx::query(SELECT_EDGES).fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "loaded connections");

        rows.iter()
            .map(|row| -> Result<Edge> {
                Ok(Edge {
                    source_id: decode_id(row, "source_id")?,
                    target_id: decode_id(row, "target_id")?,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend(&self) -> &'static str {
        "mysql"
    }
}

/// Read an integer id column, accepting signed and unsigned column types
fn decode_id(row: &MySqlRow, column: &str) -> Result<i64> {
    match row.try_get::<i64, _>(column) {
        Ok(id) => Ok(id),
        Err(signed_err) => match row.try_get::<u64, _>(column) {
            Ok(raw) => id_from_unsigned(raw),
            Err(_) => Err(signed_err.into()),
        },
    }
}

fn id_from_unsigned(raw: u64) -> Result<i64> {
    i64::try_from(raw).map_err(|_| GraphError::Storage(format!("id {} out of range", raw)))
}
