//! nodegraph - node/edge persistence API
//!
//! Clients create nodes (title + content) and read back every node together
//! with the directed edges stored in the `connections` table.
//!
//! Layout:
//! - `service`  - transport-agnostic create/list/health logic
//! - `router`   - exact (method, path) routing and response marshaling
//! - `http`     - axum server adapter
//! - `gateway`  - API-gateway proxy event adapter
//! - `storage`  - `GraphStore` trait with MySQL and in-memory backends

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod model;
pub mod router;
pub mod service;
pub mod storage;

pub use config::DbConfig;
pub use error::{ErrorKind, GraphError, Result};
pub use model::{CombinedData, Edge, NewNode, Node};
pub use service::GraphService;
pub use storage::{GraphStore, MemoryStore, MySqlStore};
