//! Request routing: exact (method, path) matching onto service operations

use axum::http::{Method, StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::error::{ErrorKind, GraphError, Result};
use crate::service::GraphService;

pub const NODES_PATH: &str = "/nodes";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateNode,
    ListGraph,
    Health,
}

impl Route {
    /// Resolve a method and path. Anything other than the three known
    /// pairs is `NotFound`, including a known path under another method.
    /// A query string, if present, is ignored.
    pub fn resolve(method: &Method, path: &str) -> Result<Route> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);

        match (method, path) {
            (&Method::POST, NODES_PATH) => Ok(Route::CreateNode),
            (&Method::GET, NODES_PATH) => Ok(Route::ListGraph),
            (&Method::GET, HEALTH_PATH) => Ok(Route::Health),
            _ => Err(GraphError::NotFound),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::CreateNode => "create_node",
            Route::ListGraph => "list_graph",
            Route::Health => "health",
        }
    }
}

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Transport-neutral response: status, content type and a UTF-8 body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Reply {
        match serde_json::to_string(value) {
            Ok(body) => Reply { status, content_type: JSON_CONTENT_TYPE, body },
            Err(e) => Reply::error(&GraphError::Serialization(e.to_string())),
        }
    }

    /// Error bodies are the plain error message, unredacted
    pub fn error(err: &GraphError) -> Reply {
        Reply {
            status: err.status(),
            content_type: TEXT_CONTENT_TYPE,
            body: err.to_string(),
        }
    }
}

/// Route one request and run it against the service
pub async fn dispatch(service: &GraphService, method: &Method, path: &str, body: &[u8]) -> Reply {
    match Route::resolve(method, path) {
        Ok(route) => run(service, route, body).await,
        Err(e) => Reply::error(&e),
    }
}

/// Run an already-resolved route. `body` is only read by `CreateNode`.
pub async fn run(service: &GraphService, route: Route, body: &[u8]) -> Reply {
    let result = match route {
        Route::CreateNode => service
            .create_node_from_json(body)
            .await
            .map(|node| Reply::json(StatusCode::CREATED, &node)),
        Route::ListGraph => service
            .list_graph()
            .await
            .map(|graph| Reply::json(StatusCode::OK, &graph)),
        Route::Health => Ok(Reply {
            status: StatusCode::OK,
            content_type: JSON_CONTENT_TYPE,
            body: service.health().to_string(),
        }),
    };

    result.unwrap_or_else(|e| {
        if e.kind() == ErrorKind::Internal {
            warn!(route = route.name(), code = e.code(), "request failed: {}", e);
        }
        Reply::error(&e)
    })
}
