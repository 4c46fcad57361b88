//! HTTP transport: axum router over [`GraphService`]

use std::future::Future;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::GraphError;
use crate::router::{self, Reply, Route, HEALTH_PATH, NODES_PATH};
use crate::service::GraphService;

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

impl IntoResponse for GraphError {
    fn into_response(self) -> Response {
        Reply::error(&self).into_response()
    }
}

/// Build the application router.
///
/// Unknown paths and known paths under an unsupported method both answer 404.
/// HEAD is routed explicitly, otherwise axum would serve it with the GET handler.
/// Request bodies have no size cap.
pub fn build_router(service: GraphService) -> Router {
    Router::new()
        .route(
            NODES_PATH,
            post(create_node)
                .get(list_graph)
                .head(not_found)
                .fallback(not_found),
        )
        .route(HEALTH_PATH, get(health).head(not_found).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, service: GraphService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }

    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn create_node(State(service): State<GraphService>, body: Bytes) -> Reply {
    router::run(&service, Route::CreateNode, &body).await
}

async fn list_graph(State(service): State<GraphService>) -> Reply {
    router::run(&service, Route::ListGraph, &[]).await
}

async fn health(State(service): State<GraphService>) -> Reply {
    router::run(&service, Route::Health, &[]).await
}

async fn not_found() -> GraphError {
    GraphError::NotFound
}
