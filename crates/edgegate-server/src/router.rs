use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        // Full tool set. GET opens the event stream stub.
        .route("/mcp", get(handlers::mcp_sse).post(handlers::mcp_request))
        .route("/mcp/call", post(handlers::mcp_request))
        // Read-only and mutating subsets
        .route("/read", post(handlers::read_request))
        .route("/write", post(handlers::write_request))
        // CORS: allow any origin (MCP clients may run in browser contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
