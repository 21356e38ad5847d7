//! HTTP API exposing the round-up to an external scheduler or caller.

mod handlers;

use crate::application::orchestrator::RoundUpOrchestrator;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RoundUpOrchestrator>,
}

pub fn router(orchestrator: Arc<RoundUpOrchestrator>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/roundup",
            get(handlers::round_up).post(handlers::round_up),
        )
        .route("/api/accounts", get(handlers::accounts))
        .with_state(AppState { orchestrator })
}

pub async fn serve(orchestrator: Arc<RoundUpOrchestrator>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(orchestrator)).await
}
