use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::leaderboard::{self, LeaderboardState};
use crate::db::ScoreStore;

/// Build the score service router. Kept separate from serving so tests can
/// drive it directly.
pub fn router(store: Arc<dyn ScoreStore>) -> Router {
    let state = LeaderboardState { store };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/scores",
            get(leaderboard::get_leaderboard).post(leaderboard::submit_score),
        )
        .layer(cors)
        .with_state(state)
}

/// Run the score service until ctrl-c.
pub async fn run_http_server(addr: &str, store: Arc<dyn ScoreStore>) -> Result<()> {
    let app = router(store);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Score service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Score service received shutdown signal");
        })
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))
}

/// Health check handler
async fn health_check() -> &'static str {
    "OK"
}
