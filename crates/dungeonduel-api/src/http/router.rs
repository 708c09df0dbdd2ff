//! Axum router configuration with middleware.
//!
//! All game routes are under `/api/`. Middleware: CORS (the browser
//! client may be served from elsewhere), request tracing.
//!
//! The static game front-end is served from `public/` (configurable via
//! `DUNGEONDUEL_WEB_DIR`). API routes take priority; if the directory
//! does not exist, only the API is served.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/nueva-partida", post(handlers::partida::nueva_partida))
        .route("/api/partidas", get(handlers::partida::listar_partidas))
        .route("/api/historial/{id}", get(handlers::partida::historial))
        .route("/api/turno", post(handlers::turno::jugar_turno))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the game front-end from disk if the directory exists.
    let web_dir =
        std::env::var("DUNGEONDUEL_WEB_DIR").unwrap_or_else(|_| "public".to_string());
    if std::path::Path::new(&web_dir).exists() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir, "static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
