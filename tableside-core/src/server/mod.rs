pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::error::{Result, TablesideError};
use crate::launch;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Dashboard
        .route("/dashboard", get(routes::dashboard::stats))
        // Categories
        .route("/categories", get(routes::categories::list))
        .route("/categories", post(routes::categories::create))
        .route("/categories/{id}", get(routes::categories::get))
        // Menu
        .route("/menu", get(routes::menu::list))
        .route("/menu", post(routes::menu::create))
        .route("/menu/{id}", get(routes::menu::get))
        .route("/menu/{id}", put(routes::menu::update))
        .route("/menu/{id}", delete(routes::menu::delete))
        // Tables
        .route("/tables", get(routes::tables::list))
        .route("/tables", post(routes::tables::create))
        .route("/tables/{id}", get(routes::tables::get))
        .route("/tables/{id}", put(routes::tables::update))
        .route("/tables/{id}", delete(routes::tables::delete))
        // Orders
        .route("/orders", get(routes::orders::list))
        .route("/orders", post(routes::orders::create))
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/items", post(routes::orders::add_item))
        .route("/orders/{id}/status", post(routes::orders::update_status))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "The requested path does not exist" })),
    )
}

/// Install the global tracing subscriber. Called once at process start by
/// whichever binary hosts the server.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Binds `0.0.0.0:<port>` and serves until shutdown. The port string is used
/// verbatim; a malformed value surfaces here as a bind error.
pub async fn start_server(state: Arc<AppState>, port: &str) -> Result<()> {
    let app = build_router(state);
    let addr = launch::bind_address(port);

    // Write port file for CLI discovery
    let port_file = port_file_path();
    if let Some(parent) = port_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&port_file, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TablesideError::Launch(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Tableside server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(port_file.clone()))
        .await
        .map_err(|e| TablesideError::Launch(format!("Server error: {}", e)))?;

    Ok(())
}

fn port_file_path() -> std::path::PathBuf {
    dirs::home_dir()
        .expect("Cannot determine home directory")
        .join(".tableside")
        .join("server.port")
}

async fn shutdown_signal(port_file: std::path::PathBuf) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    // Cleanup port file
    let _ = std::fs::remove_file(&port_file);
    tracing::info!("Tableside server shutting down");
}
