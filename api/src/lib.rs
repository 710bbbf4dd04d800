//! HTTP surface: one `POST /ask` operation over the loaded collection.

use std::env;
use std::sync::Arc;

use axum::{Router, routing::post};
use tokio::signal;
use tracing::info;

mod error_handler;
mod middleware_layer;
mod routes;

pub mod core;

pub use crate::core::app_state::AppState;
pub use error_handler::AppError;

use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::ask::ask_route::ask_question;

/// Start serving with the given shared state.
///
/// Binds to `API_ADDRESS` (default `0.0.0.0:8080`) and shuts down
/// gracefully on Ctrl+C.
///
/// # Errors
/// [`AppError::Bind`] if the listener cannot be bound, [`AppError::Server`]
/// if the server loop fails.
pub async fn start(state: AppState) -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = Router::new()
        .route("/ask", post(ask_question))
        .layer(axum::middleware::from_fn(json_error_mapper))
        .with_state(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(target: "api", addr = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
