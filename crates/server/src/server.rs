//! Server initialization and routing
//!
//! This module handles the Axum server setup:
//! - Router configuration with the page, API and health endpoints
//! - Middleware stack (timeout, compression, CORS, body limit, logging)
//! - Startup (logging, metrics, model load) and graceful shutdown

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::{log_requests, request_id};
use crate::routes::{health, not_found, page, predict};
use crate::state::ServerState;
use crate::telemetry;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware runs outermost first: trace, request id, request logging,
/// CORS, compression, timeout, body limit.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(page::show_form).post(page::submit_form))
        .route("/predict", post(predict::predict))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(state.config.timeout())),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn errors raised by the tower middleware into the usual JSON error body.
async fn handle_middleware_error(err: BoxError) -> ServerError {
    if err.is::<Elapsed>() {
        ServerError::Timeout
    } else {
        ServerError::Internal(err.to_string())
    }
}

/// Start the emotext HTTP server
///
/// Initializes logging and metrics, loads the emotion model, then serves until
/// SIGTERM or Ctrl+C. A model that fails to load aborts startup before the
/// listener is bound.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    health::mark_started();
    telemetry::init_tracing(&config)?;

    if config.debug {
        tracing::debug!(config = ?config, "Effective configuration");
    }

    let metrics = if config.metrics_enabled {
        Some(telemetry::install_recorder()?)
    } else {
        None
    };

    let state = ServerState::new(config.clone(), metrics).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load emotion model");
        anyhow::anyhow!(e)
    })?;
    tracing::info!(
        model = state.model.name(),
        labels = state.model.labels().len(),
        "Emotion model ready"
    );

    let app = build_router(Arc::new(state));

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting emotext server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    tracing::info!(
        "CORS: {}, Metrics: {}",
        config.enable_cors,
        config.metrics_enabled
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("failed to bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapsed_maps_to_timeout() {
        let err = handle_middleware_error(Box::new(Elapsed::new())).await;
        assert!(matches!(err, ServerError::Timeout));
    }

    #[tokio::test]
    async fn other_middleware_errors_are_internal() {
        let err = handle_middleware_error("layer broke".into()).await;
        assert!(matches!(err, ServerError::Internal(ref msg) if msg == "layer broke"));
    }
}
