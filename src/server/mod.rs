//! HTTP front end: a landing page and the detector endpoint.

pub mod handlers;

use std::future::Future;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::classifier::EmotionDetector;
use crate::config::ServerConfig;
use crate::consts::MAX_BODY_BYTES;

pub(crate) const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub detector: EmotionDetector,
}

pub fn router(detector: EmotionDetector) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/emotionDetector",
            get(handlers::analyze_query).post(handlers::analyze_body),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { detector })
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, detector: EmotionDetector) -> Result<()> {
    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(%addr, endpoint = %config.detector.endpoint, "emotion detector listening");

    axum::serve(listener, router(detector))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
        .context("server error")?;
    Ok(())
}

/// Resolves when `signal` fires. If the signal handler cannot be installed
/// the error is logged and this never resolves.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
