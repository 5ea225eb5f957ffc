use axum::Router;
use axum::routing::{get, post};

use crate::config::AppConfig;
use crate::handlers;

/// Build the application router. Separated from [`run`] so tests can
/// drive it with `tower::ServiceExt::oneshot`.
pub fn build_app() -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/api/convert", post(handlers::convert))
        .route("/api/export/csv", post(handlers::export_csv))
}

/// Bind and serve until shutdown.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "fhirbridge server listening");
    axum::serve(listener, build_app()).await?;
    Ok(())
}
