use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
    domain::repositories::processing_backend::ProcessingBackend,
    infra::temp_upload::TempUploadStore,
    usecases::uploads::UploadUseCase,
};
use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit, handler::HandlerWithoutStateExt, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

pub fn build_router<B>(config: &DotEnvyConfig, backend: Arc<B>) -> Result<Router>
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let temp_store = TempUploadStore::new(&config.storage.upload_dir)?;
    let upload_usecase = Arc::new(UploadUseCase::new(Arc::clone(&backend), temp_store));

    let static_files = ServeDir::new(&config.storage.public_dir)
        .not_found_service(default_routers::not_found.into_service());

    let app = Router::new()
        .merge(routers::home::routes())
        .nest("/stream", routers::stream::routes(backend))
        .nest("/upload", routers::uploads::routes(upload_usecase))
        .route("/health-check", get(default_routers::health_check))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(config.webapp_server.body_limit))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub async fn start<B>(config: Arc<DotEnvyConfig>, backend: Arc<B>) -> Result<()>
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let app = build_router(&config, backend)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.webapp_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Frontend running at http://localhost:{}", config.webapp_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A signal that cannot be installed is
/// logged and never fires.
async fn shutdown_signal() {
    tokio::select! {
        _ = interrupt() => info!("shutdown: interrupt received, draining connections"),
        _ = terminate() => info!("shutdown: SIGTERM received, draining connections"),
    }
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "shutdown: cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            warn!(error = %err, "shutdown: cannot listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await
}
