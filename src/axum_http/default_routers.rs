use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use tracing::info;

/// Fallback for paths that match neither a route nor a file under the
/// public directory.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    info!(path = %uri.path(), "webapp: nothing to serve");
    (StatusCode::NOT_FOUND, "NOT_FOUND")
}

pub async fn health_check() -> impl IntoResponse {
    info!("webapp: health check ok");
    (StatusCode::OK, "OK")
}
