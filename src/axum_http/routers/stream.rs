use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tracing::info;

use crate::domain::repositories::processing_backend::ProcessingBackend;

pub fn routes<B>(backend: Arc<B>) -> Router
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(redirect_to_stream::<B>))
        .with_state(backend)
}

/// The browser pulls the MJPEG stream straight from the backend.
pub async fn redirect_to_stream<B>(State(backend): State<Arc<B>>) -> impl IntoResponse
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let location = backend.stream_url();
    info!(%location, "stream: redirecting to processing backend");

    (StatusCode::FOUND, [(LOCATION, location)])
}
