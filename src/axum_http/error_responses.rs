use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::{
    domain::value_objects::{media::MediaKind, upload_result::UploadResult},
    render,
};

/// Client errors caught before anything reaches the processing backend.
#[derive(Debug, Error)]
pub enum UploadRejection {
    #[error("missing multipart field `{kind}`")]
    MissingField { kind: MediaKind },

    #[error("invalid multipart body for {kind} upload: {message}")]
    InvalidMultipart { kind: MediaKind, message: String },
}

impl UploadRejection {
    pub fn kind(&self) -> MediaKind {
        match self {
            UploadRejection::MissingField { kind } => *kind,
            UploadRejection::InvalidMultipart { kind, .. } => *kind,
        }
    }
}

impl IntoResponse for UploadRejection {
    fn into_response(self) -> Response {
        warn!(error = %self, kind = %self.kind(), "uploads: rejected upload request");

        let page = render::render_index(&UploadResult::failed(self.kind()));
        (StatusCode::BAD_REQUEST, Html(page)).into_response()
    }
}
