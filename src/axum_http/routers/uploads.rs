use axum::{
    Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::{Html, IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;
use tracing::error;

use crate::{
    axum_http::error_responses::UploadRejection,
    domain::{
        repositories::processing_backend::ProcessingBackend,
        value_objects::{media::MediaKind, upload_result::UploadResult},
    },
    infra::temp_upload::{PersistError, TempUpload},
    render,
    usecases::uploads::UploadUseCase,
};

pub fn routes<B>(usecase: Arc<UploadUseCase<B>>) -> Router
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/image", post(upload_image::<B>))
        .route("/video", post(upload_video::<B>))
        .with_state(usecase)
}

pub async fn upload_image<B>(
    State(usecase): State<Arc<UploadUseCase<B>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let temp = match receive_upload(&usecase, MediaKind::Image, multipart).await {
        Ok(temp) => temp,
        Err(response) => return response,
    };

    let result = usecase.process_image(temp).await;
    Html(render::render_index(&result)).into_response()
}

pub async fn upload_video<B>(
    State(usecase): State<Arc<UploadUseCase<B>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let temp = match receive_upload(&usecase, MediaKind::Video, multipart).await {
        Ok(temp) => temp,
        Err(response) => return response,
    };

    let result = usecase.process_video(temp).await;
    Html(render::render_index(&result)).into_response()
}

/// Streams the first field named after `kind` to disk; other fields are
/// skipped. A broken body is a client error, a local disk failure renders
/// the failure page.
async fn receive_upload<B>(
    usecase: &UploadUseCase<B>,
    kind: MediaKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<TempUpload, Response>
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    let mut multipart = multipart.map_err(|err| {
        UploadRejection::InvalidMultipart {
            kind,
            message: err.body_text(),
        }
        .into_response()
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(UploadRejection::MissingField { kind }.into_response()),
            Err(err) => {
                return Err(UploadRejection::InvalidMultipart {
                    kind,
                    message: err.body_text(),
                }
                .into_response());
            }
        };

        if field.name() != Some(kind.field_name()) {
            continue;
        }

        return match usecase.receive(kind, field).await {
            Ok(temp) => Ok(temp),
            Err(PersistError::Body(err)) => Err(UploadRejection::InvalidMultipart {
                kind,
                message: err.to_string(),
            }
            .into_response()),
            Err(err @ PersistError::Io(_)) => {
                error!(error = %err, %kind, "uploads: failed to store upload");
                Err(Html(render::render_index(&UploadResult::failed(kind))).into_response())
            }
        };
    }
}
