use futures_util::Stream;
use std::{error::Error as StdError, io, sync::Arc};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    domain::{
        repositories::processing_backend::{ProcessingBackend, ProcessingError},
        value_objects::{
            inference::ImageInference, media::MediaKind, upload_result::UploadResult,
        },
    },
    infra::temp_upload::{PersistError, TempUpload, TempUploadStore},
};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("temporary upload storage failed: {0}")]
    TempStorage(#[from] io::Error),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Receives an upload onto disk, forwards it to the processing backend and
/// maps the outcome to the page model. Processing never fails: errors become
/// the failure page.
pub struct UploadUseCase<B>
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    backend: Arc<B>,
    temp_store: TempUploadStore,
}

impl<B> UploadUseCase<B>
where
    B: ProcessingBackend + Send + Sync + 'static,
{
    pub fn new(backend: Arc<B>, temp_store: TempUploadStore) -> Self {
        Self {
            backend,
            temp_store,
        }
    }

    /// Streams the upload body into a temp file.
    pub async fn receive<S, C, E>(
        &self,
        kind: MediaKind,
        chunks: S,
    ) -> Result<TempUpload, PersistError>
    where
        S: Stream<Item = Result<C, E>>,
        C: AsRef<[u8]>,
        E: StdError + Send + Sync + 'static,
    {
        let temp = self.temp_store.persist(kind, chunks).await?;
        info!(size = temp.size(), %kind, "uploads: upload received");

        Ok(temp)
    }

    pub async fn process_image(&self, temp: TempUpload) -> UploadResult {
        info!(size = temp.size(), "uploads: processing image");

        match self.try_process_image(temp).await {
            Ok(result) => {
                info!(
                    classes = result.class_counts.as_ref().map_or(0, |c| c.len()),
                    "uploads: image processed"
                );
                result
            }
            Err(err) => {
                error!(error = %err, kind = %MediaKind::Image, "uploads: failed to process image");
                UploadResult::failed(MediaKind::Image)
            }
        }
    }

    pub async fn process_video(&self, temp: TempUpload) -> UploadResult {
        info!(size = temp.size(), "uploads: processing video");

        match self.try_process_video(temp).await {
            Ok(result) => {
                info!("uploads: video processed");
                result
            }
            Err(err) => {
                error!(error = %err, kind = %MediaKind::Video, "uploads: failed to process video");
                UploadResult::failed(MediaKind::Video)
            }
        }
    }

    async fn try_process_image(&self, temp: TempUpload) -> Result<UploadResult, UploadError> {
        let outcome = self.forward_image(&temp).await;
        temp.discard();

        Ok(UploadResult::image_processed(outcome?))
    }

    async fn try_process_video(&self, temp: TempUpload) -> Result<UploadResult, UploadError> {
        let outcome = self.forward_video(&temp).await;
        temp.discard();

        Ok(UploadResult::video_processed(&outcome?))
    }

    async fn forward_image(&self, temp: &TempUpload) -> Result<ImageInference, UploadError> {
        let bytes = temp.read().await?;
        Ok(self.backend.process_image(bytes).await?)
    }

    async fn forward_video(&self, temp: &TempUpload) -> Result<Vec<u8>, UploadError> {
        let bytes = temp.read().await?;
        Ok(self.backend.process_video(bytes).await?)
    }
}
