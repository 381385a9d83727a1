use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::value_objects::inference::ImageInference;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("processing backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("processing backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("processing backend returned a malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// External service that runs inference on uploaded media.
#[automock]
#[async_trait]
pub trait ProcessingBackend {
    async fn process_image(&self, image: Vec<u8>) -> Result<ImageInference, ProcessingError>;
    /// Returns the annotated MP4 exactly as the backend sent it.
    async fn process_video(&self, video: Vec<u8>) -> Result<Vec<u8>, ProcessingError>;
    fn stream_url(&self) -> String;
}
