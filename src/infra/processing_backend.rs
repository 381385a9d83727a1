use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, warn};

use crate::{
    config::config_model::ProcessingServer,
    domain::{
        repositories::processing_backend::{ProcessingBackend, ProcessingError},
        value_objects::{inference::ImageInference, media::MediaKind},
    },
};

const ERROR_BODY_PREVIEW: usize = 512;

/// Talks to the inference server over plain HTTP.
///
/// No request timeout is set: a video upload keeps the connection open until
/// the backend has annotated every frame.
pub struct HttpProcessingBackend {
    client: Client,
    base_url: String,
}

impl HttpProcessingBackend {
    pub fn new(config: &ProcessingServer) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build processing backend http client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_media(
        &self,
        kind: MediaKind,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ProcessingError> {
        let url = self.endpoint(kind.backend_path());
        debug!(%url, %kind, size = body.len(), "processing backend: forwarding upload");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, kind.content_type())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview = body.trim().chars().take(ERROR_BODY_PREVIEW).collect::<String>();
            warn!(%url, status = status.as_u16(), "processing backend: non-success status");
            return Err(ProcessingError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        let bytes = response.bytes().await?;
        debug!(%url, %kind, size = bytes.len(), "processing backend: response received");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ProcessingBackend for HttpProcessingBackend {
    async fn process_image(&self, image: Vec<u8>) -> Result<ImageInference, ProcessingError> {
        let body = self.post_media(MediaKind::Image, image).await?;
        let inference: ImageInference = serde_json::from_slice(&body)?;

        if let Some(message) = inference.message.as_deref() {
            debug!(backend_message = message, "processing backend: image inference decoded");
        }

        Ok(inference)
    }

    async fn process_video(&self, video: Vec<u8>) -> Result<Vec<u8>, ProcessingError> {
        self.post_media(MediaKind::Video, video).await
    }

    fn stream_url(&self) -> String {
        self.endpoint("/stream")
    }
}
