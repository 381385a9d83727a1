use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::{
    inference::{ClassCounts, ImageInference},
    media::MediaKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    pub output_image: Option<String>,
    /// Base64 encoded annotated JPEG.
    pub image_data: String,
}

/// View model handed to the render layer after every request.
///
/// At most one of `image_result` / `video_result` is set, and only when the
/// backend call succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    pub message: Option<String>,
    pub image_result: Option<ImageResult>,
    pub video_result: Option<String>,
    pub class_counts: Option<ClassCounts>,
}

impl UploadResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn image_processed(inference: ImageInference) -> Self {
        Self {
            message: Some(MediaKind::Image.success_message().to_string()),
            image_result: Some(ImageResult {
                output_image: inference.output_image,
                image_data: inference.image_data,
            }),
            video_result: None,
            class_counts: Some(inference.class_counts),
        }
    }

    pub fn video_processed(video: &[u8]) -> Self {
        Self {
            message: Some(MediaKind::Video.success_message().to_string()),
            image_result: None,
            video_result: Some(video_data_uri(video)),
            class_counts: None,
        }
    }

    pub fn failed(kind: MediaKind) -> Self {
        Self {
            message: Some(kind.failure_message().to_string()),
            ..Self::default()
        }
    }
}

pub fn video_data_uri(video: &[u8]) -> String {
    format!("data:video/mp4;base64,{}", STANDARD.encode(video))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inference() -> ImageInference {
        ImageInference {
            message: Some("Image processed".to_string()),
            output_image: Some("frame_annotated.jpg".to_string()),
            image_data: "aGVsbG8=".to_string(),
            class_counts: ClassCounts::from([("person".to_string(), 2)]),
        }
    }

    #[test]
    fn image_result_carries_counts_and_no_video() {
        let result = UploadResult::image_processed(sample_inference());

        assert_eq!(result.message.as_deref(), Some("Image processed successfully!"));
        assert!(result.image_result.is_some());
        assert!(result.class_counts.is_some());
        assert!(result.video_result.is_none());
    }

    #[test]
    fn video_result_is_a_data_uri() {
        let result = UploadResult::video_processed(&[0xAA, 0xBB, 0xCC]);

        assert_eq!(result.video_result.as_deref(), Some("data:video/mp4;base64,qrvM"));
        assert!(result.image_result.is_none());
        assert!(result.class_counts.is_none());
    }

    #[test]
    fn failure_has_message_only() {
        let result = UploadResult::failed(MediaKind::Video);

        assert_eq!(result.message.as_deref(), Some("Failed to process video."));
        assert_eq!(
            result,
            UploadResult {
                message: Some("Failed to process video.".to_string()),
                ..UploadResult::empty()
            }
        );
    }
}
