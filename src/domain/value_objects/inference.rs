use serde::Deserialize;
use std::collections::BTreeMap;

/// Detected class label -> number of detections, ordered by label.
pub type ClassCounts = BTreeMap<String, u64>;

/// JSON body returned by the processing backend for an image upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageInference {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub output_image: Option<String>,
    pub image_data: String,
    pub class_counts: ClassCounts,
}
