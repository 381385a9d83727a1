use std::fmt;

/// The two kinds of upload the webapp forwards to the processing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Name of the multipart form field carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
        }
    }

    /// Path on the processing backend that accepts this kind of upload.
    pub fn backend_path(&self) -> &'static str {
        match self {
            MediaKind::Image => "/upload/image",
            MediaKind::Video => "/upload/video",
        }
    }

    pub fn file_suffix(&self) -> &'static str {
        match self {
            MediaKind::Image => ".jpg",
            MediaKind::Video => ".mp4",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image processed successfully!",
            MediaKind::Video => "Video processed successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            MediaKind::Image => "Failed to process image.",
            MediaKind::Video => "Failed to process video.",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
