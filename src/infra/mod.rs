pub mod processing_backend;
pub mod temp_upload;
