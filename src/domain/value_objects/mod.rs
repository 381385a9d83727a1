pub mod inference;
pub mod media;
pub mod upload_result;
