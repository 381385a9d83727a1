pub mod processing_backend;
