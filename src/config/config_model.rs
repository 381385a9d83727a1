use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub webapp_server: WebappServer,
    pub processing_server: ProcessingServer,
    pub storage: Storage,
}

#[derive(Debug, Clone)]
pub struct WebappServer {
    pub port: u16,
    /// Request body limit in bytes.
    pub body_limit: usize,
}

#[derive(Debug, Clone)]
pub struct ProcessingServer {
    /// Validated base URL without a trailing slash.
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Storage {
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
}
