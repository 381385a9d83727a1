use anyhow::Result;
use inference_webapp::{
    axum_http::http_serve, config::config_loader, infra::processing_backend::HttpProcessingBackend,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Webapp exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    inference_webapp::observability::init_observability("webapp")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let backend = HttpProcessingBackend::new(&dotenvy_env.processing_server)?;
    info!(
        base_url = %dotenvy_env.processing_server.base_url,
        "Processing backend client has been configured"
    );

    http_serve::start(Arc::new(dotenvy_env), Arc::new(backend)).await?;

    Ok(())
}
