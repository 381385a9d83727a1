use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

use super::config_model::{DotEnvyConfig, ProcessingServer, Storage, WebappServer};

pub const DEFAULT_SERVER_URL: &str = "http://python-server:8000";
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT_MB: u64 = 256;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

pub(crate) fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let webapp_server = WebappServer {
        port: var("SERVER_PORT")
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("SERVER_PORT is invalid")?
            .unwrap_or(DEFAULT_PORT),
        body_limit: body_limit_bytes(
            var("SERVER_BODY_LIMIT")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SERVER_BODY_LIMIT is invalid")?
                .unwrap_or(DEFAULT_BODY_LIMIT_MB),
        )?,
    };

    let processing_server = ProcessingServer {
        base_url: normalize_base_url(
            &var("SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
        )?,
    };

    let storage = Storage {
        upload_dir: var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads")),
        public_dir: var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public")),
    };

    Ok(DotEnvyConfig {
        webapp_server,
        processing_server,
        storage,
    })
}

fn body_limit_bytes(megabytes: u64) -> Result<usize> {
    let bytes = megabytes
        .checked_mul(1024 * 1024)
        .context("SERVER_BODY_LIMIT is too large")?;

    usize::try_from(bytes).context("SERVER_BODY_LIMIT is too large")
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).context("SERVER_URL is invalid")?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("SERVER_URL must use http or https (got {})", url.scheme());
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
