use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base of every endpoint, without trailing slash.
    pub base_url: String,
    /// Base for `image_path` values, e.g. `http://host/storage`.
    pub storage_url: String,
    pub timeout: Duration,
    /// SQLite file keeping the session token between launches.
    pub token_db: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = option_env!("MOTORPARTS_API_URL")
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let storage_url = storage_url_for(&base_url);

        ApiConfig {
            base_url,
            storage_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_db: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiConfig {
            storage_url: storage_url_for(&base_url),
            base_url,
            ..ApiConfig::default()
        }
    }

    /// Build-time defaults overlaid with `.env` and process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup("MOTORPARTS_API_URL") {
            Some(url) if !url.trim().is_empty() => ApiConfig::new(url.trim()),
            _ => ApiConfig::default(),
        };

        if let Some(storage) = lookup("MOTORPARTS_STORAGE_URL") {
            config.storage_url = storage.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("MOTORPARTS_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring MOTORPARTS_HTTP_TIMEOUT_SECS={:?}, using {}s",
                    raw,
                    config.timeout.as_secs()
                ),
            }
        }

        if let Some(path) = lookup("MOTORPARTS_TOKEN_DB") {
            config.token_db = Some(PathBuf::from(path));
        }

        config
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of an uploaded part image.
    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}/{}", self.storage_url, image_path.trim_start_matches('/'))
    }
}

// `http://host:8000/api` serves images from `http://host:8000/storage`.
fn storage_url_for(base_url: &str) -> String {
    let origin = base_url.strip_suffix("/api").unwrap_or(base_url);
    format!("{}/storage", origin)
}
