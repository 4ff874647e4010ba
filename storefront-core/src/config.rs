//! Client configuration
//!
//! There is no compiled-in backend address: the base URL must come from the
//! environment (`STOREFRONT_BASE_URL`) or an explicit override.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const BASE_URL_VAR: &str = "STOREFRONT_BASE_URL";
pub const TOKEN_FILE_VAR: &str = "STOREFRONT_TOKEN_FILE";
pub const TIMEOUT_VAR: &str = "STOREFRONT_TIMEOUT_SECS";

const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved configuration for talking to the catalog backend
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Backend origin, also the root for static image assets
    pub base_url: Url,

    /// Path prefix of the REST API under `base_url`
    pub api_prefix: String,

    pub request_timeout: Duration,

    /// File holding the session token
    pub token_file: PathBuf,
}

/// Values that take precedence over the environment, typically CLI flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token_file: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Build a config for the given base URL with defaults elsewhere
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            token_file: default_token_file(),
        })
    }

    /// Load from process environment, then apply overrides
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, overrides: ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = overrides
            .base_url
            .or_else(|| lookup(BASE_URL_VAR))
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut config = Self::new(&base_url)?;

        if let Some(path) = overrides
            .token_file
            .or_else(|| lookup(TOKEN_FILE_VAR).map(PathBuf::from))
        {
            config.token_file = path;
        }

        if let Some(timeout) = overrides.request_timeout {
            config.request_timeout = timeout;
        } else if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Base URL without a trailing slash, the root image paths join onto
    pub fn asset_base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Full URL of an API endpoint path such as `/books`
    ///
    /// Percent-escapes already present in `path` are kept as they are.
    pub fn api_url(&self, path: &str) -> Url {
        let mut full_path = self.base_url.path().trim_end_matches('/').to_string();
        for part in [self.api_prefix.as_str(), path] {
            let part = part.trim_matches('/');
            if !part.is_empty() {
                full_path.push('/');
                full_path.push_str(part);
            }
        }

        let mut url = self.base_url.clone();
        url.set_path(&full_path);
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl(raw.to_string());

    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Platform data directory location of the token file
pub fn default_token_file() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "storefront", "Storefront") {
        proj_dirs.data_dir().join("token")
    } else {
        PathBuf::from("storefront_data").join("token")
    }
}
