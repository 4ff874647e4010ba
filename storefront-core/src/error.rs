//! Error types for Storefront Core

use thiserror::Error;

/// Result type alias using StorefrontError
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Top-level error type for all Storefront operations
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors returned by calls against the catalog backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, reset)
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status other than 401
    #[error("Request failed with status {status}")]
    Http { status: u16 },

    /// The response body could not be decoded
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Missing or rejected credentials
    #[error("Authentication required")]
    AuthRequired,
}

impl ApiError {
    /// Whether the caller should be sent to the login surface
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::AuthRequired)
    }
}

/// Errors raised while assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No backend base URL configured (set STOREFRONT_BASE_URL or pass --base-url)")]
    MissingBaseUrl,

    #[error("Invalid base URL '{0}': expected an http:// or https:// address")]
    InvalidBaseUrl(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Could not build HTTP client: {0}")]
    Client(String),
}
