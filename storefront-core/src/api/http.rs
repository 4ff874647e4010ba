//! reqwest-backed implementation of the backend contract

use super::{paths, ApiResult, CatalogApi};
use crate::config::{ConfigOverrides, StorefrontConfig};
use crate::error::{ApiError, ConfigError, Result};
use crate::session::Token;
use crate::types::{decode_catalog, Book, BookId, FavoriteSet, FavoritesResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client for the catalog backend
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    config: StorefrontConfig,
}

impl HttpCatalogApi {
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Resolve configuration from the environment and overrides, then build
    /// the client
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::new(StorefrontConfig::load(overrides)?)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder, token: &Token) -> RequestBuilder {
        builder.header(AUTHORIZATION, token.bearer())
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::AuthRequired),
            status => Err(ApiError::Http {
                status: status.as_u16(),
            }),
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_books(&self) -> ApiResult<Vec<Book>> {
        let url = self.config.api_url(paths::BOOKS);
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let records: Vec<serde_json::Value> = Self::json(response).await?;
        Ok(decode_catalog(records))
    }

    async fn list_favorites(&self, token: &Token) -> ApiResult<FavoriteSet> {
        let url = self.config.api_url(paths::FAVORITES);
        tracing::debug!("GET {}", url);
        let request = self.authorized(self.client.get(url), token);
        let response = self.send(request).await?;
        let body: FavoritesResponse = Self::json(response).await?;
        Ok(body.into_set())
    }

    async fn add_favorite(&self, token: &Token, id: &BookId) -> ApiResult<()> {
        let url = self.config.api_url(&paths::add_favorite(id));
        tracing::debug!("POST {}", url);
        let request = self
            .authorized(self.client.post(url), token)
            .header(CONTENT_TYPE, "application/json");
        self.send(request).await.map(|_| ())
    }

    async fn remove_favorite(&self, token: &Token, id: &BookId) -> ApiResult<()> {
        let url = self.config.api_url(&paths::remove_favorite(id));
        tracing::debug!("DELETE {}", url);
        let request = self
            .authorized(self.client.delete(url), token)
            .header(CONTENT_TYPE, "application/json");
        self.send(request).await.map(|_| ())
    }
}
