//! Backend contract for the catalog and favorites endpoints

mod http;

pub use http::HttpCatalogApi;

use crate::error::ApiError;
use crate::session::Token;
use crate::types::{Book, BookId, FavoriteSet};
use async_trait::async_trait;

/// Result type for backend calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Endpoint paths, relative to the API prefix
pub mod paths {
    use crate::types::BookId;

    pub const BOOKS: &str = "/books";
    pub const FAVORITES: &str = "/book/favorites";

    pub fn add_favorite(id: &BookId) -> String {
        format!("/book/add-to-favorites/{}", urlencoding::encode(id.as_str()))
    }

    pub fn remove_favorite(id: &BookId) -> String {
        format!(
            "/book/remove-from-favorites/{}",
            urlencoding::encode(id.as_str())
        )
    }
}

/// The four backend calls the catalog view depends on
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /books`, unauthenticated; order is preserved
    async fn list_books(&self) -> ApiResult<Vec<Book>>;

    /// `GET /book/favorites`
    async fn list_favorites(&self, token: &Token) -> ApiResult<FavoriteSet>;

    /// `POST /book/add-to-favorites/{id}`
    async fn add_favorite(&self, token: &Token, id: &BookId) -> ApiResult<()>;

    /// `DELETE /book/remove-from-favorites/{id}`
    async fn remove_favorite(&self, token: &Token, id: &BookId) -> ApiResult<()>;
}
