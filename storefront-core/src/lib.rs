//! Storefront Core Library
//!
//! This crate provides the catalog view for the Storefront client: it loads the
//! book catalog and the session's favorites from the backend, tracks the
//! viewport to pick a layout, toggles favorites, and selects what a host
//! should render.

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod view;

pub use api::{CatalogApi, HttpCatalogApi};
pub use config::{ConfigOverrides, StorefrontConfig};
pub use error::{ApiError, ConfigError, Result, StorefrontError};
pub use session::{FileSession, MemorySession, SessionStore, Token};
pub use types::{Book, BookId, FavoriteSet, LoadState, ViewMode};
pub use view::{CatalogView, MountHandle, PageView, ToggleOutcome, Viewport};
