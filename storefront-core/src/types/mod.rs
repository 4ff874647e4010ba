//! Core types shared by the catalog view and its collaborators

mod book;
mod favorites;
mod view;

pub use book::{decode_catalog, Book, BookId};
pub use favorites::{FavoriteRecord, FavoriteSet, FavoritesResponse};
pub use view::{LoadState, ViewMode, MOBILE_BREAKPOINT};
