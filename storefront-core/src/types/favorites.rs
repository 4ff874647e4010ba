//! The client-held mirror of a user's favorite books

use super::BookId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of book identifiers the current session has marked favorite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: BTreeSet<BookId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.ids.contains(id)
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, id: BookId) -> bool {
        self.ids.insert(id)
    }

    /// Returns false if the id was not present
    pub fn remove(&mut self, id: &BookId) -> bool {
        self.ids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookId> {
        self.ids.iter()
    }
}

impl FromIterator<BookId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// One entry of the favorites endpoint; only the id is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRecord {
    #[serde(rename = "_id")]
    pub id: BookId,
}

/// Body of `GET /book/favorites`
#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteRecord>,
}

impl FavoritesResponse {
    /// Project the records onto their identifiers
    pub fn into_set(self) -> FavoriteSet {
        self.favorites.into_iter().map(|record| record.id).collect()
    }
}
