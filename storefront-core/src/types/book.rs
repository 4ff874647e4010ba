//! Catalog book records as served by the backend

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque backend identifier for a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single catalog entry
///
/// Only the identifier is required; display fields the backend leaves out
/// render blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Backend identifier (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: BookId,

    /// Display title, also the key of the detail route
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    /// Price in currency units
    #[serde(default)]
    pub price: f64,

    /// Path relative to the backend's static file root
    #[serde(default)]
    pub image: String,
}

impl Book {
    /// Create a book record
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price,
            image: image.into(),
        }
    }

    /// Price formatted for display, e.g. `₹100` or `₹249.5`
    pub fn price_label(&self) -> String {
        format!("₹{}", self.price)
    }

    /// Absolute URL of the cover image under the given asset root
    pub fn image_url(&self, asset_base: &str) -> String {
        format!(
            "{}/{}",
            asset_base.trim_end_matches('/'),
            self.image.trim_start_matches('/')
        )
    }
}

/// Decode a catalog listing record by record
///
/// Entries that cannot be read as a [`Book`] are skipped with a warning so
/// one bad record does not hide the rest of the catalog.
pub fn decode_catalog(records: Vec<Value>) -> Vec<Book> {
    let total = records.len();
    let books: Vec<Book> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!("Skipping catalog entry {}: {}", index, e);
                None
            }
        })
        .collect();
    if books.len() < total {
        tracing::warn!("Decoded {} of {} catalog entries", books.len(), total);
    }
    books
}
