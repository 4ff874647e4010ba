//! Render selector: a pure projection of view state onto page markup choices

use super::notify::Route;
use crate::types::{Book, BookId, FavoriteSet, LoadState, ViewMode};
use serde::Serialize;

/// Number of books shown before "View More" is toggled
pub const PREVIEW_LEN: usize = 6;

pub const HEADING: &str = "Best Selling Books";
pub const BANNER_TEXT: &str = "Discover diverse perspectives and ideas through our curated \
collection of books. We invite you to explore new worlds, challenge your thoughts, and \
connect with others through the transformative power of books.";
pub const SPECIAL_LABEL: &str = "Special for you";
pub const BANNER_IMAGE: &str = "/books.png";
pub const ADD_TO_CART: &str = "ADD TO CART";
pub const FAVORITE_ICON: &str = "/favorite.png";
pub const FAVORITE_ICON_FILLED: &str = "/favorite-fill.png";

/// Everything the selector reads
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub books: &'a [Book],
    pub favorites: &'a FavoriteSet,
    pub view_mode: ViewMode,
    pub show_more: bool,
    pub catalog: &'a LoadState,
    /// Root that relative image paths resolve against
    pub asset_base: &'a str,
}

/// What clicking a favorite affordance does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl FavoriteAction {
    /// Action for a book given current membership
    pub fn for_membership(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Truncated listing, whole card links to the detail page
    Preview,
    /// Full listing
    Full,
}

/// Where the banner image sits relative to the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePlacement {
    Inline,
    Aside,
}

/// Static promotional banner, chosen by view mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub text_class: &'static str,
    pub text: &'static str,
    pub button_class: &'static str,
    pub button_label: &'static str,
    pub image: &'static str,
    pub image_placement: ImagePlacement,
}

impl Banner {
    pub fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Mobile => Self {
                text_class: "mobile-container",
                text: BANNER_TEXT,
                button_class: "m-special-button",
                button_label: SPECIAL_LABEL,
                image: BANNER_IMAGE,
                image_placement: ImagePlacement::Inline,
            },
            ViewMode::Desktop => Self {
                text_class: "notebook-container",
                text: BANNER_TEXT,
                button_class: "special-button",
                button_label: SPECIAL_LABEL,
                image: BANNER_IMAGE,
                image_placement: ImagePlacement::Aside,
            },
        }
    }
}

/// Distinguishes "not yet loaded" from "empty" from "failed"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CatalogStatus {
    Loading,
    Empty,
    Ready,
    Failed { reason: String },
}

impl CatalogStatus {
    fn derive(state: &LoadState, count: usize) -> Self {
        match state {
            LoadState::Loading => CatalogStatus::Loading,
            LoadState::Failed { reason } => CatalogStatus::Failed {
                reason: reason.clone(),
            },
            LoadState::Loaded { .. } if count == 0 => CatalogStatus::Empty,
            LoadState::Loaded { .. } => CatalogStatus::Ready,
        }
    }
}

/// One rendered listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price_label: String,
    pub image_url: String,
    pub detail_route: String,
    pub cart_label: &'static str,
    pub favorite: bool,
    pub favorite_icon: &'static str,
    pub action: FavoriteAction,
}

impl BookCard {
    fn new(book: &Book, favorites: &FavoriteSet, asset_base: &str) -> Self {
        let favorite = favorites.contains(&book.id);
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            price_label: book.price_label(),
            image_url: book.image_url(asset_base),
            detail_route: Route::details(book.title.as_str()).path(),
            cart_label: ADD_TO_CART,
            favorite,
            favorite_icon: if favorite {
                FAVORITE_ICON_FILLED
            } else {
                FAVORITE_ICON
            },
            action: FavoriteAction::for_membership(favorite),
        }
    }
}

/// Selected page content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub view_mode: ViewMode,
    pub banner: Banner,
    pub heading: &'static str,
    pub toggle_label: &'static str,
    pub layout: Layout,
    pub status: CatalogStatus,
    pub cards: Vec<BookCard>,
}

/// Select the page for the given state
pub fn render(input: &RenderInput<'_>) -> PageView {
    let (layout, visible) = if input.show_more {
        (Layout::Full, input.books)
    } else {
        let n = input.books.len().min(PREVIEW_LEN);
        (Layout::Preview, &input.books[..n])
    };

    PageView {
        view_mode: input.view_mode,
        banner: Banner::for_mode(input.view_mode),
        heading: HEADING,
        toggle_label: if input.show_more {
            "View Less"
        } else {
            "View More"
        },
        layout,
        status: CatalogStatus::derive(input.catalog, input.books.len()),
        cards: visible
            .iter()
            .map(|book| BookCard::new(book, input.favorites, input.asset_base))
            .collect(),
    }
}
