//! Plain-text rendering of a catalog page

use std::fmt::Write;
use storefront_core::view::{CatalogStatus, ImagePlacement, PageView};

const HEART: &str = "♥";
const EMPTY_HEART: &str = "♡";

/// Render a page for the terminal
pub fn page_text(page: &PageView) -> String {
    let mut out = String::new();

    // Compact button on mobile, image beside the text on desktop
    let button = match page.banner.image_placement {
        ImagePlacement::Inline => format!("[{}]", page.banner.button_label),
        ImagePlacement::Aside => format!("[ {} ]", page.banner.button_label),
    };
    let _ = writeln!(out, "{}", page.banner.text);
    let _ = writeln!(out, "{}", button);
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", page.heading, page.toggle_label);

    match &page.status {
        CatalogStatus::Loading => {
            let _ = writeln!(out, "  Loading catalog...");
        }
        CatalogStatus::Empty => {
            let _ = writeln!(out, "  No books available.");
        }
        CatalogStatus::Failed { reason } => {
            let _ = writeln!(out, "  Catalog unavailable: {}", reason);
        }
        CatalogStatus::Ready => {
            for card in &page.cards {
                let _ = writeln!(
                    out,
                    "  {} [{}] {} | {} | {} | {}",
                    if card.favorite { HEART } else { EMPTY_HEART },
                    card.id,
                    card.title,
                    card.author,
                    card.price_label,
                    card.detail_route
                );
            }
        }
    }

    out
}
