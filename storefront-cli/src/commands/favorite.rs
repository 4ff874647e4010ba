//! Favorite command implementation

use super::Host;
use crate::FavoriteCommand;
use anyhow::{bail, Result};
use storefront_core::{BookId, ConfigOverrides, ToggleOutcome};

// Layout does not matter for favorite actions
const DEFAULT_WIDTH: u32 = 1024;

/// Add, remove or toggle one favorite
pub async fn favorite(
    overrides: ConfigOverrides,
    action: FavoriteCommand,
    book_id: &str,
) -> Result<()> {
    let host = Host::start(overrides, DEFAULT_WIDTH).await?;
    let id = BookId::new(book_id);

    let outcome = match action {
        FavoriteCommand::Add => host.view.add_favorite(&id).await,
        FavoriteCommand::Remove => host.view.remove_favorite(&id).await,
        FavoriteCommand::Toggle => host.view.toggle_favorite(&id).await,
    };

    host.flush();
    host.stop().await;

    match outcome {
        ToggleOutcome::Added => println!("Added {} to favorites", id),
        ToggleOutcome::Removed => println!("Removed {} from favorites", id),
        ToggleOutcome::LoginRequired => bail!("Login required to change favorites"),
        ToggleOutcome::Failed => bail!("Favorite request for {} failed", id),
        ToggleOutcome::InFlight => bail!("A favorite request for {} is already running", id),
    }
    Ok(())
}
