//! Browse command implementation

use super::Host;
use crate::render::page_text;
use anyhow::Result;
use storefront_core::ConfigOverrides;

/// Render the catalog page
pub async fn browse(overrides: ConfigOverrides, all: bool, width: u32, json: bool) -> Result<()> {
    let host = Host::start(overrides, width).await?;

    if all {
        host.view.toggle_show_more().await;
    }
    let page = host.view.render().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", page_text(&page));
    }

    host.flush();
    host.stop().await;
    Ok(())
}
