//! CLI command implementations

mod browse;
mod favorite;

pub use browse::browse;
pub use favorite::favorite;

use anyhow::{Context, Result};
use std::sync::Arc;
use storefront_core::session::{ChainedSession, EnvSession};
use storefront_core::view::{NavigationLog, NotificationLevel, NotificationLog};
use storefront_core::{
    CatalogView, ConfigOverrides, FileSession, HttpCatalogApi, MountHandle, Viewport,
};

/// A mounted view plus the collaborators the CLI reports from
struct Host {
    view: CatalogView,
    mount: MountHandle,
    notifications: Arc<NotificationLog>,
    navigation: Arc<NavigationLog>,
}

impl Host {
    /// Resolve configuration, mount the view and wait for both fetches
    async fn start(overrides: ConfigOverrides, width: u32) -> Result<Self> {
        let api = HttpCatalogApi::from_overrides(overrides)
            .context("Failed to set up the catalog client")?;
        let config = api.config().clone();
        tracing::debug!("Using backend {}", config.base_url);

        let session = ChainedSession::new(vec![
            Box::new(EnvSession::default()),
            Box::new(FileSession::new(&config.token_file)),
        ]);

        let notifications = Arc::new(NotificationLog::new());
        let navigation = Arc::new(NavigationLog::new());
        let view = CatalogView::new(
            Arc::new(api),
            Arc::new(session),
            notifications.clone(),
            navigation.clone(),
            config.asset_base(),
        );

        let viewport = Viewport::new(width);
        let mut mount = view.mount(&viewport);
        mount.settled().await;

        Ok(Self {
            view,
            mount,
            notifications,
            navigation,
        })
    }

    /// Print pending notifications and redirects to stderr
    fn flush(&self) {
        for note in self.notifications.drain() {
            let tag = match note.level {
                NotificationLevel::Success => "ok",
                NotificationLevel::Error => "error",
            };
            eprintln!("[{}] {}", tag, note.message);
        }
        for route in self.navigation.routes() {
            eprintln!("-> {}", route.path());
        }
    }

    async fn stop(mut self) {
        self.mount.unmount().await;
    }
}
