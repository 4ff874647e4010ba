//! The catalog view component
//!
//! [`CatalogView::mount`] starts three independent tasks: the catalog
//! loader, the favorites synchronizer and the viewport observer. They share
//! nothing but the view state, which the render selector reads whenever the
//! host asks for a page. Results that arrive after the mount is torn down are
//! discarded.

mod notify;
mod render;
mod toggle;
mod viewport;

pub use notify::{
    Navigator, NavigationLog, Notification, NotificationLevel, NotificationLog, Notifier, Route,
};
pub use render::{
    render, Banner, BookCard, CatalogStatus, FavoriteAction, ImagePlacement, Layout, PageView,
    RenderInput, PREVIEW_LEN,
};
pub use toggle::ToggleOutcome;
pub use viewport::Viewport;

use crate::api::CatalogApi;
use crate::session::SessionStore;
use crate::types::{Book, BookId, FavoriteSet, LoadState, ViewMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use toggle::InFlight;

/// Mutable state owned by one view instance
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub books: Vec<Book>,
    pub favorites: FavoriteSet,
    pub view_mode: ViewMode,
    pub show_more: bool,
    pub catalog: LoadState,
    pub favorites_load: LoadState,
}

/// Liveness flag of one mount
type Liveness = Arc<AtomicBool>;

/// Storefront catalog listing with per-book favorite toggles
pub struct CatalogView {
    api: Arc<dyn CatalogApi>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    asset_base: String,
    state: Arc<RwLock<ViewState>>,
    in_flight: InFlight,
    live: Mutex<Liveness>,
}

impl CatalogView {
    /// Create an unmounted view
    ///
    /// `asset_base` is the root that relative image paths resolve against,
    /// normally the backend base URL.
    pub fn new(
        api: Arc<dyn CatalogApi>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        asset_base: impl Into<String>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            navigator,
            asset_base: asset_base.into(),
            state: Arc::new(RwLock::new(ViewState::default())),
            in_flight: InFlight::default(),
            live: Mutex::new(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Start the mount-time fetches and the viewport listener
    ///
    /// Must be called from within a tokio runtime. Mounting again retires the
    /// previous mount.
    pub fn mount(&self, viewport: &Viewport) -> MountHandle {
        let live: Liveness = Arc::new(AtomicBool::new(true));
        {
            let mut current = self.live.lock().unwrap_or_else(|p| p.into_inner());
            current.store(false, Ordering::Release);
            *current = live.clone();
        }

        // Lay out for the current width before anything renders; the observer
        // covers the case where the state is briefly locked
        if let Ok(mut state) = self.state.try_write() {
            state.view_mode = ViewMode::from_width(viewport.width());
        }

        let catalog = tokio::spawn(load_catalog(
            self.api.clone(),
            self.state.clone(),
            live.clone(),
        ));
        let favorites = tokio::spawn(sync_favorites(
            self.api.clone(),
            self.session.clone(),
            self.state.clone(),
            live.clone(),
        ));
        let observer = tokio::spawn(observe_viewport(
            viewport.subscribe(),
            self.state.clone(),
            live.clone(),
        ));

        MountHandle {
            live,
            fetches: vec![catalog, favorites],
            viewport: Some(observer),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn is_favorite(&self, id: &BookId) -> bool {
        self.state.read().await.favorites.contains(id)
    }

    /// Flip between the truncated and the full listing
    pub async fn toggle_show_more(&self) -> bool {
        let mut state = self.state.write().await;
        state.show_more = !state.show_more;
        state.show_more
    }

    /// Select the page for the current state
    pub async fn render(&self) -> PageView {
        let state = self.state.read().await;
        render(&RenderInput {
            books: &state.books,
            favorites: &state.favorites,
            view_mode: state.view_mode,
            show_more: state.show_more,
            catalog: &state.catalog,
            asset_base: &self.asset_base,
        })
    }

    /// Navigate to the detail page of a book
    pub fn open_details(&self, book: &Book) {
        self.navigator.navigate(Route::details(book.title.as_str()));
    }

    fn current_liveness(&self) -> Liveness {
        self.live.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

/// Handle to a mounted view; dropping it unmounts
#[derive(Debug)]
pub struct MountHandle {
    live: Liveness,
    fetches: Vec<JoinHandle<()>>,
    viewport: Option<JoinHandle<()>>,
}

impl MountHandle {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Wait for both mount-time fetches to finish, committed or discarded
    pub async fn settled(&mut self) {
        for handle in self.fetches.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!("Mount fetch task ended abnormally: {}", e);
            }
        }
    }

    /// Mark the mount dead and release the viewport subscription
    ///
    /// In-flight fetches keep running; their results are discarded.
    pub async fn unmount(&mut self) {
        self.live.store(false, Ordering::Release);
        if let Some(observer) = self.viewport.take() {
            observer.abort();
            // Cancellation drops the listener's receiver before this resolves
            let _ = observer.await;
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
        if let Some(observer) = self.viewport.take() {
            observer.abort();
        }
    }
}

async fn load_catalog(api: Arc<dyn CatalogApi>, state: Arc<RwLock<ViewState>>, live: Liveness) {
    let result = api.list_books().await;

    let mut state = state.write().await;
    if !live.load(Ordering::Acquire) {
        tracing::debug!("Discarding catalog response for unmounted view");
        return;
    }
    match result {
        Ok(books) => {
            tracing::debug!("Loaded {} books", books.len());
            state.books = books;
            state.catalog = LoadState::loaded_now();
        }
        Err(e) => {
            tracing::warn!("Error fetching catalog: {}", e);
            state.catalog = LoadState::failed(e);
        }
    }
}

async fn sync_favorites(
    api: Arc<dyn CatalogApi>,
    session: Arc<dyn SessionStore>,
    state: Arc<RwLock<ViewState>>,
    live: Liveness,
) {
    let Some(token) = session.token() else {
        tracing::debug!("No session token, skipping favorites fetch");
        let mut state = state.write().await;
        if live.load(Ordering::Acquire) {
            state.favorites_load = LoadState::loaded_now();
        }
        return;
    };

    let result = api.list_favorites(&token).await;

    let mut state = state.write().await;
    if !live.load(Ordering::Acquire) {
        tracing::debug!("Discarding favorites response for unmounted view");
        return;
    }
    match result {
        Ok(favorites) => {
            tracing::debug!("Loaded {} favorites", favorites.len());
            state.favorites = favorites;
            state.favorites_load = LoadState::loaded_now();
        }
        Err(e) => {
            tracing::warn!("Error fetching favorites: {}", e);
            state.favorites_load = LoadState::failed(e);
        }
    }
}

async fn observe_viewport(
    mut rx: tokio::sync::watch::Receiver<u32>,
    state: Arc<RwLock<ViewState>>,
    live: Liveness,
) {
    loop {
        let width = *rx.borrow_and_update();
        {
            let mut state = state.write().await;
            if !live.load(Ordering::Acquire) {
                return;
            }
            state.view_mode = ViewMode::from_width(width);
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
