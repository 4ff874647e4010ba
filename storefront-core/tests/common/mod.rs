//! Shared fixtures: a scripted in-memory backend and an axum fake server

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_core::api::{ApiResult, CatalogApi};
use storefront_core::view::{NavigationLog, NotificationLog};
use storefront_core::{
    ApiError, Book, BookId, CatalogView, FavoriteSet, MemorySession, SessionStore, Token,
};
use tokio::sync::watch;

// =============================================================================
// Fixtures
// =============================================================================

pub fn sample_books(n: usize) -> Vec<Book> {
    (1..=n)
        .map(|i| {
            Book::new(
                i.to_string(),
                format!("Book {i}"),
                format!("Author {i}"),
                (i * 100) as f64,
                format!("uploads/{i}.png"),
            )
        })
        .collect()
}

pub fn favorites(ids: &[&str]) -> FavoriteSet {
    ids.iter().map(|id| BookId::new(*id)).collect()
}

/// Poll `check` until it holds or a second passes
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}

// =============================================================================
// Scripted backend
// =============================================================================

/// A latch that holds calls until opened
#[derive(Clone)]
pub struct Gate {
    tx: Arc<watch::Sender<bool>>,
}

impl Gate {
    pub fn closed() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBooks,
    ListFavorites { token: String },
    Add(BookId),
    Remove(BookId),
}

/// In-memory backend whose responses are set per test
pub struct ScriptedApi {
    pub books: Mutex<ApiResult<Vec<Book>>>,
    pub favorites: Mutex<ApiResult<FavoriteSet>>,
    pub add: Mutex<ApiResult<()>>,
    pub remove: Mutex<ApiResult<()>>,
    pub calls: Mutex<Vec<Call>>,
    pub books_gate: Option<Gate>,
    pub favorites_gate: Option<Gate>,
    pub toggle_gate: Option<Gate>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            books: Mutex::new(Ok(Vec::new())),
            favorites: Mutex::new(Ok(FavoriteSet::new())),
            add: Mutex::new(Ok(())),
            remove: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
            books_gate: None,
            favorites_gate: None,
            toggle_gate: None,
        }
    }
}

impl ScriptedApi {
    pub fn with_catalog(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(Ok(books)),
            ..Self::default()
        }
    }

    pub fn set_add(&self, result: ApiResult<()>) {
        *self.add.lock().unwrap() = result;
    }

    pub fn set_remove(&self, result: ApiResult<()>) {
        *self.remove.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn toggle_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Add(_) | Call::Remove(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogApi for ScriptedApi {
    async fn list_books(&self) -> ApiResult<Vec<Book>> {
        self.record(Call::ListBooks);
        if let Some(gate) = &self.books_gate {
            gate.wait().await;
        }
        self.books.lock().unwrap().clone()
    }

    async fn list_favorites(&self, token: &Token) -> ApiResult<FavoriteSet> {
        self.record(Call::ListFavorites {
            token: token.as_str().to_string(),
        });
        if let Some(gate) = &self.favorites_gate {
            gate.wait().await;
        }
        self.favorites.lock().unwrap().clone()
    }

    async fn add_favorite(&self, _token: &Token, id: &BookId) -> ApiResult<()> {
        self.record(Call::Add(id.clone()));
        if let Some(gate) = &self.toggle_gate {
            gate.wait().await;
        }
        self.add.lock().unwrap().clone()
    }

    async fn remove_favorite(&self, _token: &Token, id: &BookId) -> ApiResult<()> {
        self.record(Call::Remove(id.clone()));
        if let Some(gate) = &self.toggle_gate {
            gate.wait().await;
        }
        self.remove.lock().unwrap().clone()
    }
}

/// A view wired to recording collaborators
pub struct Harness {
    pub view: CatalogView,
    pub api: Arc<ScriptedApi>,
    pub notifications: Arc<NotificationLog>,
    pub navigation: Arc<NavigationLog>,
}

impl Harness {
    pub fn new(api: ScriptedApi, session: MemorySession) -> Self {
        Self::with_session(api, Arc::new(session))
    }

    pub fn with_session(api: ScriptedApi, session: Arc<dyn SessionStore>) -> Self {
        let api = Arc::new(api);
        let notifications = Arc::new(NotificationLog::new());
        let navigation = Arc::new(NavigationLog::new());
        let view = CatalogView::new(
            api.clone(),
            session,
            notifications.clone(),
            navigation.clone(),
            "http://backend.test",
        );
        Self {
            view,
            api,
            notifications,
            navigation,
        }
    }
}

// =============================================================================
// Fake HTTP backend
// =============================================================================

pub const VALID_TOKEN: &str = "valid-token";

/// Knobs and records of the fake server
#[derive(Default)]
pub struct FakeBackend {
    pub books: Mutex<Vec<Book>>,
    pub favorites: Mutex<HashSet<String>>,
    /// Status forced on every favorites mutation, when set
    pub mutation_status: Mutex<Option<StatusCode>>,
    /// Serve a non-JSON catalog body
    pub malformed_catalog: Mutex<bool>,
    /// Serve this JSON instead of `books`, when set
    pub raw_catalog: Mutex<Option<serde_json::Value>>,
    pub seen_auth: Mutex<Vec<Option<String>>>,
    pub seen_paths: Mutex<Vec<String>>,
}

pub type Shared = Arc<FakeBackend>;

fn authorized(backend: &FakeBackend, headers: &HeaderMap) -> bool {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let expected = format!("Bearer {VALID_TOKEN}");
    let ok = auth.as_deref() == Some(expected.as_str());
    backend.seen_auth.lock().unwrap().push(auth);
    ok
}

async fn list_books(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    backend.seen_paths.lock().unwrap().push("/api/books".into());
    backend
        .seen_auth
        .lock()
        .unwrap()
        .push(headers.get("authorization").map(|v| v.to_str().unwrap_or("").to_string()));
    if *backend.malformed_catalog.lock().unwrap() {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }
    if let Some(raw) = backend.raw_catalog.lock().unwrap().clone() {
        return Json(raw).into_response();
    }
    let books = backend.books.lock().unwrap().clone();
    Json(books).into_response()
}

async fn list_favorites(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&backend, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let favorites = backend.favorites.lock().unwrap().clone();
    let books = backend.books.lock().unwrap().clone();
    let records: Vec<_> = books
        .into_iter()
        .filter(|b| favorites.contains(b.id.as_str()))
        .collect();
    Json(serde_json::json!({ "favorites": records })).into_response()
}

async fn add_favorite(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    backend
        .seen_paths
        .lock()
        .unwrap()
        .push(format!("/api/book/add-to-favorites/{id}"));
    if !authorized(&backend, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(status) = *backend.mutation_status.lock().unwrap() {
        return status.into_response();
    }
    if !backend.favorites.lock().unwrap().insert(id) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn remove_favorite(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    backend
        .seen_paths
        .lock()
        .unwrap()
        .push(format!("/api/book/remove-from-favorites/{id}"));
    if !authorized(&backend, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(status) = *backend.mutation_status.lock().unwrap() {
        return status.into_response();
    }
    backend.favorites.lock().unwrap().remove(&id);
    StatusCode::OK.into_response()
}

/// Serve the fake backend on an ephemeral port, returning its base URL
pub async fn spawn_backend(backend: Shared) -> String {
    let app = Router::new()
        .route("/api/books", get(list_books))
        .route("/api/book/favorites", get(list_favorites))
        .route("/api/book/add-to-favorites/:id", post(add_favorite))
        .route("/api/book/remove-from-favorites/:id", delete(remove_favorite))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Fake backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn http_error(status: u16) -> ApiError {
    ApiError::Http { status }
}
