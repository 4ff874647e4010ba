//! Favorite toggle controller

use super::notify::{Notification, Route};
use super::render::FavoriteAction;
use super::CatalogView;
use crate::error::ApiError;
use crate::types::BookId;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

const ADD_SUCCESS: &str = "Favorite added successfully";
const REMOVE_SUCCESS: &str = "Favorite removed successfully";
// Shown for every non-401 add failure, whatever the cause.
const ADD_FAILURE: &str = "Favorite already added";

/// Result of a favorite action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// No token, or the backend rejected it; the user was sent to login
    LoginRequired,
    /// The request failed; local state is unchanged
    Failed,
    /// Another action on the same book is still outstanding; nothing was sent
    InFlight,
}

impl ToggleOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, ToggleOutcome::Added | ToggleOutcome::Removed)
    }
}

impl FavoriteAction {
    fn login_message(self) -> &'static str {
        match self {
            FavoriteAction::Add => "Please log in to add to favorites.",
            FavoriteAction::Remove => "Please log in to remove from favorites.",
        }
    }
}

/// Per-book guard against overlapping favorite requests
#[derive(Debug, Default, Clone)]
pub(super) struct InFlight {
    pending: Arc<Mutex<HashSet<BookId>>>,
}

impl InFlight {
    fn try_acquire(&self, id: &BookId) -> Option<InFlightGuard> {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if pending.insert(id.clone()) {
            Some(InFlightGuard {
                pending: self.pending.clone(),
                id: id.clone(),
            })
        } else {
            None
        }
    }
}

struct InFlightGuard {
    pending: Arc<Mutex<HashSet<BookId>>>,
    id: BookId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(&self.id);
    }
}

impl CatalogView {
    /// Mark a book as favorite
    pub async fn add_favorite(&self, id: &BookId) -> ToggleOutcome {
        let Some(_guard) = self.in_flight.try_acquire(id) else {
            tracing::debug!("Favorite request for {} already in flight", id);
            return ToggleOutcome::InFlight;
        };
        self.perform(FavoriteAction::Add, id).await
    }

    /// Unmark a favorite book
    pub async fn remove_favorite(&self, id: &BookId) -> ToggleOutcome {
        let Some(_guard) = self.in_flight.try_acquire(id) else {
            tracing::debug!("Favorite request for {} already in flight", id);
            return ToggleOutcome::InFlight;
        };
        self.perform(FavoriteAction::Remove, id).await
    }

    /// Remove if currently a favorite, otherwise add
    pub async fn toggle_favorite(&self, id: &BookId) -> ToggleOutcome {
        let Some(_guard) = self.in_flight.try_acquire(id) else {
            tracing::debug!("Favorite request for {} already in flight", id);
            return ToggleOutcome::InFlight;
        };
        let action = FavoriteAction::for_membership(self.is_favorite(id).await);
        self.perform(action, id).await
    }

    async fn perform(&self, action: FavoriteAction, id: &BookId) -> ToggleOutcome {
        let Some(token) = self.session.token() else {
            return self.require_login(action);
        };

        let result = match action {
            FavoriteAction::Add => self.api.add_favorite(&token, id).await,
            FavoriteAction::Remove => self.api.remove_favorite(&token, id).await,
        };

        match result {
            Ok(()) => {
                self.commit(action, id).await;
                match action {
                    FavoriteAction::Add => {
                        tracing::info!("Added {} to favorites", id);
                        self.notifier.notify(Notification::success(ADD_SUCCESS));
                        ToggleOutcome::Added
                    }
                    FavoriteAction::Remove => {
                        tracing::info!("Removed {} from favorites", id);
                        self.notifier.notify(Notification::success(REMOVE_SUCCESS));
                        ToggleOutcome::Removed
                    }
                }
            }
            Err(ApiError::AuthRequired) => self.require_login(action),
            Err(e) => {
                match action {
                    FavoriteAction::Add => {
                        tracing::warn!("Error adding {} to favorites: {}", id, e);
                        self.notifier.notify(Notification::error(ADD_FAILURE));
                    }
                    FavoriteAction::Remove => {
                        tracing::warn!("Error removing {} from favorites: {}", id, e);
                    }
                }
                ToggleOutcome::Failed
            }
        }
    }

    fn require_login(&self, action: FavoriteAction) -> ToggleOutcome {
        self.notifier
            .notify(Notification::error(action.login_message()));
        self.navigator.navigate(Route::Login);
        ToggleOutcome::LoginRequired
    }

    async fn commit(&self, action: FavoriteAction, id: &BookId) {
        let live = self.current_liveness();
        let mut state = self.state.write().await;
        if !live.load(Ordering::Acquire) {
            tracing::debug!("View not mounted, not recording favorite change for {}", id);
            return;
        }
        match action {
            FavoriteAction::Add => {
                state.favorites.insert(id.clone());
            }
            FavoriteAction::Remove => {
                state.favorites.remove(id);
            }
        }
    }
}
