//! Notification and navigation seams

use serde::Serialize;
use std::sync::Mutex;

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// An ephemeral, dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Client-side routes the view navigates to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "lowercase")]
pub enum Route {
    Login,
    /// Keyed by title, not by identifier
    Details { title: String },
}

impl Route {
    pub fn details(title: impl Into<String>) -> Self {
        Route::Details {
            title: title.into(),
        }
    }

    /// URL path of the route, with the title percent-encoded
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Details { title } => format!("/details/{}", urlencoding::encode(title)),
        }
    }
}

/// Surface for transient notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Routing layer
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Notifier that keeps every notification in order
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("notify: {}", notification.message),
            NotificationLevel::Error => tracing::warn!("notify: {}", notification.message),
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}

/// Navigator that records the requested routes
#[derive(Debug, Default)]
pub struct NavigationLog {
    routes: Mutex<Vec<Route>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().pop()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: Route) {
        tracing::debug!("navigate: {}", route.path());
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(route);
    }
}
