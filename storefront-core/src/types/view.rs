//! Derived layout and loading state

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Widths at or below this many logical pixels use the mobile layout
pub const MOBILE_BREAKPOINT: u32 = 576;

/// Responsive layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Mobile,
    #[default]
    Desktop,
}

impl ViewMode {
    /// Select the layout for a viewport width
    pub fn from_width(width: u32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            ViewMode::Mobile
        } else {
            ViewMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewMode::Mobile
    }
}

/// Progress of one mount-time fetch
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Loading,
    Loaded { fetched_at: DateTime<Utc> },
    Failed { reason: String },
}

impl LoadState {
    pub fn loaded_now() -> Self {
        LoadState::Loaded {
            fetched_at: Utc::now(),
        }
    }

    pub fn failed(reason: impl ToString) -> Self {
        LoadState::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
