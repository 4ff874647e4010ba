//! Viewport width source
//!
//! Hosts push width changes with [`Viewport::resize`]; a mounted view holds
//! one subscription for as long as it is mounted.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared viewport width in logical pixels
#[derive(Debug, Clone)]
pub struct Viewport {
    tx: Arc<watch::Sender<u32>>,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        let (tx, _) = watch::channel(width);
        Self { tx: Arc::new(tx) }
    }

    /// Report a resize event
    pub fn resize(&self, width: u32) {
        self.tx.send_replace(width);
    }

    pub fn width(&self) -> u32 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.tx.subscribe()
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
