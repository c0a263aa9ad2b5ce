//! UI-facing signals written by the request hooks: a busy flag and an error
//! channel.
//!
//! Single writer per field: only the HTTP client toggles `busy`; errors are
//! published by the client and the login flow and cleared by the UI or by
//! the expiry timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 64;

/// Change notifications for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Busy(bool),
    Error(String),
    ErrorCleared,
}

#[derive(Debug)]
struct Inner {
    busy: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    events: broadcast::Sender<UiEvent>,
    generation: AtomicU64,
    error_ttl: Option<Duration>,
}

/// Cheap-to-clone handle to the shared signals.
#[derive(Debug, Clone)]
pub struct UiSignals {
    inner: Arc<Inner>,
}

impl Default for UiSignals {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UiSignals {
    /// `error_ttl` is how long a published error stays before clearing itself.
    pub fn new(error_ttl: Option<Duration>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                busy: watch::Sender::new(false),
                error: watch::Sender::new(None),
                events,
                generation: AtomicU64::new(0),
                error_ttl,
            }),
        }
    }

    pub fn is_busy(&self) -> bool {
        *self.inner.busy.borrow()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.error.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.inner.events.subscribe()
    }

    pub fn watch_busy(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.error.subscribe()
    }

    /// Set the busy flag. An event is emitted only when the value changes.
    pub fn set_busy(&self, busy: bool) {
        let changed = self.inner.busy.send_if_modified(|current| {
            if *current == busy {
                false
            } else {
                *current = busy;
                true
            }
        });
        if changed {
            let _ = self.inner.events.send(UiEvent::Busy(busy));
        }
    }

    /// Publish an error message, replacing any previous one.
    pub fn publish_error(&self, message: impl Into<String>) {
        let message = message.into();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.inner.error.send_replace(Some(message.clone()));
        let _ = self.inner.events.send(UiEvent::Error(message));

        let Some(ttl) = self.inner.error_ttl else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let signals = self.clone();
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            // Only clear the message this timer was started for.
            if signals.inner.generation.load(Ordering::SeqCst) == generation {
                signals.clear_error();
            }
        });
    }

    pub fn clear_error(&self) {
        let previous = self.inner.error.send_replace(None);
        if previous.is_some() {
            let _ = self.inner.events.send(UiEvent::ErrorCleared);
        }
    }
}
