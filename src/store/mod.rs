//! Per-view entity store: owns the raw fetched collection and its
//! loading/error state. Each screen fetches and re-fetches its own copy;
//! there is no cross-view cache. Loads racing each other are not
//! deduplicated — callers serialize their own calls.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;

use crate::api::Backend;
use crate::config::ClientConfig;
use crate::errors::AppError;

/// `Idle → Loading → {Ready, Failed}`; `Ready → Loading` on refresh,
/// `Failed → Loading` on manual retry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Terminal until the user retries. The previously loaded collection
    /// is still shown alongside the error.
    Failed { message: String },
}

/// Cancellation signal handed to in-flight loads. Owned by the view; when
/// the view is dropped mid-fetch, the late response is discarded without
/// touching store state.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that never fires, for contexts without a view lifetime.
    pub fn detached() -> Self {
        let (tx, rx) = watch::channel(false);
        // Sender leaks intentionally: the token must stay live forever
        std::mem::forget(tx);
        CancelToken { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves when the owning view cancels or is dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Held by the view for as long as it is mounted. Dropping it (or calling
/// `cancel`) fires every token cloned from it.
#[derive(Debug)]
pub struct ViewGuard {
    tx: watch::Sender<bool>,
}

impl ViewGuard {
    pub fn new() -> (ViewGuard, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (ViewGuard { tx }, CancelToken { rx })
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

// Dropping the sender closes the channel, which tokens read as cancelled.

/// Raw collection plus load state for one screen.
#[derive(Debug)]
pub struct EntityStore<T> {
    items: Vec<T>,
    stats: Option<Value>,
    state: LoadState,
    loaded_once: bool,
    retry_attempts: u32,
    retry_base: Duration,
}

impl<T> EntityStore<T> {
    pub fn new(config: &ClientConfig) -> Self {
        EntityStore {
            items: Vec::new(),
            stats: None,
            state: LoadState::Idle,
            loaded_once: false,
            retry_attempts: config.retry_attempts.max(1),
            retry_base: config.retry_base,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Server-side aggregates, when the list endpoint sent them along.
    pub fn server_stats(&self) -> Option<&Value> {
        self.stats.as_ref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Fetch the collection and replace it wholesale. The initial load
    /// retries up to the configured attempt count with increasing backoff
    /// (base × attempt); refreshes fail fast and keep the previous
    /// collection. A cancelled load returns without touching state.
    pub async fn load<B: Backend<T>>(
        &mut self,
        backend: &B,
        cancel: &CancelToken,
    ) -> Result<(), AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        self.state = LoadState::Loading;

        let attempts = if self.loaded_once { 1 } else { self.retry_attempts };
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            let fetched = tokio::select! {
                result = backend.fetch() => result,
                _ = cancel.cancelled() => {
                    log::debug!("load cancelled by view teardown, discarding");
                    return Err(AppError::Cancelled);
                }
            };

            match fetched {
                Ok(payload) => {
                    self.items = payload.items;
                    self.stats = payload.stats;
                    self.state = LoadState::Ready;
                    self.loaded_once = true;
                    return Ok(());
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        let delay = self.retry_base * attempt;
                        log::warn!(
                            "load failed (attempt {attempt}/{attempts}), retrying in {delay:?}: {last_error}"
                        );
                        tokio::select! {
                            _ = tokio::time::sleep(delay) => {}
                            _ = cancel.cancelled() => {
                                log::debug!("retry wait cancelled by view teardown");
                                return Err(AppError::Cancelled);
                            }
                        }
                    }
                }
            }
        }

        log::error!("load failed after {attempts} attempt(s): {last_error}");
        self.state = LoadState::Failed { message: last_error.clone() };
        Err(AppError::Fetch(last_error))
    }
}
