//! Widget API bootstrap
//!
//! The widget's loader must be injected once per process, and its single
//! global "ready" hook fans out to every session that is waiting for it.
//!
//! ```text
//! NotStarted ──ensure_bootstrapped──▶ Loading ──mark_ready──▶ Ready
//!      │                                                       ▲
//!      └──────── ensure_bootstrapped (API already loaded) ─────┘
//! ```

use crate::error::{PlaybackError, Result};
use crate::widget::{WidgetApi, WidgetHost};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// What `ensure_bootstrapped` left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    /// API available; widgets can be constructed now
    Ready,

    /// Loader injected, waiting on the ready hook
    Loading,
}

/// Result of subscribing to API readiness
pub enum ApiReady {
    /// Already loaded
    Ready(Arc<dyn WidgetApi>),

    /// Resolves once the ready hook fires
    Pending(oneshot::Receiver<Arc<dyn WidgetApi>>),
}

enum LoadState {
    NotStarted,
    Loading,
    Ready(Arc<dyn WidgetApi>),
}

struct Inner {
    state: LoadState,
    waiters: Vec<oneshot::Sender<Arc<dyn WidgetApi>>>,
    injections: usize,
}

/// Load-once guard for the widget API with a multi-subscriber ready point
pub struct WidgetBootstrap {
    inner: Mutex<Inner>,
}

static GLOBAL: OnceLock<Arc<WidgetBootstrap>> = OnceLock::new();

impl WidgetBootstrap {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: LoadState::NotStarted,
                waiters: Vec::new(),
                injections: 0,
            }),
        }
    }

    /// The process-wide instance
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make sure the widget API is loaded or loading
    ///
    /// Idempotent. Injects the loader at most once; if the host already has
    /// the API the bootstrap goes straight to ready. A failed injection
    /// leaves the bootstrap unstarted so the next call retries.
    pub fn ensure_bootstrapped(
        &self,
        host: &dyn WidgetHost,
        loader_src: &str,
    ) -> Result<BootstrapStatus> {
        let mut inner = self.lock();
        match inner.state {
            LoadState::Ready(_) => Ok(BootstrapStatus::Ready),
            LoadState::Loading => {
                if let Some(api) = host.loaded_api() {
                    Self::become_ready(&mut inner, api);
                    Ok(BootstrapStatus::Ready)
                } else {
                    Ok(BootstrapStatus::Loading)
                }
            }
            LoadState::NotStarted => {
                if let Some(api) = host.loaded_api() {
                    debug!("Widget API already present, skipping loader");
                    Self::become_ready(&mut inner, api);
                    return Ok(BootstrapStatus::Ready);
                }

                host.inject_loader(loader_src).map_err(|e| {
                    warn!(error = %e, src = loader_src, "Failed to inject widget loader");
                    PlaybackError::Bootstrap(e.to_string())
                })?;
                inner.injections += 1;
                inner.state = LoadState::Loading;
                info!(src = loader_src, "Injected widget loader");
                Ok(BootstrapStatus::Loading)
            }
        }
    }

    /// The global ready hook
    ///
    /// First call wins and notifies every waiter. Returns false if the API
    /// was already marked ready.
    pub fn mark_ready(&self, api: Arc<dyn WidgetApi>) -> bool {
        let mut inner = self.lock();
        if matches!(inner.state, LoadState::Ready(_)) {
            debug!("Widget API ready hook fired again, ignoring");
            return false;
        }
        Self::become_ready(&mut inner, api);
        true
    }

    fn become_ready(inner: &mut Inner, api: Arc<dyn WidgetApi>) {
        let waiters = std::mem::take(&mut inner.waiters);
        info!(waiters = waiters.len(), "Widget API ready");
        for waiter in waiters {
            // Receiver gone means that session moved on
            let _ = waiter.send(Arc::clone(&api));
        }
        inner.state = LoadState::Ready(api);
    }

    /// Wait for the API
    pub fn subscribe(&self) -> ApiReady {
        let mut inner = self.lock();
        if let LoadState::Ready(api) = &inner.state {
            return ApiReady::Ready(Arc::clone(api));
        }
        // Sessions that moved on dropped their receivers
        inner.waiters.retain(|waiter| !waiter.is_closed());
        let (tx, rx) = oneshot::channel();
        inner.waiters.push(tx);
        ApiReady::Pending(rx)
    }

    /// The API if loaded
    pub fn api(&self) -> Option<Arc<dyn WidgetApi>> {
        match &self.lock().state {
            LoadState::Ready(api) => Some(Arc::clone(api)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lock().state, LoadState::Ready(_))
    }

    /// How many times the loader was injected (0 or 1 unless injection failed)
    pub fn injection_count(&self) -> usize {
        self.lock().injections
    }

    /// Sessions currently waiting on the ready hook
    pub fn waiter_count(&self) -> usize {
        self.lock()
            .waiters
            .iter()
            .filter(|waiter| !waiter.is_closed())
            .count()
    }
}

impl Default for WidgetBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        let state = match inner.state {
            LoadState::NotStarted => "NotStarted",
            LoadState::Loading => "Loading",
            LoadState::Ready(_) => "Ready",
        };
        f.debug_struct("WidgetBootstrap")
            .field("state", &state)
            .field("waiters", &inner.waiters.len())
            .field("injections", &inner.injections)
            .finish()
    }
}
