//! Get-or-load cache of translation backends, keyed by backend id.
//!
//! An id is either loaded or has one pending load. The pending load is a
//! shared future, so every caller that arrives while it runs awaits the same
//! construction and sees the same outcome, success or failure. The map lock
//! is only held to read or swap an entry, never across a load, so a slow
//! model never blocks lookups of another. A failed load is removed from the
//! map and the next caller loads again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

use crate::backend::{BackendDescriptor, BackendLoader, TranslationBackend};
use crate::error::BackendError;

type LoadOutcome = Result<Arc<dyn TranslationBackend>, Arc<BackendError>>;
type PendingLoad = Shared<BoxFuture<'static, LoadOutcome>>;

enum Slot {
    Loaded(Arc<dyn TranslationBackend>),
    Loading(PendingLoad),
}

/// Source of backend handles for the dispatcher
#[async_trait]
pub trait BackendCache: Send + Sync {
    async fn get_or_load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError>;
}

pub struct ModelCache {
    loader: Arc<dyn BackendLoader>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ModelCache {
    pub fn new(loader: Arc<dyn BackendLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a backend finished loading under this id
    pub fn is_loaded(&self, backend_id: &str) -> bool {
        matches!(self.lock_slots().get(backend_id), Some(Slot::Loaded(_)))
    }

    pub fn loaded_count(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| matches!(slot, Slot::Loaded(_)))
            .count()
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        // Nothing panics while the lock is held, but a poisoned map is still usable
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn start_load(&self, descriptor: BackendDescriptor) -> PendingLoad {
        let loader = Arc::clone(&self.loader);

        async move {
            let backend_id = descriptor.backend_id;
            tracing::info!(backend_id, loader = loader.name(), "loading backend");
            let started = std::time::Instant::now();

            match loader.load(&descriptor).await {
                Ok(backend) => {
                    tracing::info!(
                        backend_id,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "backend loaded"
                    );
                    Ok(backend)
                }
                Err(e) => {
                    tracing::warn!(backend_id, "backend load failed: {}", e);
                    Err(Arc::new(e))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Publish a finished load, or forget it if it failed. Only the load that
    /// is still registered for the id is touched.
    fn settle(&self, backend_id: &str, pending: &PendingLoad, outcome: &LoadOutcome) {
        let mut slots = self.lock_slots();
        let current = match slots.get(backend_id) {
            Some(Slot::Loading(current)) => current,
            _ => return,
        };
        if !current.ptr_eq(pending) {
            return;
        }

        match outcome {
            Ok(backend) => {
                slots.insert(backend_id.to_string(), Slot::Loaded(Arc::clone(backend)));
            }
            Err(_) => {
                slots.remove(backend_id);
            }
        }
    }
}

#[async_trait]
impl BackendCache for ModelCache {
    async fn get_or_load(
        &self,
        descriptor: &BackendDescriptor,
    ) -> Result<Arc<dyn TranslationBackend>, BackendError> {
        let backend_id = descriptor.backend_id;

        let pending = {
            let mut slots = self.lock_slots();
            match slots.get(backend_id) {
                Some(Slot::Loaded(backend)) => {
                    tracing::debug!(backend_id, "backend cache hit");
                    return Ok(Arc::clone(backend));
                }
                Some(Slot::Loading(pending)) => {
                    tracing::debug!(backend_id, "waiting for in-flight load");
                    pending.clone()
                }
                None => {
                    let pending = self.start_load(*descriptor);
                    slots.insert(backend_id.to_string(), Slot::Loading(pending.clone()));
                    pending
                }
            }
        };

        let outcome = pending.clone().await;
        self.settle(backend_id, &pending, &outcome);
        drop(pending);

        outcome.map_err(BackendError::unshare)
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("loader", &self.loader.name())
            .field("loaded", &self.loaded_count())
            .finish()
    }
}
