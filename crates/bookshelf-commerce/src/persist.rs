//! Best-effort snapshot persistence shared by the cart and checkout stores.

use bookshelf_cache::{Cache, Storage};
use serde::{de::DeserializeOwned, Serialize};

/// Writes snapshots of one value under one storage key.
///
/// After the first failed write the persister is degraded and skips all
/// further writes; callers keep their in-memory state.
#[derive(Debug)]
pub(crate) struct Persister<S> {
    cache: Cache<S>,
    key: String,
    degraded: bool,
}

impl<S: Storage> Persister<S> {
    pub(crate) fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
            degraded: false,
        }
    }

    /// Load the stored snapshot. Missing or unreadable values yield `None`.
    pub(crate) fn load<T: DeserializeOwned>(&self) -> Option<T> {
        match self.cache.get(&self.key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored state, starting fresh");
                None
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding unreadable stored state");
                None
            }
        }
    }

    pub(crate) fn save<T: Serialize>(&mut self, value: &T) {
        if self.degraded {
            return;
        }
        if let Err(err) = self.cache.set(&self.key, value) {
            tracing::warn!(key = %self.key, error = %err, "persisting state failed, disabling writes");
            self.degraded = true;
        }
    }

    pub(crate) fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn into_storage(self) -> S {
        self.cache.into_inner()
    }
}
