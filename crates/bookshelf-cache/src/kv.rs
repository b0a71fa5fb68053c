//! Typed JSON wrapper over a [`Storage`] backend.

use crate::{CacheError, Storage};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache backed by any [`Storage`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: Storage> Cache<S> {
    /// Wrap a storage backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<PersistedCart> = cache.get("cart-state")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Unwrap the underlying storage.
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("blog", "posts");
/// // Returns "blog:posts"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        items: Vec<String>,
        total: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryStorage::new());
        let snapshot = Snapshot {
            items: vec!["book1-paperback".to_string()],
            total: 1900,
        };

        cache.set("cart-state", &snapshot).unwrap();
        let loaded: Option<Snapshot> = cache.get("cart-state").unwrap();
        assert_eq!(loaded, Some(snapshot));

        let missing: Option<Snapshot> = cache.get("checkoutState").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let storage = MemoryStorage::new();
        storage.set("cart-state", "{not json").unwrap();

        let cache = Cache::new(storage);
        let result: Result<Option<Snapshot>, _> = cache.get("cart-state");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("blog", "posts"), "blog:posts");
        assert_eq!(cache_key!("cart", "user", 42), "cart:user:42");
    }
}
