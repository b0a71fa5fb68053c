//! Durable client-side storage for the bookshelf storefront.
//!
//! Provides a small string key-value [`Storage`] abstraction with in-memory
//! and directory-backed implementations, plus a typed [`Cache`] wrapper with
//! automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_cache::{Cache, FileStorage};
//!
//! let cache = Cache::new(FileStorage::open(".bookshelf")?);
//!
//! // Store a value
//! cache.set("cart-state", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<PersistedCart> = cache.get("cart-state")?;
//! ```

mod error;
mod kv;
mod storage;

pub use error::CacheError;
pub use kv::Cache;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStorage, MemoryStorage, Storage};
}
