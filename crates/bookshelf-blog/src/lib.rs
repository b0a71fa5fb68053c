//! Author blog content store for the bookshelf site.
//!
//! Posts are kept as a single JSON list in any [`bookshelf_cache::Storage`].
//! Reading is open to everyone; writing requires an [`AdminToken`] that
//! matches the configured [`AdminSecret`].

mod auth;
mod error;
mod post;
mod store;

pub mod html;

pub use auth::{AdminSecret, AdminToken};
pub use error::BlogError;
pub use post::{BlogPost, NewPost, PostPatch};
pub use store::{default_key, BlogStore, StoredBlog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AdminSecret, AdminToken, BlogError, BlogPost, BlogStore, NewPost, PostPatch, StoredBlog};
}
