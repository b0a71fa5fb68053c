//! Catalog module.
//!
//! Contains the books on sale and the formats they are offered in.

mod book;

pub use book::{Book, BookFormat, Catalog, FormatOffer};
