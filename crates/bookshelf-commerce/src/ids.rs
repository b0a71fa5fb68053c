//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a BookId where a FormatId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a book in the catalog.
    BookId
);
define_id!(
    /// Identifies one purchasable format of a book (`"{book}-{format}"`).
    FormatId
);
define_id!(
    /// Identifier issued by the payment provider for a hosted session.
    SessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = BookId::new("book1");
        assert_eq!(id.as_str(), "book1");
    }

    #[test]
    fn test_id_from_string() {
        let id: FormatId = "book1-paperback".into();
        assert_eq!(id.as_str(), "book1-paperback");
        assert_eq!(format!("{}", id), "book1-paperback");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = SessionId::new("cs_test_123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cs_test_123\"");
    }
}
