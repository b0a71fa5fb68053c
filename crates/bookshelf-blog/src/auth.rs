//! Admin credentials for blog writes.

use crate::BlogError;
use secrecy::{ExposeSecret, SecretString};

/// Token presented by a caller that wants to write.
#[derive(Clone)]
pub struct AdminToken(SecretString);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminToken([REDACTED])")
    }
}

/// The configured admin secret. `None` disables writes.
#[derive(Clone, Default)]
pub struct AdminSecret(Option<SecretString>);

impl AdminSecret {
    pub fn new(secret: SecretString) -> Self {
        Self(Some(secret))
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    /// Build from an optional value; blank values disable writes.
    pub fn from_optional(secret: Option<String>) -> Self {
        Self(
            secret
                .filter(|s| !s.trim().is_empty())
                .map(SecretString::from),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Check a presented token.
    pub fn authorize(&self, token: &AdminToken) -> Result<(), BlogError> {
        let secret = self.0.as_ref().ok_or(BlogError::WritesDisabled)?;
        if constant_time_compare(
            secret.expose_secret().as_bytes(),
            token.0.expose_secret().as_bytes(),
        ) {
            Ok(())
        } else {
            tracing::warn!("rejected blog write with invalid admin token");
            Err(BlogError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSecret")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
