//! Payment provider seam.

use crate::ids::SessionId;
use crate::payment::{CreatedSession, PaymentSession, SessionRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a payment provider client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentServiceError {
    /// The provider answered with an error.
    #[error("payment provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider does not know the session.
    #[error("payment session not found: {0}")]
    NotFound(String),

    /// The provider could not be reached or answered unreadably.
    #[error("payment provider unavailable: {0}")]
    Transport(String),
}

impl PaymentServiceError {
    /// The provider's own message, where there is one.
    pub fn message(&self) -> &str {
        match self {
            PaymentServiceError::Rejected { message, .. } => message,
            PaymentServiceError::NotFound(message) => message,
            PaymentServiceError::Transport(message) => message,
        }
    }
}

/// Hosted payment-session provider.
#[async_trait]
pub trait PaymentSessionService: Send + Sync {
    /// Open a new session. Every call creates a distinct session.
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<CreatedSession, PaymentServiceError>;

    /// Fetch a session's current status.
    async fn get_session(&self, id: &SessionId) -> Result<PaymentSession, PaymentServiceError>;
}
