//! Bridges local cart and checkout state to the payment provider.

use crate::cart::{CartState, CartStore};
use crate::checkout::CheckoutState;
use crate::error::{CheckoutError, SessionFailure};
use crate::ids::SessionId;
use crate::payment::{
    CreatedSession, PaymentServiceError, PaymentSession, PaymentSessionService, PaymentStatus,
    SessionRequest,
};
use bookshelf_cache::Storage;
use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome of reconciling a returned session.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub session: PaymentSession,
    /// Whether the cart was emptied.
    pub cart_cleared: bool,
}

impl Reconciliation {
    pub fn is_paid(&self) -> bool {
        self.session.status == PaymentStatus::Paid
    }

    /// Message for the return page.
    pub fn message(&self) -> &'static str {
        match self.session.status {
            PaymentStatus::Paid => "Payment successful! Thank you for your order.",
            PaymentStatus::Pending => "Your payment is still being processed.",
            PaymentStatus::Failed => "Payment was not completed. Your cart has been kept.",
        }
    }
}

/// Creates hosted payment sessions and reconciles their outcome.
///
/// Each `create_session` call starts a new attempt. A response that
/// arrives after its attempt was superseded, by [`abandon`] or a newer
/// call, is discarded.
///
/// [`abandon`]: CheckoutOrchestrator::abandon
#[derive(Debug)]
pub struct CheckoutOrchestrator<P> {
    service: P,
    origin: String,
    generation: AtomicU64,
}

impl<P: PaymentSessionService> CheckoutOrchestrator<P> {
    /// `origin` is the public site origin used for absolute image URLs.
    pub fn new(service: P, origin: impl Into<String>) -> Self {
        Self {
            service,
            origin: origin.into(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &P {
        &self.service
    }

    /// Open a hosted payment session for the cart.
    ///
    /// The request is built before any await, so it reflects the cart as
    /// passed in. An empty cart fails without contacting the provider.
    pub async fn create_session(
        &self,
        cart: &CartState,
        checkout: &CheckoutState,
    ) -> Result<CreatedSession, CheckoutError> {
        let request = SessionRequest::build(cart, checkout, &self.origin)?;
        let attempt = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.service.create_session(&request).await;

        if self.generation.load(Ordering::SeqCst) != attempt {
            tracing::info!(attempt, "discarding response for abandoned checkout attempt");
            return Err(CheckoutError::Abandoned);
        }

        match result {
            Ok(created) => {
                tracing::info!(
                    session_id = %created.session_id,
                    items = request.metadata.item_count,
                    total = request.metadata.total_amount,
                    "payment session created"
                );
                Ok(created)
            }
            Err(err) => {
                let failure = match &err {
                    PaymentServiceError::Transport(message) => {
                        SessionFailure::Unknown(message.clone())
                    }
                    other => SessionFailure::classify(other.message()),
                };
                tracing::warn!(error = %err, ?failure, "payment session creation failed");
                Err(CheckoutError::SessionCreation(failure))
            }
        }
    }

    /// Stop caring about any in-flight `create_session`.
    pub fn abandon(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Check a returned session and clear the cart if it was paid.
    ///
    /// Any other status, and every error, leaves the cart untouched.
    pub async fn reconcile<S: Storage>(
        &self,
        session_id: Option<&str>,
        cart: &mut CartStore<S>,
    ) -> Result<Reconciliation, CheckoutError> {
        let id = match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => SessionId::new(id),
            _ => return Err(CheckoutError::MissingSession),
        };

        let session = self.service.get_session(&id).await.map_err(|err| match err {
            PaymentServiceError::NotFound(_) => CheckoutError::MissingSession,
            other => {
                tracing::warn!(session_id = %id, error = %other, "session lookup failed");
                CheckoutError::SessionFetch(other.message().to_string())
            }
        })?;

        let cart_cleared = session.status == PaymentStatus::Paid;
        if cart_cleared {
            cart.clear();
        }
        tracing::info!(
            session_id = %session.id,
            status = %session.status,
            cart_cleared,
            "payment session reconciled"
        );

        Ok(Reconciliation {
            session,
            cart_cleared,
        })
    }
}
