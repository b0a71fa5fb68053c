//! Payment module.
//!
//! Builds hosted payment-session requests from the cart and checkout,
//! talks to the payment provider, and reconciles the outcome.

mod orchestrator;
mod service;
mod session;
mod stripe;

pub use orchestrator::{CheckoutOrchestrator, Reconciliation};
pub use service::{PaymentServiceError, PaymentSessionService};
pub use session::{
    CreatedSession, PaymentSession, PaymentStatus, SessionLineItem, SessionMetadata,
    SessionRequest, CART_SUMMARY_LIMIT, METADATA_VALUE_LIMIT,
};
pub use stripe::{StripeConfig, StripeSessionService, DEFAULT_STRIPE_API_BASE};
