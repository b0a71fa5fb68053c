//! Commerce error types.

use crate::checkout::{CheckoutStep, ValidationErrors};
use thiserror::Error;

/// Errors from catalog lookups and value parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Book not found.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Book exists but is not sold in the requested format.
    #[error("{book} is not available as {format}")]
    FormatUnavailable { book: String, format: String },

    /// Unrecognised format name.
    #[error("Unknown book format: {0}")]
    UnknownFormat(String),

    /// Unrecognised delivery method id.
    #[error("Unknown delivery method: {0}")]
    UnknownDeliveryMethod(String),

    /// Step number outside 1..=4.
    #[error("Invalid checkout step: {0}")]
    InvalidStep(u8),

    /// Amount could not be represented.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Classified failure from creating a hosted payment session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionFailure {
    #[error("invalid API credentials")]
    InvalidCredentials,
    #[error("invalid pricing")]
    InvalidPricing,
    #[error("metadata value too large")]
    MetadataTooLarge,
    #[error("invalid image URL")]
    InvalidImageUrl,
    #[error("invalid customer email")]
    InvalidEmail,
    #[error("{0}")]
    Unknown(String),
}

impl SessionFailure {
    /// Classify a provider error message.
    pub fn classify(message: &str) -> Self {
        if message.contains("Invalid API Key") {
            SessionFailure::InvalidCredentials
        } else if message.contains("No such price") {
            SessionFailure::InvalidPricing
        } else if message.contains("Metadata values can have up to 500 characters") {
            SessionFailure::MetadataTooLarge
        } else if message.contains("Not a valid URL") {
            SessionFailure::InvalidImageUrl
        } else if message.contains("Invalid email address") {
            SessionFailure::InvalidEmail
        } else {
            SessionFailure::Unknown(message.to_string())
        }
    }

    /// Message suitable for showing to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            SessionFailure::InvalidCredentials => "Invalid payment provider API key".to_string(),
            SessionFailure::InvalidPricing => "Invalid product pricing".to_string(),
            SessionFailure::MetadataTooLarge => {
                "Cart has too many items for metadata storage".to_string()
            }
            SessionFailure::InvalidImageUrl => "Invalid product image URL".to_string(),
            SessionFailure::InvalidEmail => "Invalid customer email".to_string(),
            SessionFailure::Unknown(message) if message.trim().is_empty() => {
                "Failed to create checkout session".to_string()
            }
            SessionFailure::Unknown(message) => message.clone(),
        }
    }
}

/// Errors from the checkout state machine and orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// The current step has invalid or missing fields.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Attempted to move past the first or last step.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: CheckoutStep, to: String },

    /// Payment was requested for an empty cart.
    #[error("No items provided")]
    EmptyCart,

    /// No session id, or the provider does not know it.
    #[error("Session ID is required")]
    MissingSession,

    /// The provider rejected session creation.
    #[error("Failed to create checkout session: {0}")]
    SessionCreation(SessionFailure),

    /// Fetching session status failed.
    #[error("Failed to retrieve session: {0}")]
    SessionFetch(String),

    /// A newer attempt or explicit abandon superseded this request.
    #[error("Checkout attempt was abandoned")]
    Abandoned,

    /// Catalog or parsing failure surfaced during checkout.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl CheckoutError {
    /// Message suitable for showing to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::SessionCreation(failure) => failure.user_message(),
            CheckoutError::SessionFetch(_) => "Failed to retrieve session".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for CheckoutError {
    fn from(errors: ValidationErrors) -> Self {
        CheckoutError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_messages() {
        assert_eq!(
            SessionFailure::classify("Invalid API Key provided: sk_test_***"),
            SessionFailure::InvalidCredentials
        );
        assert_eq!(
            SessionFailure::classify("No such price: 'price_123'"),
            SessionFailure::InvalidPricing
        );
        assert_eq!(
            SessionFailure::classify("Metadata values can have up to 500 characters, but you passed in a value that is 612 characters."),
            SessionFailure::MetadataTooLarge
        );
        assert_eq!(
            SessionFailure::classify("Not a valid URL"),
            SessionFailure::InvalidImageUrl
        );
        assert_eq!(
            SessionFailure::classify("Invalid email address: nope"),
            SessionFailure::InvalidEmail
        );
    }

    #[test]
    fn test_unknown_message_passthrough() {
        let failure = SessionFailure::classify("Card network unavailable");
        assert_eq!(failure.user_message(), "Card network unavailable");
        assert_eq!(
            SessionFailure::Unknown(String::new()).user_message(),
            "Failed to create checkout session"
        );
    }

    #[test]
    fn test_checkout_error_user_message() {
        let err = CheckoutError::SessionCreation(SessionFailure::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid payment provider API key");
        assert_eq!(CheckoutError::EmptyCart.user_message(), "No items provided");
        assert_eq!(
            CheckoutError::MissingSession.user_message(),
            "Session ID is required"
        );
    }
}
