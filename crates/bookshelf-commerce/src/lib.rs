//! Storefront commerce core for the bookshelf site.
//!
//! This crate provides the cart, the multi-step checkout and the bridge to
//! a hosted payment provider:
//!
//! - **Catalog**: Books, formats and their prices
//! - **Cart**: Line items keyed by format, with a persistent store
//! - **Checkout**: Contact, delivery, billing and payment steps
//! - **Payment**: Hosted session creation and reconciliation
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_commerce::prelude::*;
//! use bookshelf_cache::MemoryStorage;
//!
//! let catalog = Catalog::default();
//! let mut cart = CartStore::open(MemoryStorage::new());
//! cart.add_item(catalog.line_input("book1", BookFormat::Paperback)?);
//!
//! let mut checkout = CheckoutStateMachine::open(MemoryStorage::new());
//! checkout.select_delivery(DeliveryMethod::Standard);
//! println!("Total: {}", checkout_total(cart.state(), checkout.state()));
//!
//! let orchestrator = CheckoutOrchestrator::new(stripe, "https://example.com");
//! let session = orchestrator.create_session(cart.state(), checkout.state()).await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod payment;

mod persist;

pub use error::{CheckoutError, CommerceError, SessionFailure};
pub use ids::*;
pub use money::{Currency, Money, STORE_CURRENCY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CheckoutError, CommerceError, SessionFailure};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, STORE_CURRENCY};

    // Catalog
    pub use crate::catalog::{Book, BookFormat, Catalog, FormatOffer};

    // Cart
    pub use crate::cart::{CartCommand, CartItem, CartItemInput, CartState, CartStore};

    // Checkout
    pub use crate::checkout::{
        checkout_total, AddressPatch, CheckoutCommand, CheckoutState, CheckoutStateMachine,
        CheckoutStep, DeliveryMethod, PaymentMethod, ShippingAddress, ValidationErrors,
    };

    // Payment
    pub use crate::payment::{
        CheckoutOrchestrator, CreatedSession, PaymentServiceError, PaymentSession,
        PaymentSessionService, PaymentStatus, Reconciliation, SessionRequest, StripeConfig,
        StripeSessionService,
    };
}
