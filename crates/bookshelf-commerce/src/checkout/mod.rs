//! Checkout module.
//!
//! Contains the address and delivery types, per-step validation, the pure
//! checkout reducer and the persistent step machine.

mod address;
mod delivery;
mod flow;
mod machine;
mod validation;

pub use address::{format_phone_number, format_postal_code, AddressPatch, ShippingAddress};
pub use delivery::DeliveryMethod;
pub use flow::{
    checkout_total, BillingDetails, CheckoutCommand, CheckoutState, CheckoutStep, PaymentMethod,
};
pub use machine::{CheckoutStateMachine, CHECKOUT_STORAGE_KEY};
pub use validation::{validate_address, Field, FieldError, ValidationErrors};
