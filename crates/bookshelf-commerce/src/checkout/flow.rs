//! Checkout state and its command reducer.

use crate::cart::CartState;
use crate::checkout::validation::is_valid_email;
use crate::checkout::{
    validate_address, AddressPatch, DeliveryMethod, Field, ShippingAddress, ValidationErrors,
};
use crate::error::CommerceError;
use crate::money::{Money, STORE_CURRENCY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CheckoutStep {
    /// Contact information and shipping address.
    #[default]
    Contact,
    /// Delivery method.
    Delivery,
    /// Billing address and payment method.
    Billing,
    /// Hosted payment.
    Payment,
}

impl CheckoutStep {
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Contact,
        CheckoutStep::Delivery,
        CheckoutStep::Billing,
        CheckoutStep::Payment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Contact => "contact",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Billing => "billing",
            CheckoutStep::Payment => "payment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Contact => "Contact",
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Billing => "Billing",
            CheckoutStep::Payment => "Payment",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Contact => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Billing => 3,
            CheckoutStep::Payment => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        CheckoutStep::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for CheckoutStep {
    type Error = CommerceError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or(CommerceError::InvalidStep(number))
    }
}

impl From<CheckoutStep> for u8 {
    fn from(step: CheckoutStep) -> u8 {
        step.number()
    }
}

/// How the shopper pays. Cards are the only option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
}

/// Billing choices made on the billing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingDetails {
    /// Bill to the shipping address.
    pub use_shipping_address: bool,
    /// Separate billing address, used when `use_shipping_address` is false.
    pub address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

impl Default for BillingDetails {
    fn default() -> Self {
        Self {
            use_shipping_address: true,
            address: ShippingAddress::default(),
            payment_method: PaymentMethod::Card,
        }
    }
}

/// Commands accepted by the checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutCommand {
    UpdateShippingAddress(AddressPatch),
    /// Select a method; the price comes from the delivery table.
    SetDeliveryMethod(DeliveryMethod),
    /// Jump to a step without validation (resume and deep links).
    SetCurrentStep(CheckoutStep),
    SetEmail(String),
    UseShippingAddressForBilling(bool),
    UpdateBillingAddress(AddressPatch),
    Reset,
}

/// Everything entered during checkout.
///
/// `delivery_price` is zero until a method is chosen and otherwise equals
/// that method's table price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutState {
    shipping_address: ShippingAddress,
    delivery_method: Option<DeliveryMethod>,
    delivery_price: Money,
    current_step: CheckoutStep,
    email: String,
    billing: BillingDetails,
}

impl CheckoutState {
    /// Re-derive the delivery price from the method after loading.
    pub fn normalized(mut self) -> Self {
        self.delivery_price = Self::price_for(self.delivery_method);
        self
    }

    fn price_for(method: Option<DeliveryMethod>) -> Money {
        method
            .map(|m| m.price())
            .unwrap_or(Money::zero(STORE_CURRENCY))
    }

    /// Apply a command, returning the next state.
    pub fn apply(mut self, command: CheckoutCommand) -> Self {
        match command {
            CheckoutCommand::UpdateShippingAddress(patch) => {
                self.shipping_address.apply_patch(patch);
            }
            CheckoutCommand::SetDeliveryMethod(method) => {
                self.delivery_method = Some(method);
                self.delivery_price = method.price();
            }
            CheckoutCommand::SetCurrentStep(step) => self.current_step = step,
            CheckoutCommand::SetEmail(email) => self.email = email.trim().to_string(),
            CheckoutCommand::UseShippingAddressForBilling(flag) => {
                self.billing.use_shipping_address = flag;
            }
            CheckoutCommand::UpdateBillingAddress(patch) => {
                self.billing.address.apply_patch(patch);
            }
            CheckoutCommand::Reset => return CheckoutState::default(),
        }
        self
    }

    /// Check that `step` is complete enough to move past it.
    pub fn validate_step(&self, step: CheckoutStep) -> Result<(), ValidationErrors> {
        match step {
            CheckoutStep::Contact => validate_address(&self.shipping_address),
            CheckoutStep::Delivery => {
                let mut errors = ValidationErrors::new();
                if self.delivery_method.is_none() {
                    errors.add(Field::DeliveryMethod, "Please select a delivery method");
                }
                errors.into_result()
            }
            CheckoutStep::Billing => {
                let mut errors = if self.billing.use_shipping_address {
                    ValidationErrors::new()
                } else {
                    validate_address(&self.billing.address).err().unwrap_or_default()
                };
                if !self.email.is_empty() && !is_valid_email(&self.email) {
                    errors.add(Field::Email, "Please enter a valid email address");
                }
                errors.into_result()
            }
            CheckoutStep::Payment => Ok(()),
        }
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn delivery_method(&self) -> Option<DeliveryMethod> {
        self.delivery_method
    }

    pub fn delivery_price(&self) -> Money {
        self.delivery_price
    }

    pub fn current_step(&self) -> CheckoutStep {
        self.current_step
    }

    /// Customer email, if one was entered.
    pub fn email(&self) -> Option<&str> {
        Some(self.email.as_str()).filter(|e| !e.is_empty())
    }

    pub fn billing(&self) -> &BillingDetails {
        &self.billing
    }

    /// Get the effective billing address.
    pub fn effective_billing_address(&self) -> &ShippingAddress {
        if self.billing.use_shipping_address {
            &self.shipping_address
        } else {
            &self.billing.address
        }
    }
}

/// Amount shown to the shopper: cart total plus delivery.
pub fn checkout_total(cart: &CartState, checkout: &CheckoutState) -> Money {
    let parts = [cart.total(), checkout.delivery_price()];
    Money::saturating_sum(parts.iter(), cart.currency())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers() {
        assert_eq!(CheckoutStep::Contact.number(), 1);
        assert_eq!(CheckoutStep::from_number(4), Some(CheckoutStep::Payment));
        assert_eq!(CheckoutStep::from_number(0), None);
        assert_eq!(CheckoutStep::from_number(5), None);
        assert_eq!(CheckoutStep::Payment.next(), None);
        assert_eq!(CheckoutStep::Contact.previous(), None);
        assert_eq!(CheckoutStep::Billing.previous(), Some(CheckoutStep::Delivery));
    }

    #[test]
    fn test_step_serializes_as_number() {
        assert_eq!(serde_json::to_string(&CheckoutStep::Billing).unwrap(), "3");
        assert!(serde_json::from_str::<CheckoutStep>("7").is_err());
    }

    #[test]
    fn test_delivery_price_follows_method() {
        let state = CheckoutState::default()
            .apply(CheckoutCommand::SetDeliveryMethod(DeliveryMethod::Overnight));
        assert_eq!(state.delivery_method(), Some(DeliveryMethod::Overnight));
        assert_eq!(state.delivery_price().amount_cents, 1999);
    }

    #[test]
    fn test_normalized_rederives_price() {
        let json = r#"{"delivery_method":"express","delivery_price":{"amount_cents":1,"currency":"USD"},"current_step":2}"#;
        let state: CheckoutState = serde_json::from_str(json).unwrap();
        let state = state.normalized();
        assert_eq!(state.delivery_price().amount_cents, 999);
        assert_eq!(state.current_step(), CheckoutStep::Delivery);

        let empty: CheckoutState = serde_json::from_str(
            r#"{"delivery_price":{"amount_cents":550,"currency":"USD"}}"#,
        )
        .unwrap();
        assert!(empty.normalized().delivery_price().is_zero());
    }

    #[test]
    fn test_delivery_step_requires_method() {
        let state = CheckoutState::default();
        let errors = state.validate_step(CheckoutStep::Delivery).unwrap_err();
        assert_eq!(errors.get(Field::DeliveryMethod), Some("Please select a delivery method"));
    }

    #[test]
    fn test_billing_uses_shipping_by_default() {
        let state = CheckoutState::default();
        assert!(state.billing().use_shipping_address);
        assert!(state.validate_step(CheckoutStep::Billing).is_ok());
        assert_eq!(state.billing().payment_method, PaymentMethod::Card);
    }

    #[test]
    fn test_separate_billing_address_is_validated() {
        let state = CheckoutState::default()
            .apply(CheckoutCommand::UseShippingAddressForBilling(false));
        let errors = state.validate_step(CheckoutStep::Billing).unwrap_err();
        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));

        let state = state.apply(CheckoutCommand::UpdateBillingAddress(AddressPatch {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            country: Some("US".to_string()),
            phone_number: Some("5551234567".to_string()),
            postal_code: Some("12345".to_string()),
            ..Default::default()
        }));
        assert!(state.validate_step(CheckoutStep::Billing).is_ok());
        assert_eq!(state.effective_billing_address().first_name, "Ada");
    }

    #[test]
    fn test_invalid_email_blocks_billing() {
        let state = CheckoutState::default().apply(CheckoutCommand::SetEmail("nope".to_string()));
        let errors = state.validate_step(CheckoutStep::Billing).unwrap_err();
        assert!(errors.get(Field::Email).is_some());

        let state = state.apply(CheckoutCommand::SetEmail("  ".to_string()));
        assert_eq!(state.email(), None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = CheckoutState::default()
            .apply(CheckoutCommand::SetDeliveryMethod(DeliveryMethod::Express))
            .apply(CheckoutCommand::SetCurrentStep(CheckoutStep::Billing))
            .apply(CheckoutCommand::Reset);
        assert_eq!(state, CheckoutState::default());
    }
}
