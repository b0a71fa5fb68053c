//! Persistent checkout step machine.

use crate::checkout::{AddressPatch, CheckoutCommand, CheckoutState, CheckoutStep, DeliveryMethod};
use crate::error::{CheckoutError, CommerceError};
use crate::persist::Persister;
use bookshelf_cache::Storage;

/// Default storage key for the checkout snapshot.
pub const CHECKOUT_STORAGE_KEY: &str = "checkoutState";

/// Drives the Contact → Delivery → Billing → Payment flow.
///
/// `advance` and `retreat` move one step at a time; `advance` only commits
/// when the current step validates. The whole state is written to storage
/// after every change.
#[derive(Debug)]
pub struct CheckoutStateMachine<S: Storage> {
    state: CheckoutState,
    persister: Persister<S>,
}

impl<S: Storage> CheckoutStateMachine<S> {
    /// Open the machine under the default key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CHECKOUT_STORAGE_KEY)
    }

    /// Open the machine, restoring any state saved under `key`.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let persister = Persister::new(storage, key);
        let state = persister
            .load::<CheckoutState>()
            .map(CheckoutState::normalized)
            .unwrap_or_default();

        tracing::debug!(
            key = persister.key(),
            step = %state.current_step(),
            "checkout opened"
        );
        Self { state, persister }
    }

    /// Apply a command and persist the result.
    pub fn dispatch(&mut self, command: CheckoutCommand) -> &CheckoutState {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(command);
        self.persister.save(&self.state);
        &self.state
    }

    /// Validate the current step and move to the next one.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let from = self.state.current_step();
        let to = from.next().ok_or_else(|| CheckoutError::InvalidTransition {
            from,
            to: "none".to_string(),
        })?;

        if let Err(errors) = self.state.validate_step(from) {
            tracing::debug!(step = %from, failures = errors.len(), "step validation failed");
            return Err(errors.into());
        }

        self.dispatch(CheckoutCommand::SetCurrentStep(to));
        tracing::debug!(%from, %to, "checkout advanced");
        Ok(to)
    }

    /// Move back one step. No validation.
    pub fn retreat(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let from = self.state.current_step();
        let to = from.previous().ok_or_else(|| CheckoutError::InvalidTransition {
            from,
            to: "none".to_string(),
        })?;

        self.dispatch(CheckoutCommand::SetCurrentStep(to));
        tracing::debug!(%from, %to, "checkout retreated");
        Ok(to)
    }

    /// Jump straight to a step, skipping validation.
    pub fn set_step(&mut self, step: CheckoutStep) -> &CheckoutState {
        self.dispatch(CheckoutCommand::SetCurrentStep(step))
    }

    /// Jump to a 1-based step number.
    pub fn set_step_number(&mut self, number: u8) -> Result<&CheckoutState, CommerceError> {
        let step = CheckoutStep::try_from(number)?;
        Ok(self.set_step(step))
    }

    pub fn update_shipping_address(&mut self, patch: AddressPatch) -> &CheckoutState {
        self.dispatch(CheckoutCommand::UpdateShippingAddress(patch))
    }

    pub fn select_delivery(&mut self, method: DeliveryMethod) -> &CheckoutState {
        self.dispatch(CheckoutCommand::SetDeliveryMethod(method))
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> &CheckoutState {
        self.dispatch(CheckoutCommand::SetEmail(email.into()))
    }

    pub fn use_shipping_address_for_billing(&mut self, flag: bool) -> &CheckoutState {
        self.dispatch(CheckoutCommand::UseShippingAddressForBilling(flag))
    }

    pub fn update_billing_address(&mut self, patch: AddressPatch) -> &CheckoutState {
        self.dispatch(CheckoutCommand::UpdateBillingAddress(patch))
    }

    /// Restore defaults, e.g. after an order completes.
    pub fn reset(&mut self) -> &CheckoutState {
        self.dispatch(CheckoutCommand::Reset)
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn current_step(&self) -> CheckoutStep {
        self.state.current_step()
    }

    pub fn is_degraded(&self) -> bool {
        self.persister.is_degraded()
    }

    /// Flush a final snapshot and release the storage.
    pub fn dispose(mut self) -> S {
        self.persister.save(&self.state);
        self.persister.into_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::Field;
    use bookshelf_cache::MemoryStorage;

    fn contact() -> AddressPatch {
        AddressPatch {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            country: Some("United States".to_string()),
            phone_number: Some("5551234567".to_string()),
            postal_code: Some("12345".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_advance_blocked_by_blank_contact() {
        let mut machine = CheckoutStateMachine::open(MemoryStorage::new());
        let before = machine.state().clone();

        let err = machine.advance().unwrap_err();
        match err {
            CheckoutError::Validation(errors) => {
                assert_eq!(errors.get(Field::LastName), Some("Last name is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_full_forward_walk() {
        let mut machine = CheckoutStateMachine::open(MemoryStorage::new());
        machine.update_shipping_address(contact());
        assert_eq!(machine.advance().unwrap(), CheckoutStep::Delivery);

        assert!(machine.advance().is_err());
        machine.select_delivery(DeliveryMethod::Standard);
        assert_eq!(machine.advance().unwrap(), CheckoutStep::Billing);
        assert_eq!(machine.advance().unwrap(), CheckoutStep::Payment);

        assert!(matches!(
            machine.advance(),
            Err(CheckoutError::InvalidTransition {
                from: CheckoutStep::Payment,
                ..
            })
        ));
    }

    #[test]
    fn test_retreat_from_contact_fails() {
        let mut machine = CheckoutStateMachine::open(MemoryStorage::new());
        assert!(matches!(
            machine.retreat(),
            Err(CheckoutError::InvalidTransition { .. })
        ));

        machine.set_step(CheckoutStep::Billing);
        assert_eq!(machine.retreat().unwrap(), CheckoutStep::Delivery);
    }

    #[test]
    fn test_set_step_number_bounds() {
        let mut machine = CheckoutStateMachine::open(MemoryStorage::new());
        assert!(machine.set_step_number(4).is_ok());
        assert_eq!(machine.current_step(), CheckoutStep::Payment);
        assert_eq!(
            machine.set_step_number(0).unwrap_err(),
            CommerceError::InvalidStep(0)
        );
    }

    #[test]
    fn test_state_survives_reopen() {
        let storage = MemoryStorage::new();
        let mut machine = CheckoutStateMachine::open(storage.clone());
        machine.update_shipping_address(contact());
        machine.select_delivery(DeliveryMethod::Express);
        machine.advance().unwrap();
        drop(machine);

        let reopened = CheckoutStateMachine::open(storage);
        assert_eq!(reopened.current_step(), CheckoutStep::Delivery);
        assert_eq!(reopened.state().delivery_price().amount_cents, 999);
        assert_eq!(reopened.state().shipping_address().phone_number, "(555) 123-4567");
    }

    #[test]
    fn test_reset_is_persisted() {
        let storage = MemoryStorage::new();
        let mut machine = CheckoutStateMachine::open(storage.clone());
        machine.select_delivery(DeliveryMethod::Overnight);
        machine.reset();
        let storage = machine.dispose();

        let reopened = CheckoutStateMachine::open(storage);
        assert_eq!(reopened.state(), &CheckoutState::default());
    }
}
