//! Per-step form validation.

use crate::checkout::ShippingAddress;
use serde::Serialize;
use std::fmt;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Address,
    City,
    Country,
    PhoneNumber,
    PostalCode,
    DeliveryMethod,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Address => "address",
            Field::City => "city",
            Field::Country => "country",
            Field::PhoneNumber => "phoneNumber",
            Field::PostalCode => "postalCode",
            Field::DeliveryMethod => "deliveryMethod",
            Field::Email => "email",
        }
    }
}

/// One failing field and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every failing field of a form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message).collect();
        f.write_str(&messages.join("; "))
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Matches `(XXX) XXX-XXXX` exactly.
fn is_formatted_phone(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 14
        && bytes.iter().enumerate().all(|(i, b)| match i {
            0 => *b == b'(',
            4 => *b == b')',
            5 => *b == b' ',
            9 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn is_valid_postal_code(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= 5
}

/// Loose `local@domain.tld` check.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Validate the contact/address form, reporting every failing field.
pub fn validate_address(address: &ShippingAddress) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if blank(&address.first_name) {
        errors.add(Field::FirstName, "First name is required");
    }
    if blank(&address.last_name) {
        errors.add(Field::LastName, "Last name is required");
    }
    if blank(&address.address) {
        errors.add(Field::Address, "Address is required");
    }
    if blank(&address.city) {
        errors.add(Field::City, "City is required");
    }
    if blank(&address.country) {
        errors.add(Field::Country, "Country is required");
    }
    if blank(&address.phone_number) {
        errors.add(Field::PhoneNumber, "Phone number is required");
    } else if !is_formatted_phone(address.phone_number.trim()) {
        errors.add(
            Field::PhoneNumber,
            "Please enter a valid phone number in (123) 456-7890 format",
        );
    }
    if blank(&address.postal_code) {
        errors.add(Field::PostalCode, "Postal code is required");
    } else if !is_valid_postal_code(&address.postal_code) {
        errors.add(
            Field::PostalCode,
            "Please enter a valid postal code (at least 5 digits)",
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingAddress {
        ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            phone_number: "(555) 123-4567".to_string(),
            postal_code: "12345".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_address_passes() {
        assert!(validate_address(&complete()).is_ok());
    }

    #[test]
    fn test_empty_address_reports_every_field() {
        let errors = validate_address(&ShippingAddress::default()).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));
        assert_eq!(errors.get(Field::PostalCode), Some("Postal code is required"));
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut addr = complete();
        addr.city = "   ".to_string();
        let errors = validate_address(&addr).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.get(Field::City), Some("City is required"));
    }

    #[test]
    fn test_partial_phone_rejected() {
        let mut addr = complete();
        addr.phone_number = "(555) 123-".to_string();
        let errors = validate_address(&addr).unwrap_err();
        assert_eq!(
            errors.get(Field::PhoneNumber),
            Some("Please enter a valid phone number in (123) 456-7890 format")
        );
    }

    #[test]
    fn test_postal_code_digit_count() {
        let mut addr = complete();
        addr.postal_code = "1234".to_string();
        assert!(validate_address(&addr).is_err());

        addr.postal_code = "12345-6789".to_string();
        assert!(validate_address(&addr).is_ok());
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("reader@example.com"));
        assert!(!is_valid_email("reader@example"));
        assert!(!is_valid_email("read er@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::City, "City is required");
        errors.add(Field::Country, "Country is required");
        assert_eq!(errors.to_string(), "City is required; Country is required");
    }
}
