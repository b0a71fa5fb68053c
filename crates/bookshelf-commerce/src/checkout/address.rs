//! Address types and input normalization.

use serde::{Deserialize, Serialize};

/// A shipping or billing address as entered by the shopper.
///
/// Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Address line 1.
    pub address: String,
    /// Apartment, suite, etc.
    pub apt: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub phone_number: String,
}

/// Field-level update to a [`ShippingAddress`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub apt: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

impl AddressPatch {
    pub fn is_empty(&self) -> bool {
        self == &AddressPatch::default()
    }
}

impl ShippingAddress {
    /// Merge a patch, normalizing phone number and postal code.
    pub fn apply_patch(&mut self, patch: AddressPatch) {
        fn merge(field: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *field = value;
            }
        }

        merge(&mut self.first_name, patch.first_name);
        merge(&mut self.last_name, patch.last_name);
        merge(&mut self.company, patch.company);
        merge(&mut self.address, patch.address);
        merge(&mut self.apt, patch.apt);
        merge(&mut self.country, patch.country);
        merge(&mut self.state, patch.state);
        merge(&mut self.city, patch.city);
        merge(&mut self.postal_code, patch.postal_code.map(|v| format_postal_code(&v)));
        merge(&mut self.phone_number, patch.phone_number.map(|v| format_phone_number(&v)));
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [
            &self.address,
            &self.apt,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reformat a phone number as `(XXX) XXX-XXXX` while digits accumulate.
///
/// Fewer than 3 digits are returned as is; extra digits past 10 are dropped.
pub fn format_phone_number(raw: &str) -> String {
    let d = digits(raw);
    match d.len() {
        0..=2 => d,
        3..=5 => format!("({}) {}", &d[..3], &d[3..]),
        len => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..len.min(10)]),
    }
}

/// Keep digits only and insert a hyphen after the fifth once a sixth appears.
pub fn format_postal_code(raw: &str) -> String {
    let d = digits(raw);
    if d.len() > 5 {
        format!("{}-{}", &d[..5], &d[5..d.len().min(9)])
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone_number() {
        assert_eq!(format_phone_number("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone_number("555-123-4567 ext 9"), "(555) 123-4567");
        assert_eq!(format_phone_number("555123"), "(555) 123-");
        assert_eq!(format_phone_number("5551"), "(555) 1");
        assert_eq!(format_phone_number("55"), "55");
        assert_eq!(format_phone_number("(555) 123-4567"), "(555) 123-4567");
    }

    #[test]
    fn test_format_postal_code() {
        assert_eq!(format_postal_code("94102"), "94102");
        assert_eq!(format_postal_code("941021234"), "94102-1234");
        assert_eq!(format_postal_code("941021"), "94102-1");
        assert_eq!(format_postal_code("94102-123456"), "94102-1234");
        assert_eq!(format_postal_code("SW1A"), "1");
    }

    #[test]
    fn test_patch_merges_fields() {
        let mut addr = ShippingAddress {
            first_name: "Jane".to_string(),
            city: "Portland".to_string(),
            ..Default::default()
        };
        addr.apply_patch(AddressPatch {
            last_name: Some("Smith".to_string()),
            phone_number: Some("5551234567".to_string()),
            ..Default::default()
        });

        assert_eq!(addr.first_name, "Jane");
        assert_eq!(addr.last_name, "Smith");
        assert_eq!(addr.city, "Portland");
        assert_eq!(addr.phone_number, "(555) 123-4567");
    }

    #[test]
    fn test_address_formatting() {
        let addr = ShippingAddress {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            address: "456 Oak Ave".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            postal_code: "90001".to_string(),
            country: "United States".to_string(),
            ..Default::default()
        };

        assert_eq!(addr.full_name(), "Jane Smith");
        assert_eq!(
            addr.one_line(),
            "456 Oak Ave, Los Angeles, CA, 90001, United States"
        );
    }
}
