//! Delivery method table.

use crate::error::CommerceError;
use crate::money::{Money, STORE_CURRENCY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery options offered at checkout. Prices are fixed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Standard,
    Express,
    Overnight,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::Standard,
        DeliveryMethod::Express,
        DeliveryMethod::Overnight,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "standard",
            DeliveryMethod::Express => "express",
            DeliveryMethod::Overnight => "overnight",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "Standard Delivery",
            DeliveryMethod::Express => "Express Delivery",
            DeliveryMethod::Overnight => "Overnight Delivery",
        }
    }

    /// Get delivery estimate string.
    pub fn estimate(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "5-7 business days",
            DeliveryMethod::Express => "2-3 business days",
            DeliveryMethod::Overnight => "Next business day",
        }
    }

    pub fn price(&self) -> Money {
        let cents = match self {
            DeliveryMethod::Standard => 550,
            DeliveryMethod::Express => 999,
            DeliveryMethod::Overnight => 1999,
        };
        Money::new(cents, STORE_CURRENCY)
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DeliveryMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DeliveryMethod::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CommerceError::UnknownDeliveryMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_table() {
        assert_eq!(DeliveryMethod::Standard.price().amount_cents, 550);
        assert_eq!(DeliveryMethod::Express.price().amount_cents, 999);
        assert_eq!(DeliveryMethod::Overnight.price().amount_cents, 1999);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("overnight".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Overnight);
        assert!(matches!(
            "drone".parse::<DeliveryMethod>(),
            Err(CommerceError::UnknownDeliveryMethod(_))
        ));
    }
}
