//! Cart line item types.

use crate::catalog::BookFormat;
use crate::ids::{BookId, FormatId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Payload for adding a book format to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: BookId,
    pub format_id: FormatId,
    pub title: String,
    pub author: String,
    pub unit_price: Money,
    pub image: String,
    pub format: BookFormat,
}

/// A line in the cart. One line per format id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: BookId,
    pub format_id: FormatId,
    pub title: String,
    pub author: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub image: String,
    pub format: BookFormat,
}

impl CartItem {
    /// Create a line with quantity 1.
    pub fn from_input(input: CartItemInput) -> Self {
        Self {
            product_id: input.product_id,
            format_id: input.format_id,
            title: input.title,
            author: input.author,
            unit_price: input.unit_price,
            quantity: 1,
            image: input.image,
            format: input.format,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Short `"title(format)"` description.
    pub fn summary(&self) -> String {
        format!("{}({})", self.title, self.format.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn input() -> CartItemInput {
        CartItemInput {
            product_id: BookId::new("book1"),
            format_id: FormatId::new("book1-paperback"),
            title: "You are not the only one".to_string(),
            author: "Judith Hobson".to_string(),
            unit_price: Money::new(1900, Currency::USD),
            image: "/images/hero-book.jpg".to_string(),
            format: BookFormat::Paperback,
        }
    }

    #[test]
    fn test_from_input_starts_at_one() {
        let item = CartItem::from_input(input());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.line_total().amount_cents, 1900);
    }

    #[test]
    fn test_line_total_and_summary() {
        let mut item = CartItem::from_input(input());
        item.quantity = 3;
        assert_eq!(item.line_total().amount_cents, 5700);
        assert_eq!(item.summary(), "You are not the only one(paperback)");
    }
}
