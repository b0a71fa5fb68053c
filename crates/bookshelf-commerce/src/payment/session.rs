//! Payment session request and response types.

use crate::cart::CartState;
use crate::checkout::CheckoutState;
use crate::error::{CheckoutError, SessionFailure};
use crate::ids::SessionId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest metadata value the provider accepts.
pub const METADATA_VALUE_LIMIT: usize = 500;

/// Longest cart summary embedded in metadata.
pub const CART_SUMMARY_LIMIT: usize = 150;

/// Observed state of a hosted payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: SessionId,
    pub status: PaymentStatus,
    pub total_amount: Money,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
}

/// Result of creating a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
    /// Opaque handle the hosted payment UI is mounted with.
    pub client_handle: String,
}

/// A priced line on the hosted payment page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionLineItem {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub unit_amount: Money,
    pub quantity: i64,
}

/// Compact cart summary attached to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMetadata {
    pub item_count: usize,
    /// Cart subtotal in minor units, excluding delivery.
    pub total_amount: i64,
    pub cart_summary: String,
    pub delivery_method: String,
    /// Delivery price in minor units.
    pub delivery_price: i64,
}

impl SessionMetadata {
    /// Key/value pairs as sent to the provider.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("itemCount", self.item_count.to_string()),
            ("totalAmount", self.total_amount.to_string()),
            ("cartSummary", self.cart_summary.clone()),
            ("deliveryMethod", self.delivery_method.clone()),
            ("deliveryPrice", self.delivery_price.to_string()),
        ]
    }

    /// Reject values the provider would refuse.
    pub fn validate(&self) -> Result<(), SessionFailure> {
        match self
            .entries()
            .into_iter()
            .find(|(_, value)| value.chars().count() > METADATA_VALUE_LIMIT)
        {
            Some((key, value)) => {
                tracing::warn!(key, length = value.chars().count(), "metadata value too long");
                Err(SessionFailure::MetadataTooLarge)
            }
            None => Ok(()),
        }
    }
}

/// Everything needed to open a hosted payment session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRequest {
    pub line_items: Vec<SessionLineItem>,
    pub metadata: SessionMetadata,
    pub customer_email: Option<String>,
    pub currency: Currency,
}

impl SessionRequest {
    /// Snapshot the cart and checkout into a request.
    ///
    /// Relative image references are made absolute against `origin`.
    pub fn build(
        cart: &CartState,
        checkout: &CheckoutState,
        origin: &str,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut line_items: Vec<SessionLineItem> = cart
            .items()
            .iter()
            .map(|item| SessionLineItem {
                name: format!("{} ({})", item.title, item.format.label()),
                description: format!("By {}", item.author),
                image_url: absolute_image_url(&item.image, origin),
                unit_amount: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        let delivery_price = checkout.delivery_price();
        if let Some(method) = checkout.delivery_method() {
            if delivery_price.is_positive() {
                line_items.push(SessionLineItem {
                    name: format!("Delivery - {}", method.id()),
                    description: "Shipping and handling".to_string(),
                    image_url: None,
                    unit_amount: delivery_price,
                    quantity: 1,
                });
            }
        }

        let summary = cart
            .items()
            .iter()
            .map(|item| item.summary())
            .collect::<Vec<_>>()
            .join(", ");

        let metadata = SessionMetadata {
            item_count: cart.items().len(),
            total_amount: cart.total().amount_cents,
            cart_summary: truncate_chars(&summary, CART_SUMMARY_LIMIT),
            delivery_method: checkout
                .delivery_method()
                .map(|m| m.id().to_string())
                .unwrap_or_else(|| "none".to_string()),
            delivery_price: delivery_price.amount_cents,
        };
        metadata.validate().map_err(CheckoutError::SessionCreation)?;

        Ok(Self {
            line_items,
            metadata,
            customer_email: checkout.email().map(str::to_string),
            currency: cart.currency(),
        })
    }
}

fn truncate_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

/// Absolute URL for an image reference, or `None` when there is no image.
fn absolute_image_url(image: &str, origin: &str) -> Option<String> {
    let image = image.trim();
    if image.is_empty() || image == "undefined" || image == "null" {
        return None;
    }
    if image.starts_with("http://") || image.starts_with("https://") {
        return Some(image.to_string());
    }
    Some(format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        image.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartCommand, CartItemInput};
    use crate::catalog::BookFormat;
    use crate::checkout::{CheckoutCommand, DeliveryMethod};
    use crate::ids::{BookId, FormatId};

    fn item(id: &str, title: &str, image: &str, cents: i64) -> CartItemInput {
        CartItemInput {
            product_id: BookId::new("book1"),
            format_id: FormatId::new(id),
            title: title.to_string(),
            author: "Judith Hobson".to_string(),
            unit_price: Money::new(cents, Currency::USD),
            image: image.to_string(),
            format: BookFormat::Paperback,
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let result = SessionRequest::build(
            &CartState::default(),
            &CheckoutState::default(),
            "https://example.com",
        );
        assert_eq!(result.unwrap_err(), CheckoutError::EmptyCart);
    }

    #[test]
    fn test_line_items_and_delivery() {
        let cart = CartState::default()
            .apply(CartCommand::AddItem(item("a", "Book A", "/images/a.jpg", 1399)))
            .apply(CartCommand::AddItem(item("a", "Book A", "/images/a.jpg", 1399)));
        let checkout = CheckoutState::default()
            .apply(CheckoutCommand::SetDeliveryMethod(DeliveryMethod::Standard))
            .apply(CheckoutCommand::SetEmail("reader@example.com".to_string()));

        let request = SessionRequest::build(&cart, &checkout, "https://example.com/").unwrap();

        assert_eq!(request.line_items.len(), 2);
        let book = &request.line_items[0];
        assert_eq!(book.name, "Book A (Paperback)");
        assert_eq!(book.description, "By Judith Hobson");
        assert_eq!(book.image_url.as_deref(), Some("https://example.com/images/a.jpg"));
        assert_eq!(book.quantity, 2);

        let delivery = &request.line_items[1];
        assert_eq!(delivery.name, "Delivery - standard");
        assert_eq!(delivery.unit_amount.amount_cents, 550);

        assert_eq!(request.metadata.total_amount, 2798);
        assert_eq!(request.metadata.delivery_method, "standard");
        assert_eq!(request.metadata.delivery_price, 550);
        assert_eq!(request.customer_email.as_deref(), Some("reader@example.com"));
    }

    #[test]
    fn test_no_delivery_line_without_method() {
        let cart = CartState::default().apply(CartCommand::AddItem(item("a", "A", "", 500)));
        let request =
            SessionRequest::build(&cart, &CheckoutState::default(), "https://example.com").unwrap();
        assert_eq!(request.line_items.len(), 1);
        assert_eq!(request.line_items[0].image_url, None);
        assert_eq!(request.metadata.delivery_method, "none");
        assert_eq!(request.metadata.delivery_price, 0);
        assert_eq!(request.customer_email, None);
    }

    #[test]
    fn test_cart_summary_truncated() {
        let long_title = "x".repeat(200);
        let cart = CartState::default()
            .apply(CartCommand::AddItem(item("a", &long_title, "", 500)));
        let request =
            SessionRequest::build(&cart, &CheckoutState::default(), "https://example.com").unwrap();
        assert_eq!(request.metadata.cart_summary.chars().count(), CART_SUMMARY_LIMIT);
    }

    #[test]
    fn test_metadata_over_limit_rejected() {
        let metadata = SessionMetadata {
            item_count: 1,
            total_amount: 100,
            cart_summary: "y".repeat(METADATA_VALUE_LIMIT + 1),
            delivery_method: "none".to_string(),
            delivery_price: 0,
        };
        assert_eq!(metadata.validate(), Err(SessionFailure::MetadataTooLarge));
    }

    #[test]
    fn test_absolute_image_url() {
        let origin = "https://books.example";
        assert_eq!(absolute_image_url("undefined", origin), None);
        assert_eq!(absolute_image_url("null", origin), None);
        assert_eq!(
            absolute_image_url("https://cdn.example/a.png", origin).as_deref(),
            Some("https://cdn.example/a.png")
        );
        assert_eq!(
            absolute_image_url("images/b.png", origin).as_deref(),
            Some("https://books.example/images/b.png")
        );
    }
}
