//! Pure cart state and its command reducer.

use crate::cart::{CartItem, CartItemInput, MAX_QUANTITY_PER_ITEM};
use crate::ids::FormatId;
use crate::money::{Currency, Money, STORE_CURRENCY};
use serde::{Deserialize, Serialize};

/// Commands accepted by the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a format, creating the line if needed.
    AddItem(CartItemInput),
    /// Remove a line entirely.
    RemoveItem(FormatId),
    /// Set a line's quantity; zero or less removes it.
    UpdateQuantity { format_id: FormatId, quantity: i64 },
    /// Remove all lines.
    Clear,
    /// Flip drawer visibility.
    ToggleOpen,
    /// Hide the drawer.
    Close,
}

impl CartCommand {
    /// Whether this command can change items or total.
    pub fn mutates_items(&self) -> bool {
        !matches!(self, CartCommand::ToggleOpen | CartCommand::Close)
    }
}

/// Snapshot written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCart {
    pub items: Vec<CartItem>,
    pub total: Money,
}

/// Cart contents plus drawer visibility.
///
/// `total` always equals the sum of line totals; only [`CartState::apply`]
/// and [`CartState::restore`] build states, and both recompute it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartState {
    items: Vec<CartItem>,
    total: Money,
    is_open: bool,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(STORE_CURRENCY)
    }
}

impl CartState {
    /// An empty, closed cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
            is_open: false,
        }
    }

    /// Rebuild a state from a stored snapshot.
    ///
    /// The result is always priced in [`STORE_CURRENCY`]. The stored total
    /// is ignored and recomputed. Lines with a non-positive quantity or
    /// another currency are dropped.
    pub fn restore(snapshot: PersistedCart) -> Self {
        let currency = STORE_CURRENCY;
        let items = snapshot
            .items
            .into_iter()
            .filter(|item| item.quantity > 0 && item.unit_price.currency == currency)
            .map(|mut item| {
                item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                item
            })
            .collect();

        let mut state = Self {
            items,
            total: Money::zero(currency),
            is_open: false,
        };
        state.recompute_total();
        state
    }

    pub fn snapshot(&self) -> PersistedCart {
        PersistedCart {
            items: self.items.clone(),
            total: self.total,
        }
    }

    /// Apply a command, returning the next state.
    pub fn apply(mut self, command: CartCommand) -> Self {
        match command {
            CartCommand::AddItem(input) => {
                if input.unit_price.currency != self.total.currency {
                    tracing::warn!(
                        format_id = %input.format_id,
                        expected = %self.total.currency,
                        got = %input.unit_price.currency,
                        "ignoring item priced in another currency"
                    );
                    return self;
                }
                match self.items.iter_mut().find(|i| i.format_id == input.format_id) {
                    Some(existing) => {
                        existing.quantity = (existing.quantity + 1).min(MAX_QUANTITY_PER_ITEM);
                    }
                    None => self.items.push(CartItem::from_input(input)),
                }
            }
            CartCommand::RemoveItem(format_id) => {
                self.items.retain(|i| i.format_id != format_id);
            }
            CartCommand::UpdateQuantity {
                format_id,
                quantity,
            } => {
                if quantity <= 0 {
                    self.items.retain(|i| i.format_id != format_id);
                } else if let Some(item) = self.items.iter_mut().find(|i| i.format_id == format_id) {
                    item.quantity = quantity.min(MAX_QUANTITY_PER_ITEM);
                }
            }
            CartCommand::Clear => self.items.clear(),
            CartCommand::ToggleOpen => self.is_open = !self.is_open,
            CartCommand::Close => self.is_open = false,
        }
        self.recompute_total();
        self
    }

    fn recompute_total(&mut self) {
        let line_totals: Vec<Money> = self.items.iter().map(CartItem::line_total).collect();
        self.total = Money::saturating_sum(line_totals.iter(), self.total.currency);
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn currency(&self) -> Currency {
        self.total.currency
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by format id.
    pub fn item(&self, format_id: &FormatId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.format_id == format_id)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BookFormat;
    use crate::ids::BookId;

    fn input(format_id: &str, cents: i64) -> CartItemInput {
        CartItemInput {
            product_id: BookId::new("book1"),
            format_id: FormatId::new(format_id),
            title: "Book".to_string(),
            author: "Author".to_string(),
            unit_price: Money::new(cents, Currency::USD),
            image: String::new(),
            format: BookFormat::Paperback,
        }
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("b-p", 1399)))
            .apply(CartCommand::AddItem(input("b-p", 1399)));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total().amount_cents, 2798);
    }

    #[test]
    fn test_update_quantity() {
        let id = FormatId::new("b-p");
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("b-p", 1000)))
            .apply(CartCommand::UpdateQuantity {
                format_id: id.clone(),
                quantity: 5,
            });
        assert_eq!(state.item_count(), 5);
        assert_eq!(state.total().amount_cents, 5000);
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let id = FormatId::new("b-p");
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("b-p", 1000)))
            .apply(CartCommand::UpdateQuantity {
                format_id: id,
                quantity: 0,
            });
        assert!(state.is_empty());
        assert!(state.total().is_zero());
    }

    #[test]
    fn test_update_absent_item_is_noop() {
        let before = CartState::default().apply(CartCommand::AddItem(input("a", 1000)));
        let after = before.clone().apply(CartCommand::UpdateQuantity {
            format_id: FormatId::new("missing"),
            quantity: 3,
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_item() {
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("a", 1000)))
            .apply(CartCommand::AddItem(input("b", 2000)))
            .apply(CartCommand::RemoveItem(FormatId::new("a")));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.total().amount_cents, 2000);
    }

    #[test]
    fn test_toggle_and_close_keep_items() {
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("a", 1000)))
            .apply(CartCommand::ToggleOpen);
        assert!(state.is_open());
        let state = state.apply(CartCommand::Close);
        assert!(!state.is_open());
        assert_eq!(state.total().amount_cents, 1000);
        assert!(!CartCommand::Close.mutates_items());
        assert!(CartCommand::Clear.mutates_items());
    }

    #[test]
    fn test_quantity_limit() {
        let state = CartState::default()
            .apply(CartCommand::AddItem(input("a", 100)))
            .apply(CartCommand::UpdateQuantity {
                format_id: FormatId::new("a"),
                quantity: i64::MAX,
            });
        assert_eq!(state.items()[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_foreign_currency_is_ignored() {
        let mut euro = input("eu", 1000);
        euro.unit_price = Money::new(1000, Currency::EUR);
        let state = CartState::default().apply(CartCommand::AddItem(euro));
        assert!(state.is_empty());
    }

    #[test]
    fn test_restore_recomputes_total() {
        let mut item = CartItem::from_input(input("a", 1399));
        item.quantity = 2;
        let mut zero = CartItem::from_input(input("z", 500));
        zero.quantity = 0;

        let state = CartState::restore(PersistedCart {
            items: vec![item, zero],
            total: Money::new(1, Currency::USD),
        });

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.total().amount_cents, 2798);
        assert!(!state.is_open());
    }

    #[test]
    fn test_restore_uses_store_currency() {
        let mut euro = CartItem::from_input(input("eu", 1000));
        euro.unit_price = Money::new(1000, Currency::EUR);

        let state = CartState::restore(PersistedCart {
            items: vec![euro, CartItem::from_input(input("a", 1399))],
            total: Money::new(2399, Currency::EUR),
        });

        assert_eq!(state.currency(), STORE_CURRENCY);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.total(), Money::new(1399, STORE_CURRENCY));

        let state = state.apply(CartCommand::AddItem(input("b", 500)));
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.total().amount_cents, 1899);
    }
}
