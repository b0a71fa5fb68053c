//! Persistent cart store.

use crate::cart::{CartCommand, CartItem, CartItemInput, CartState, PersistedCart};
use crate::ids::FormatId;
use crate::money::Money;
use crate::persist::Persister;
use bookshelf_cache::Storage;

/// Default storage key for the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cart-state";

/// Owns the cart state for one session and mirrors it to storage.
///
/// Every item-mutating command writes a `{items, total}` snapshot; drawer
/// visibility is never persisted.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    state: CartState,
    persister: Persister<S>,
}

impl<S: Storage> CartStore<S> {
    /// Open the store under the default key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Open the store, restoring any snapshot saved under `key`.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let persister = Persister::new(storage, key);
        let state = persister
            .load::<PersistedCart>()
            .map(CartState::restore)
            .unwrap_or_default();

        tracing::debug!(
            key = persister.key(),
            items = state.items().len(),
            total = %state.total(),
            "cart opened"
        );
        Self { state, persister }
    }

    /// Apply a command and persist if it touched items.
    pub fn dispatch(&mut self, command: CartCommand) -> &CartState {
        let persist = command.mutates_items();
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(command);
        if persist {
            self.persister.save(&self.state.snapshot());
        }
        &self.state
    }

    pub fn add_item(&mut self, input: CartItemInput) -> &CartState {
        self.dispatch(CartCommand::AddItem(input))
    }

    pub fn remove_item(&mut self, format_id: &FormatId) -> &CartState {
        self.dispatch(CartCommand::RemoveItem(format_id.clone()))
    }

    pub fn update_quantity(&mut self, format_id: &FormatId, quantity: i64) -> &CartState {
        self.dispatch(CartCommand::UpdateQuantity {
            format_id: format_id.clone(),
            quantity,
        })
    }

    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartCommand::Clear)
    }

    pub fn toggle_open(&mut self) -> &CartState {
        self.dispatch(CartCommand::ToggleOpen)
    }

    pub fn close(&mut self) -> &CartState {
        self.dispatch(CartCommand::Close)
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    pub fn total(&self) -> Money {
        self.state.total()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Whether a write has failed and persistence is switched off.
    pub fn is_degraded(&self) -> bool {
        self.persister.is_degraded()
    }

    /// Flush a final snapshot and release the storage.
    pub fn dispose(mut self) -> S {
        self.persister.save(&self.state.snapshot());
        self.persister.into_storage()
    }
}
