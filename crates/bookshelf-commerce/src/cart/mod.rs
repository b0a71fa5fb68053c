//! Shopping cart module.
//!
//! Contains the cart line items, the pure cart reducer and the persistent
//! cart store.

mod item;
mod state;
mod store;

pub use item::{CartItem, CartItemInput, MAX_QUANTITY_PER_ITEM};
pub use state::{CartCommand, CartState, PersistedCart};
pub use store::{CartStore, CART_STORAGE_KEY};
