//! Shopping cart collaborator
//!
//! The cart is not part of the ranking core; it is carried here so the
//! UI layer has a typed, serializable model to persist client-side.
//! Lines are keyed by (product id, size) and quantity never drops below 1.

use serde::{Deserialize, Serialize};

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    pub price: f32,
    pub size: String,
    pub qty: u32,
}

/// In-memory cart keyed by (id, size)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit. An existing (id, size) line gains quantity; a new
    /// line starts at quantity 1 regardless of the quantity passed in.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.id == item.id && line.size == item.size)
        {
            existing.qty += 1;
        } else {
            self.items.push(CartItem { qty: 1, ..item });
        }
    }

    /// Remove the (id, size) line entirely
    pub fn remove(&mut self, id: u32, size: &str) {
        self.items.retain(|line| !(line.id == id && line.size == size));
    }

    /// Set a line's quantity. Values below 1 are ignored.
    pub fn update_qty(&mut self, id: u32, size: &str, qty: u32) {
        if qty < 1 {
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.id == id && line.size == size)
        {
            line.qty = qty;
        }
    }

    pub fn total_price(&self) -> f32 {
        self.items.iter().map(|line| line.price * line.qty as f32).sum()
    }
}
