//! Local shopping cart
//!
//! Held in memory for the lifetime of a customer session. There is no
//! checkout endpoint, so nothing here talks to the backend.

use crate::shared::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Add one unit, merging with an existing line for the same product
    pub fn add(&mut self, product: &Product) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.item_id == product.item_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Zero removes the line
    pub fn set_quantity(&mut self, item_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, item_id: i64) {
        self.lines.retain(|line| line.product.item_id != item_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
