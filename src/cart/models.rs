//! Cart Models

use slotmap::new_key_type;

use crate::products::{Kurti, SizeLabel};

new_key_type! {
    /// Cart line key, unique within a cart and generated at insertion.
    pub struct LineKey;
}

/// One (product, size) selection within a cart.
///
/// The kurti is a snapshot taken at add time. `available_stock` is part of
/// that snapshot; it is refreshed only when a new addition merges into this
/// line, never re-queried live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    kurti: Kurti,
    size: SizeLabel,
    quantity: u32,
    unit_price: u64,
    available_stock: u32,
}

impl CartLine {
    pub(crate) fn new(
        kurti: Kurti,
        size: SizeLabel,
        quantity: u32,
        unit_price: u64,
        available_stock: u32,
    ) -> Self {
        Self {
            kurti,
            size,
            quantity,
            unit_price,
            available_stock,
        }
    }

    /// Fold a new addition into this line: quantities sum, the unit price is
    /// overwritten and the stock snapshot is refreshed.
    pub(crate) fn merge(&mut self, merged_quantity: u32, unit_price: u64, available_stock: u32) {
        self.quantity = merged_quantity;
        self.unit_price = unit_price;
        self.available_stock = available_stock;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: u64) {
        self.unit_price = unit_price;
    }

    /// Product snapshot captured when the line was created.
    #[must_use]
    pub fn kurti(&self) -> &Kurti {
        &self.kurti
    }

    /// Selected size.
    #[must_use]
    pub fn size(&self) -> &SizeLabel {
        &self.size
    }

    /// Units selected, always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Agreed unit price in whole rupees, editable independently of the
    /// product's list price.
    #[must_use]
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Stock snapshot for the selected size.
    #[must_use]
    pub fn available_stock(&self) -> u32 {
        self.available_stock
    }

    /// quantity × unit price.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity) * self.unit_price
    }
}
