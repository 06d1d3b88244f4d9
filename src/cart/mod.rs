//! Cart
//!
//! The cart aggregate: an insertion-ordered sequence of [`CartLine`]s, unique
//! by (product code, size). Adding a duplicate (product, size) merges into the
//! existing line instead of appending a second one; the merge index makes that
//! invariant structural and O(1).

pub mod errors;
pub mod models;

pub use errors::CartError;
pub use models::{CartLine, LineKey};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::products::{Kurti, KurtiCode, SizeLabel};

/// Cart aggregate.
///
/// Invariants held at all times:
/// - every line has `quantity >= 1`, `unit_price >= 1` and
///   `quantity <= available_stock`;
/// - at most one line per (product code, size);
/// - iteration order is insertion order, and merging preserves the original
///   line's position.
#[derive(Debug, Default)]
pub struct Cart {
    lines: SlotMap<LineKey, CartLine>,
    order: SmallVec<[LineKey; 8]>,
    index: FxHashMap<(KurtiCode, SizeLabel), LineKey>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a (product, size) selection, merging into an existing line for the
    /// same (code, size) if one is present.
    ///
    /// On merge the quantities are summed, the unit price is overwritten and
    /// the stock snapshot is refreshed from the incoming product record. The
    /// stock check is check-then-act: a failing call leaves the cart
    /// completely unmodified.
    ///
    /// Returns the key of the created or merged line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if `quantity` is 0.
    /// - [`CartError::InvalidPrice`] if `unit_price` is 0.
    /// - [`CartError::UnknownSize`] if the product does not declare `size`.
    /// - [`CartError::InsufficientStock`] if the quantity (summed with the
    ///   existing line's quantity on merge) exceeds the product's stock for
    ///   that size.
    pub fn add_or_merge(
        &mut self,
        kurti: &Kurti,
        size: &SizeLabel,
        quantity: u32,
        unit_price: u64,
    ) -> Result<LineKey, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if unit_price == 0 {
            return Err(CartError::InvalidPrice);
        }

        let stock = kurti.stock_for(size).ok_or_else(|| CartError::UnknownSize {
            code: kurti.code.clone(),
            size: size.clone(),
        })?;

        let index_key = (kurti.code.clone(), size.clone());

        if let Some(&line_key) = self.index.get(&index_key) {
            let line = self.lines.get_mut(line_key).ok_or(CartError::UnknownLine)?;

            let merged = line
                .quantity()
                .checked_add(quantity)
                .filter(|&merged| merged <= stock)
                .ok_or(CartError::InsufficientStock {
                    requested: line.quantity().saturating_add(quantity),
                    available: stock,
                })?;

            line.merge(merged, unit_price, stock);

            return Ok(line_key);
        }

        if quantity > stock {
            return Err(CartError::InsufficientStock {
                requested: quantity,
                available: stock,
            });
        }

        let line = CartLine::new(kurti.clone(), size.clone(), quantity, unit_price, stock);
        let line_key = self.lines.insert(line);

        self.order.push(line_key);
        self.index.insert(index_key, line_key);

        Ok(line_key)
    }

    /// Change a line's quantity. A quantity of 0 removes the line, matching
    /// [`Cart::remove_line`] exactly.
    ///
    /// # Errors
    ///
    /// - [`CartError::InsufficientStock`] if `new_quantity` exceeds the line's
    ///   stock snapshot; the line is left unmodified.
    /// - [`CartError::UnknownLine`] if the key does not refer to a line.
    pub fn update_quantity(&mut self, line: LineKey, new_quantity: u32) -> Result<(), CartError> {
        if new_quantity == 0 {
            self.remove_line(line);
            return Ok(());
        }

        let entry = self.lines.get_mut(line).ok_or(CartError::UnknownLine)?;

        if new_quantity > entry.available_stock() {
            return Err(CartError::InsufficientStock {
                requested: new_quantity,
                available: entry.available_stock(),
            });
        }

        entry.set_quantity(new_quantity);

        Ok(())
    }

    /// Change a line's unit price.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidPrice`] if `new_price` is 0.
    /// - [`CartError::UnknownLine`] if the key does not refer to a line.
    pub fn update_price(&mut self, line: LineKey, new_price: u64) -> Result<(), CartError> {
        if new_price == 0 {
            return Err(CartError::InvalidPrice);
        }

        let entry = self.lines.get_mut(line).ok_or(CartError::UnknownLine)?;

        entry.set_unit_price(new_price);

        Ok(())
    }

    /// Remove a line. Removing an absent line is a no-op, not an error.
    pub fn remove_line(&mut self, line: LineKey) {
        if let Some(removed) = self.lines.remove(line) {
            self.order.retain(|key| *key != line);
            self.index
                .remove(&(removed.kurti().code.clone(), removed.size().clone()));
        }
    }

    /// Σ quantity × unit price over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.iter().map(CartLine::line_total).sum()
    }

    /// Empty the cart. Used after a successful checkout or an explicit reset.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
        self.index.clear();
    }

    /// Get a line by key.
    #[must_use]
    pub fn get(&self, line: LineKey) -> Option<&CartLine> {
        self.lines.get(line)
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.order.iter().filter_map(|&key| self.lines.get(key))
    }

    /// Clone the current lines, in order. Taken just before submission so the
    /// invoice reflects exactly what was sold.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.iter().cloned().collect()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
