//! Cart errors.

use thiserror::Error;

use crate::products::{KurtiCode, SizeLabel};

/// Errors raised by cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The selected size is not declared by the product.
    #[error("size {size} is not offered for product {code}")]
    UnknownSize {
        /// Product code.
        code: KurtiCode,

        /// Rejected size label.
        size: SizeLabel,
    },

    /// Quantity must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Unit price must be at least 1 rupee.
    #[error("unit price must be at least 1")]
    InvalidPrice,

    /// The requested quantity exceeds the stock snapshot for the line's size.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity that was asked for (summed on merge).
        requested: u32,

        /// Stock snapshot for the size.
        available: u32,
    },

    /// The line key does not refer to a line in this cart.
    #[error("no such line in cart")]
    UnknownLine,
}
