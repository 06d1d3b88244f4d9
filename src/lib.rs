//! Kurti POS
//!
//! Cart and checkout core for a small garment retail counter: product lookup,
//! a stock-validated multi-item cart, a checkout state machine and a printable
//! invoice renderer.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod invoice;
pub mod products;
pub mod utils;
