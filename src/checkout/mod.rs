//! Checkout
//!
//! The checkout orchestrator: validates the session, submits the finalized
//! cart to the sale-recording collaborator and hands the rendered invoice to
//! the print surface.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{CheckoutError, SaleError, UnknownLocation};
pub use models::{
    CheckoutState, CompletedSale, CustomerInfo, Location, SaleConfirmation, SaleLine, SaleRequest,
};
pub use service::{Checkout, InMemoryRecorder, MockSaleRecorder, SaleRecorder};
