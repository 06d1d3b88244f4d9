//! Checkout errors.

use thiserror::Error;

use crate::invoice::InvoiceError;

/// Errors returned by the sale-recording collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// The collaborator rejected the sale with a business error. The message
    /// is surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The collaborator could not be reached or failed mid-request.
    #[error("sale submission failed: {0}")]
    Transport(String),
}

/// An unrecognized shop location string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown location: {0}")]
pub struct UnknownLocation(pub String);

/// Errors raised by [`Checkout::submit`](crate::checkout::Checkout::submit).
///
/// The validation variants never contact the sale-recording collaborator;
/// all of them are recoverable by correcting the input and resubmitting.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty; add products before submitting")]
    EmptyCart,

    /// Customer name is required.
    #[error("customer name is required")]
    MissingCustomerName,

    /// A shop location must be selected.
    #[error("location is required")]
    MissingLocation,

    /// The bill-creator name is required.
    #[error("bill creator name is required")]
    MissingBillCreator,

    /// A submission is already in flight for this session; the duplicate is
    /// refused without a second collaborator call.
    #[error("a submission is already in progress")]
    SubmitInProgress,

    /// The sale-recording collaborator failed; the cart is left untouched.
    #[error(transparent)]
    Sale(#[from] SaleError),

    /// The invoice could not be rendered from the recorded sale.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}
