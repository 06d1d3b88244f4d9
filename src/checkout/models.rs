//! Checkout Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::CartLine,
    checkout::errors::UnknownLocation,
    invoice::{InvoiceDocument, PrintError},
    products::SizeLabel,
};

/// Shop locations a sale can be billed against. A fixed enumerated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Katargam branch.
    Katargam,

    /// Amroli branch.
    Amroli,

    /// Mota Varachha branch.
    #[serde(rename = "Mota Varachha")]
    MotaVarachha,
}

impl Location {
    /// All selectable locations, in display order.
    pub const ALL: [Location; 3] = [Location::Katargam, Location::Amroli, Location::MotaVarachha];
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Location::Katargam => "Katargam",
            Location::Amroli => "Amroli",
            Location::MotaVarachha => "Mota Varachha",
        })
    }
}

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLocation(s.trim().to_owned()))
    }
}

/// Customer and sale metadata entered at the counter.
///
/// Fields are free-form as typed; they are trimmed and validated during
/// submission, not on entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Customer name (required).
    pub name: String,

    /// Customer phone (optional).
    pub phone: Option<String>,

    /// Selected shop location (required).
    pub location: Option<Location>,

    /// Name of the person creating the bill (required).
    pub bill_created_by: String,
}

impl CustomerInfo {
    /// Reset all fields, as after a successful checkout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One finalized line as submitted to the sale-recording collaborator.
///
/// `code` is the external API's compound key: the uppercased product code
/// concatenated with the uppercased size label. Size is not a separate column
/// in the persisted sale, so it still travels alongside for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Compound key, e.g. `ABC0001M`.
    pub code: String,

    /// Size label.
    pub size: SizeLabel,

    /// Units sold.
    pub quantity: u32,

    /// Agreed unit price in whole rupees.
    pub unit_price: u64,
}

impl SaleLine {
    /// Build the submitted line for a cart line.
    #[must_use]
    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            code: format!("{}{}", line.kurti().code, line.size()),
            size: line.size().clone(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
        }
    }
}

/// The finalized sale as submitted to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRequest {
    /// Finalized line items.
    pub lines: Vec<SaleLine>,

    /// Trimmed customer name.
    pub customer_name: String,

    /// Trimmed customer phone, omitted if blank.
    pub customer_phone: Option<String>,

    /// Shop location.
    pub location: Location,

    /// Trimmed bill-creator name.
    pub bill_created_by: String,

    /// Grand total as computed by the cart at submission time.
    pub total: u64,

    /// Sale timestamp.
    pub sold_at: Timestamp,
}

/// The collaborator's echo of a successfully recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfirmation {
    /// Identifier assigned by the collaborator.
    pub sale_id: Uuid,

    /// Echo of the submitted lines.
    pub lines: Vec<SaleLine>,

    /// Echo of the submitted grand total.
    pub total: u64,
}

/// Everything produced by a successful submission.
#[derive(Debug)]
pub struct CompletedSale {
    /// The collaborator's confirmation.
    pub confirmation: SaleConfirmation,

    /// The rendered invoice.
    pub invoice: InvoiceDocument,

    /// Set when the print surface could not be opened. The sale itself is
    /// committed either way; the caller decides how to re-print.
    pub print_error: Option<PrintError>,
}

/// Checkout orchestrator states.
///
/// `Completed` and `Failed` are terminal per attempt: the next submission may
/// begin from either, so they double as "idle with a known last outcome".
/// Only `Submitting` blocks a new submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No submission attempted yet, or explicitly reset.
    #[default]
    Idle,

    /// Input validation in progress.
    Validating,

    /// Waiting on the sale-recording collaborator.
    Submitting,

    /// Last attempt succeeded.
    Completed,

    /// Last attempt failed.
    Failed,
}
