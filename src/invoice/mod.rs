//! Invoice
//!
//! Pure transformation from a recorded sale plus the pre-submission cart
//! snapshot into a printable text document, and the print-surface collaborator
//! seam that receives it.

use std::fmt::{self, Write};

use jiff::{Timestamp, Zoned};
use mockall::automock;
use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartLine,
    checkout::models::{Location, SaleConfirmation},
};

/// Shop name printed at the top of every invoice.
pub const SHOP_NAME: &str = "RADHE BEAUTIC";

/// Tagline under the shop name.
pub const SHOP_TAGLINE: &str = "Premium Fashion Collection";

/// Time zone invoices are issued in.
pub const SHOP_TZ: &str = "Asia/Kolkata";

/// Errors raised while rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The submitted total does not match the cart snapshot it was built
    /// from. The renderer never recomputes business totals on its own, so a
    /// mismatch means the snapshot and the submission diverged.
    #[error("submitted total {submitted} does not match snapshot total {snapshot}")]
    TotalMismatch {
        /// Grand total echoed by the sale-recording collaborator.
        submitted: u64,

        /// Σ line totals over the cart snapshot.
        snapshot: u64,
    },

    /// The shop time zone could not be resolved.
    #[error(transparent)]
    Time(#[from] jiff::Error),

    /// Formatting into the document buffer failed.
    #[error("failed to format invoice")]
    Format(#[from] fmt::Error),
}

/// Errors raised by the print surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrintError {
    /// The rendering surface could not be opened (the pop-up-blocked case).
    #[error("print surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

/// Print collaborator: receives a rendered document and triggers the print
/// action. Failures must surface to the caller, never be swallowed.
#[automock]
pub trait PrintSurface: Send + Sync {
    /// Open the surface with the given document and trigger printing.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::SurfaceUnavailable`] if the surface cannot be
    /// opened.
    fn open(&self, document: &InvoiceDocument) -> Result<(), PrintError>;
}

/// A rendered, printable invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument(String);

impl InvoiceDocument {
    /// The rendered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session and sale metadata stamped onto the invoice.
#[derive(Debug, Clone)]
pub struct InvoiceMeta {
    /// Invoice number, derived from the sale timestamp.
    pub number: String,

    /// Issue time in the shop's zone.
    pub issued_at: Zoned,

    /// Logged-in seller, if known.
    pub seller: Option<String>,

    /// Shop location the sale was billed against.
    pub location: Location,

    /// Person who created the bill.
    pub bill_created_by: String,

    /// Customer name.
    pub customer_name: String,

    /// Customer phone, if given.
    pub customer_phone: Option<String>,
}

impl InvoiceMeta {
    /// Build metadata for a sale recorded at `sold_at`.
    ///
    /// The invoice number is `INV-<unix millis>` of the sale timestamp, and
    /// the issue time is rendered in [`SHOP_TZ`].
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::Time`] if the shop time zone cannot be
    /// resolved.
    pub fn generate(
        sold_at: Timestamp,
        seller: Option<String>,
        location: Location,
        bill_created_by: String,
        customer_name: String,
        customer_phone: Option<String>,
    ) -> Result<Self, InvoiceError> {
        Ok(Self {
            number: format!("INV-{}", sold_at.as_millisecond()),
            issued_at: sold_at.in_tz(SHOP_TZ)?,
            seller,
            location,
            bill_created_by,
            customer_name,
            customer_phone,
        })
    }
}

/// Render an invoice.
///
/// Pure in the business sense: every figure comes from the confirmation or
/// the snapshot, and the grand total is the submitted one, never recomputed
/// here.
///
/// # Errors
///
/// Returns [`InvoiceError::TotalMismatch`] if the snapshot total disagrees
/// with the confirmation total.
pub fn render(
    confirmation: &SaleConfirmation,
    snapshot: &[CartLine],
    meta: &InvoiceMeta,
) -> Result<InvoiceDocument, InvoiceError> {
    let snapshot_total: u64 = snapshot.iter().map(CartLine::line_total).sum();

    if snapshot_total != confirmation.total {
        return Err(InvoiceError::TotalMismatch {
            submitted: confirmation.total,
            snapshot: snapshot_total,
        });
    }

    let mut out = String::new();

    write_header(&mut out, meta)?;
    out.push_str(&line_table(snapshot));
    write_totals(&mut out, confirmation.total)?;
    write_footer(&mut out)?;

    Ok(InvoiceDocument(out))
}

fn write_header(out: &mut String, meta: &InvoiceMeta) -> fmt::Result {
    writeln!(out, "{SHOP_NAME}")?;
    writeln!(out, "{SHOP_TAGLINE}")?;
    writeln!(out)?;
    writeln!(out, "Invoice #: {}", meta.number)?;
    writeln!(out, "Date:      {}", meta.issued_at.strftime("%d/%m/%Y"))?;
    writeln!(out, "Time:      {}", meta.issued_at.strftime("%H:%M:%S"))?;
    writeln!(out, "Seller:    {}", meta.seller.as_deref().unwrap_or("N/A"))?;
    writeln!(out, "Location:  {}", meta.location)?;
    writeln!(out, "Bill By:   {}", meta.bill_created_by)?;
    writeln!(out)?;
    writeln!(out, "Customer:  {}", meta.customer_name)?;

    if let Some(phone) = &meta.customer_phone {
        writeln!(out, "Phone:     {phone}")?;
    }

    writeln!(out)
}

fn line_table(snapshot: &[CartLine]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Product Code",
        "Category",
        "Size",
        "Quantity",
        "Unit Price",
        "Total",
    ]);

    for line in snapshot {
        builder.push_record([
            line.kurti().code.to_string(),
            line.kurti().category.clone(),
            line.size().to_string(),
            line.quantity().to_string(),
            inr(line.unit_price()),
            inr(line.line_total()),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(3..6), Alignment::right());

    table.to_string()
}

fn write_totals(out: &mut String, total: u64) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "Subtotal:     {}", inr(total))?;
    writeln!(out, "Tax:          {}", inr(0))?;
    writeln!(out, "Total Amount: {}", inr(total))
}

fn write_footer(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "Thank you for your purchase!")?;
    writeln!(out, "Visit us again for more amazing collections")
}

/// Format whole rupees for display.
fn inr(amount: u64) -> String {
    match i64::try_from(amount) {
        Ok(amount) => Money::from_major(amount, iso::INR).to_string(),
        Err(_) => format!("₹{amount}"),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        cart::Cart,
        checkout::models::SaleLine,
        products::{Kurti, KurtiCode, SizeLabel, SizeStock},
    };

    use super::*;

    fn snapshot() -> Result<Vec<CartLine>, Box<dyn std::error::Error>> {
        let kurti = Kurti {
            code: KurtiCode::parse("abc0001")?,
            category: String::from("Anarkali"),
            selling_price: 500,
            images: vec![],
            sizes: vec![SizeStock {
                size: SizeLabel::new("m"),
                quantity: 5,
            }],
        };

        let mut cart = Cart::new();
        cart.add_or_merge(&kurti, &SizeLabel::new("m"), 2, 500)?;

        Ok(cart.snapshot())
    }

    fn confirmation(snapshot: &[CartLine], total: u64) -> SaleConfirmation {
        SaleConfirmation {
            sale_id: Uuid::now_v7(),
            lines: snapshot.iter().map(SaleLine::from_cart_line).collect(),
            total,
        }
    }

    fn meta() -> Result<InvoiceMeta, InvoiceError> {
        InvoiceMeta::generate(
            Timestamp::UNIX_EPOCH,
            Some(String::from("Ravi")),
            Location::Katargam,
            String::from("Counter 1"),
            String::from("Asha Patel"),
            None,
        )
    }

    #[test]
    fn render_includes_every_line_column_uppercased() -> TestResult {
        let snapshot = snapshot()?;
        let document = render(&confirmation(&snapshot, 1000), &snapshot, &meta()?)?;
        let text = document.as_str();

        assert!(text.contains("ABC0001"), "missing uppercased code:\n{text}");
        assert!(text.contains("Anarkali"), "missing category:\n{text}");
        assert!(text.contains(" M "), "missing uppercased size:\n{text}");
        assert!(text.contains(&inr(500)), "missing unit price:\n{text}");
        assert!(text.contains(&inr(1000)), "missing line total:\n{text}");

        Ok(())
    }

    #[test]
    fn render_uses_the_submitted_grand_total() -> TestResult {
        let snapshot = snapshot()?;
        let document = render(&confirmation(&snapshot, 1000), &snapshot, &meta()?)?;

        assert!(
            document
                .as_str()
                .contains(&format!("Total Amount: {}", inr(1000))),
            "missing grand total:\n{document}"
        );

        Ok(())
    }

    #[test]
    fn render_rejects_a_diverging_total() -> TestResult {
        let snapshot = snapshot()?;
        let result = render(&confirmation(&snapshot, 999), &snapshot, &meta()?);

        assert!(
            matches!(
                result,
                Err(InvoiceError::TotalMismatch {
                    submitted: 999,
                    snapshot: 1000,
                })
            ),
            "expected TotalMismatch, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn meta_stamps_invoice_number_and_shop_zone() -> TestResult {
        let meta = meta()?;

        assert_eq!(meta.number, "INV-0");
        // IST is UTC+05:30.
        assert_eq!(meta.issued_at.strftime("%H:%M").to_string(), "05:30");

        Ok(())
    }

    #[test]
    fn seller_falls_back_to_na() -> TestResult {
        let snapshot = snapshot()?;
        let mut meta = meta()?;
        meta.seller = None;

        let document = render(&confirmation(&snapshot, 1000), &snapshot, &meta)?;

        assert!(
            document.as_str().contains("Seller:    N/A"),
            "missing seller fallback:\n{document}"
        );

        Ok(())
    }
}
