//! Checkout orchestrator.

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    sync::Mutex,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    cart::{Cart, CartLine},
    checkout::{
        errors::{CheckoutError, SaleError},
        models::{CheckoutState, CompletedSale, CustomerInfo, SaleConfirmation, SaleLine, SaleRequest},
    },
    invoice::{self, InvoiceDocument, InvoiceMeta, PrintSurface},
};

/// Sale-recording collaborator: persists a finalized sale (decrementing stock
/// on its side) or rejects it with a business error.
#[automock]
#[async_trait]
pub trait SaleRecorder: Send + Sync {
    /// Record the sale.
    ///
    /// # Errors
    ///
    /// Returns a [`SaleError`] when the backend rejects the sale or cannot
    /// be reached.
    async fn record(&self, request: SaleRequest) -> Result<SaleConfirmation, SaleError>;
}

/// In-memory sale recorder for the demo and for tests.
///
/// Confirms every sale with a fresh id unless constructed with a canned
/// rejection.
#[derive(Debug, Default)]
pub struct InMemoryRecorder {
    ledger: Mutex<Vec<SaleRequest>>,
    rejection: Option<String>,
}

impl InMemoryRecorder {
    /// Create a recorder that confirms every sale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that rejects every sale with the given message.
    #[must_use]
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            ledger: Mutex::new(Vec::new()),
            rejection: Some(message.into()),
        }
    }

    /// Sales recorded so far.
    #[must_use]
    pub fn sales(&self) -> Vec<SaleRequest> {
        match self.ledger.lock() {
            Ok(ledger) => ledger.clone(),
            Err(_poisoned) => Vec::new(),
        }
    }
}

#[async_trait]
impl SaleRecorder for InMemoryRecorder {
    async fn record(&self, request: SaleRequest) -> Result<SaleConfirmation, SaleError> {
        if let Some(message) = &self.rejection {
            return Err(SaleError::Rejected(message.clone()));
        }

        let confirmation = SaleConfirmation {
            sale_id: Uuid::now_v7(),
            lines: request.lines.clone(),
            total: request.total,
        };

        self.ledger
            .lock()
            .map_err(|_poisoned| SaleError::Transport(String::from("sale ledger poisoned")))?
            .push(request);

        Ok(confirmation)
    }
}

/// Checkout orchestrator for one counter session.
///
/// Owns the cart and the customer fields for the session. Everything runs on
/// a single logical thread, so mutation goes through `RefCell`/`Cell` rather
/// than locks; the `Submitting` state doubles as the double-click debounce
/// guard.
#[derive(Debug)]
pub struct Checkout<R, S> {
    cart: RefCell<Cart>,
    customer: RefCell<CustomerInfo>,
    state: Cell<CheckoutState>,
    recorder: R,
    surface: S,
    seller: Option<String>,
}

impl<R: SaleRecorder, S: PrintSurface> Checkout<R, S> {
    /// Create a session with an empty cart.
    #[must_use]
    pub fn new(recorder: R, surface: S) -> Self {
        Self {
            cart: RefCell::new(Cart::new()),
            customer: RefCell::new(CustomerInfo::default()),
            state: Cell::new(CheckoutState::Idle),
            recorder,
            surface,
            seller: None,
        }
    }

    /// Attach the logged-in seller's name for the invoice.
    #[must_use]
    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    /// Borrow the session cart.
    pub fn cart(&self) -> Ref<'_, Cart> {
        self.cart.borrow()
    }

    /// Mutably borrow the session cart.
    pub fn cart_mut(&self) -> RefMut<'_, Cart> {
        self.cart.borrow_mut()
    }

    /// Borrow the customer fields.
    pub fn customer(&self) -> Ref<'_, CustomerInfo> {
        self.customer.borrow()
    }

    /// Mutably borrow the customer fields.
    pub fn customer_mut(&self) -> RefMut<'_, CustomerInfo> {
        self.customer.borrow_mut()
    }

    /// Current orchestrator state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state.get()
    }

    /// The sale-recording collaborator.
    #[must_use]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Validate the session, submit the sale, render and print the invoice.
    ///
    /// Validation short-circuits in order: cart non-empty, customer name,
    /// location, bill-creator name; a failure returns to `Idle` without any
    /// collaborator call. A recorder failure leaves the cart and customer
    /// fields untouched for a user-initiated retry. On success the cart is
    /// cleared, the customer fields are reset and the invoice is handed to
    /// the print surface; a surface failure is reported in
    /// [`CompletedSale::print_error`], it never un-commits the sale.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]. `SubmitInProgress` is returned immediately when
    /// a previous submission is still awaiting the recorder.
    #[tracing::instrument(skip(self), fields(
        lines = tracing::field::Empty,
        total = tracing::field::Empty,
        location = tracing::field::Empty,
    ))]
    pub async fn submit(&self) -> Result<CompletedSale, CheckoutError> {
        if self.state.get() == CheckoutState::Submitting {
            warn!("duplicate submit refused; a submission is already in progress");
            return Err(CheckoutError::SubmitInProgress);
        }

        self.state.set(CheckoutState::Validating);

        let request = match self.build_request() {
            Ok(request) => request,
            Err(error) => {
                self.state.set(CheckoutState::Idle);
                return Err(error);
            }
        };

        let snapshot = self.cart.borrow().snapshot();

        let span = tracing::Span::current();
        span.record("lines", request.lines.len());
        span.record("total", request.total);
        span.record("location", tracing::field::display(request.location));

        self.state.set(CheckoutState::Submitting);
        info!("submitting sale");

        let confirmation = match self.recorder.record(request.clone()).await {
            Ok(confirmation) => confirmation,
            Err(error) => {
                self.state.set(CheckoutState::Failed);
                warn!(error = %error, "sale submission failed");
                return Err(CheckoutError::Sale(error));
            }
        };

        let invoice = match self.render_invoice(&confirmation, &request, &snapshot) {
            Ok(invoice) => invoice,
            Err(error) => {
                self.state.set(CheckoutState::Failed);
                warn!(error = %error, "invoice rendering failed");
                return Err(error);
            }
        };

        self.cart.borrow_mut().clear();
        self.customer.borrow_mut().reset();

        let print_error = self.surface.open(&invoice).err();

        if let Some(error) = &print_error {
            warn!(error = %error, "invoice print surface unavailable");
        }

        self.state.set(CheckoutState::Completed);
        info!(sale_id = %confirmation.sale_id, "sale completed");

        Ok(CompletedSale {
            confirmation,
            invoice,
            print_error,
        })
    }

    fn render_invoice(
        &self,
        confirmation: &SaleConfirmation,
        request: &SaleRequest,
        snapshot: &[CartLine],
    ) -> Result<InvoiceDocument, CheckoutError> {
        let meta = InvoiceMeta::generate(
            request.sold_at,
            self.seller.clone(),
            request.location,
            request.bill_created_by.clone(),
            request.customer_name.clone(),
            request.customer_phone.clone(),
        )?;

        Ok(invoice::render(confirmation, snapshot, &meta)?)
    }

    fn build_request(&self) -> Result<SaleRequest, CheckoutError> {
        let cart = self.cart.borrow();

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = self.customer.borrow();
        let customer_name = customer.name.trim();

        if customer_name.is_empty() {
            return Err(CheckoutError::MissingCustomerName);
        }

        let location = customer.location.ok_or(CheckoutError::MissingLocation)?;
        let bill_created_by = customer.bill_created_by.trim();

        if bill_created_by.is_empty() {
            return Err(CheckoutError::MissingBillCreator);
        }

        let customer_phone = customer
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(str::to_owned);

        Ok(SaleRequest {
            lines: cart.iter().map(SaleLine::from_cart_line).collect(),
            customer_name: customer_name.to_owned(),
            customer_phone,
            location,
            bill_created_by: bill_created_by.to_owned(),
            total: cart.total(),
            sold_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        checkout::models::Location,
        invoice::{MockPrintSurface, PrintError},
        products::{Kurti, KurtiCode, SizeLabel, SizeStock},
    };

    use super::*;

    fn kurti() -> Result<Kurti, crate::products::LookupError> {
        Ok(Kurti {
            code: KurtiCode::parse("abc0001")?,
            category: String::from("Anarkali"),
            selling_price: 500,
            images: vec![],
            sizes: vec![SizeStock {
                size: SizeLabel::new("M"),
                quantity: 5,
            }],
        })
    }

    fn echoing_recorder() -> MockSaleRecorder {
        let mut recorder = MockSaleRecorder::new();

        recorder.expect_record().returning(|request| {
            Ok(SaleConfirmation {
                sale_id: Uuid::now_v7(),
                lines: request.lines.clone(),
                total: request.total,
            })
        });

        recorder
    }

    fn open_surface() -> MockPrintSurface {
        let mut surface = MockPrintSurface::new();

        surface.expect_open().returning(|_| Ok(()));

        surface
    }

    fn fill_customer(checkout: &Checkout<impl SaleRecorder, impl PrintSurface>) {
        let mut customer = checkout.customer_mut();

        customer.name = String::from("Asha Patel");
        customer.phone = Some(String::from("9876543210"));
        customer.location = Some(Location::Katargam);
        customer.bill_created_by = String::from("Counter 1");
    }

    #[tokio::test]
    async fn empty_cart_fails_before_any_collaborator_call() {
        let mut recorder = MockSaleRecorder::new();
        recorder.expect_record().never();

        let checkout = Checkout::new(recorder, MockPrintSurface::new());
        fill_customer(&checkout);

        let result = checkout.submit().await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(checkout.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn validation_short_circuits_in_field_order() -> TestResult {
        let checkout = Checkout::new(MockSaleRecorder::new(), MockPrintSurface::new());

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 1, 500)?;

        // Name first.
        let result = checkout.submit().await;
        assert!(matches!(result, Err(CheckoutError::MissingCustomerName)));

        // A whitespace-only name is still missing.
        checkout.customer_mut().name = String::from("   ");
        let result = checkout.submit().await;
        assert!(matches!(result, Err(CheckoutError::MissingCustomerName)));

        checkout.customer_mut().name = String::from("Asha Patel");
        let result = checkout.submit().await;
        assert!(matches!(result, Err(CheckoutError::MissingLocation)));

        checkout.customer_mut().location = Some(Location::Amroli);
        let result = checkout.submit().await;
        assert!(matches!(result, Err(CheckoutError::MissingBillCreator)));

        assert_eq!(checkout.state(), CheckoutState::Idle);
        assert_eq!(checkout.cart().len(), 1, "validation must not touch the cart");

        Ok(())
    }

    #[tokio::test]
    async fn successful_submit_clears_the_session() -> TestResult {
        let checkout = Checkout::new(echoing_recorder(), open_surface()).with_seller("Ravi");

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 2, 500)?;
        fill_customer(&checkout);

        let completed = checkout.submit().await?;

        assert_eq!(completed.confirmation.total, 1000);
        assert!(completed.print_error.is_none());
        assert!(completed.invoice.as_str().contains("ABC0001"));
        assert!(checkout.cart().is_empty(), "cart must be cleared on success");
        assert_eq!(
            *checkout.customer(),
            CustomerInfo::default(),
            "customer fields must reset on success"
        );
        assert_eq!(checkout.state(), CheckoutState::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn submitted_lines_use_the_compound_code_key() -> TestResult {
        let mut recorder = MockSaleRecorder::new();

        recorder
            .expect_record()
            .withf(|request| {
                request.lines.len() == 1
                    && request.lines.first().map(|line| line.code.as_str()) == Some("ABC0001M")
            })
            .returning(|request| {
                Ok(SaleConfirmation {
                    sale_id: Uuid::now_v7(),
                    lines: request.lines.clone(),
                    total: request.total,
                })
            });

        let checkout = Checkout::new(recorder, open_surface());

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("m"), 2, 500)?;
        fill_customer(&checkout);

        checkout.submit().await?;

        Ok(())
    }

    #[tokio::test]
    async fn recorder_rejection_surfaces_verbatim_and_keeps_the_cart() -> TestResult {
        let rejection = "Insufficient stock for ABC0001M";
        let checkout = Checkout::new(InMemoryRecorder::rejecting(rejection), open_surface());

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 2, 500)?;
        fill_customer(&checkout);

        let result = checkout.submit().await;

        match result {
            Err(CheckoutError::Sale(error)) => assert_eq!(error.to_string(), rejection),
            other => return Err(format!("expected Sale error, got {other:?}").into()),
        }

        assert_eq!(checkout.cart().len(), 1, "cart must survive a rejection");
        assert_eq!(checkout.cart().total(), 1000);
        assert_eq!(checkout.customer().name, "Asha Patel");
        assert_eq!(checkout.state(), CheckoutState::Failed);

        Ok(())
    }

    #[tokio::test]
    async fn print_failure_is_reported_but_does_not_uncommit_the_sale() -> TestResult {
        let mut surface = MockPrintSurface::new();

        surface.expect_open().returning(|_| {
            Err(PrintError::SurfaceUnavailable(String::from(
                "blocked by pop-up blocker",
            )))
        });

        let checkout = Checkout::new(echoing_recorder(), surface);

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 1, 500)?;
        fill_customer(&checkout);

        let completed = checkout.submit().await?;

        assert!(
            matches!(
                completed.print_error,
                Some(PrintError::SurfaceUnavailable(_))
            ),
            "print failure must be reported"
        );
        assert!(checkout.cart().is_empty(), "sale is committed either way");
        assert_eq!(checkout.state(), CheckoutState::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn blank_phone_is_omitted_from_the_request() -> TestResult {
        let recorder = InMemoryRecorder::new();
        let checkout = Checkout::new(recorder, open_surface());

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 1, 500)?;
        fill_customer(&checkout);
        checkout.customer_mut().phone = Some(String::from("   "));

        checkout.submit().await?;

        let sales = checkout.recorder.sales();

        assert_eq!(sales.len(), 1);
        assert_eq!(
            sales.first().and_then(|sale| sale.customer_phone.clone()),
            None,
            "blank phone must be omitted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn in_memory_recorder_keeps_a_ledger() -> TestResult {
        let checkout = Checkout::new(InMemoryRecorder::new(), open_surface());

        checkout
            .cart_mut()
            .add_or_merge(&kurti()?, &SizeLabel::new("M"), 2, 450)?;
        fill_customer(&checkout);

        checkout.submit().await?;

        let recorder = checkout.recorder;
        let sales = recorder.sales();

        assert_eq!(sales.len(), 1);
        assert_eq!(sales.first().map(|sale| sale.total), Some(900));
        assert_eq!(
            sales.first().and_then(|sale| sale.customer_phone.as_deref()),
            Some("9876543210")
        );

        Ok(())
    }
}
