//! Sell Demo
//!
//! Walks a full counter session against the fixture catalogue: look up a few
//! kurtis, fill the cart, submit the sale to an in-memory recorder and print
//! the invoice to stdout.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c`, `-l` and `-b` to set the customer, location and bill creator

use anyhow::Result;
use clap::Parser;

use kurti_pos::{
    checkout::{Checkout, InMemoryRecorder, Location},
    fixtures::Fixture,
    invoice::{InvoiceDocument, PrintError, PrintSurface},
    products::{KurtiCode, ProductLookup, SizeLabel},
    utils::SellDemoArgs,
};

/// Prints invoices to stdout.
#[derive(Debug)]
struct ConsoleSurface;

impl PrintSurface for ConsoleSurface {
    #[expect(clippy::print_stdout, reason = "Example code")]
    fn open(&self, document: &InvoiceDocument) -> Result<(), PrintError> {
        println!("{document}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
#[expect(clippy::print_stdout, reason = "Example code")]
async fn main() -> Result<()> {
    let args = SellDemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let catalogue = fixture.catalogue();
    let location: Location = args.location.parse()?;

    let checkout =
        Checkout::new(InMemoryRecorder::new(), ConsoleSurface).with_seller("Demo Seller");

    {
        let mut customer = checkout.customer_mut();

        customer.name = args.customer.clone();
        customer.location = Some(location);
        customer.bill_created_by = args.bill_by.clone();
    }

    let anarkali = catalogue.find(KurtiCode::parse("RB2101A")?).await?;
    let straight = catalogue.find(KurtiCode::parse("rb2102b")?).await?;

    {
        let mut cart = checkout.cart_mut();

        cart.add_or_merge(&anarkali, &SizeLabel::new("M"), 2, anarkali.selling_price)?;
        cart.add_or_merge(&straight, &SizeLabel::new("XXL"), 1, 400)?;
        // Same product and size again: merges into the first line.
        cart.add_or_merge(&anarkali, &SizeLabel::new("m"), 1, anarkali.selling_price)?;

        println!("Cart: {} lines, total {}", cart.len(), cart.total());
    }

    let completed = checkout.submit().await?;

    println!("Recorded sale {}", completed.confirmation.sale_id);

    Ok(())
}
