//! Utils

use clap::Parser;

/// Arguments for the sell demo
#[derive(Debug, Parser)]
pub struct SellDemoArgs {
    /// Fixture set to use for the product catalogue
    #[clap(short, long, default_value = "catalogue")]
    pub fixture: String,

    /// Customer name on the bill
    #[clap(short, long, default_value = "Walk-in Customer")]
    pub customer: String,

    /// Shop location for the sale
    #[clap(short, long, default_value = "Katargam")]
    pub location: String,

    /// Name of the person creating the bill
    #[clap(short, long, default_value = "Counter 1")]
    pub bill_by: String,
}
