//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Number of demo products to add to the cart
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Delivery option tag: standard, express or same-day
    #[clap(short, long, default_value = "standard")]
    pub delivery: String,

    /// Use the signed-in demo shopper's default saved address
    #[clap(short, long)]
    pub saved_address: bool,
}
