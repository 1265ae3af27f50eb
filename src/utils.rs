//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutDemoArgs {
    /// Path to a YAML catalog file (defaults to the bundled demo catalog)
    #[clap(short, long)]
    pub catalog: Option<String>,

    /// Number of catalog games to add to the cart
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Market USD to SRD rate; the store markup is added automatically
    #[clap(short, long)]
    pub rate: Option<f64>,
}
