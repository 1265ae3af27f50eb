//! Checkout Demo
//!
//! Loads a catalog, fills a cart, and prints the order summary.
//!
//! Use `-c` to load a YAML catalog file instead of the bundled one
//! Use `-n` to choose how many catalog games go into the cart
//! Use `-r` to supply a market USD to SRD rate for the secondary total

use std::{fs, io};

use anyhow::Result;
use clap::Parser;
use rust_decimal::{Decimal, prelude::FromPrimitive};

use replay::{
    cart::Cart, catalog::Catalog, fx::ExchangeRate, loyalty::LoyaltyAccount,
    receipt::OrderSummary, utils::CheckoutDemoArgs,
};

const DEMO_CATALOG_YAML: &str = include_str!("../fixtures/catalog/demo.yml");

#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutDemoArgs::parse();

    let catalog = match args.catalog.as_deref() {
        Some(path) => Catalog::from_yaml(&fs::read_to_string(path)?)?,
        None => Catalog::from_yaml(DEMO_CATALOG_YAML)?,
    };

    let mut cart = Cart::new();
    let mut loyalty = LoyaltyAccount::new();

    for game in catalog.iter().take(args.n.unwrap_or(3)) {
        cart.add(game);
        loyalty.award(game.price());
    }

    let rate = args
        .rate
        .and_then(Decimal::from_f64)
        .map_or_else(ExchangeRate::fallback, ExchangeRate::from_market_rate);

    OrderSummary::new(&cart)
        .with_display_rate(rate)
        .write_to(io::stdout())?;

    println!(
        "Loyalty: {} points ({} tier)",
        loyalty.points(),
        loyalty.tier()
    );

    Ok(())
}
