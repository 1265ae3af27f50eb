//! Receipt
//!
//! The display seam: renders a cart and its [`CartTotals`] breakdown as a plain-text
//! order summary. Monetary rounding to two places happens here and only here; the
//! engine itself never rounds.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::Cart, fx::ExchangeRate, pricing::CartTotals};

/// Errors that can occur while writing an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The underlying writer failed.
    #[error("Failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// A printable order summary for one cart snapshot.
#[derive(Debug)]
pub struct OrderSummary<'a> {
    cart: &'a Cart,
    totals: CartTotals,
    display_rate: Option<ExchangeRate>,
}

impl<'a> OrderSummary<'a> {
    /// Build a summary for the cart's current state.
    #[must_use]
    pub fn new(cart: &'a Cart) -> Self {
        Self {
            cart,
            totals: cart.totals(),
            display_rate: None,
        }
    }

    /// Also show the grand total in the secondary display currency.
    #[must_use]
    pub fn with_display_rate(mut self, rate: ExchangeRate) -> Self {
        self.display_rate = Some(rate);
        self
    }

    /// The breakdown this summary was built from.
    #[must_use]
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Write the item table and totals block.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for line in self.cart.lines() {
            builder.push_record([
                line.title().to_string(),
                line.quantity().to_string(),
                usd(line.unit_price()),
                usd(line.line_total()),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        self.write_totals_block(&mut out)?;

        Ok(())
    }

    fn write_totals_block(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let totals = &self.totals;

        writeln!(out, "Subtotal:        {}", usd(totals.subtotal))?;

        if totals.flash_sale_active {
            writeln!(
                out,
                "Flash sale:     -{} ({} eligible)",
                usd(totals.flash_sale_discount),
                totals.flash_sale_eligible_count,
            )?;
        }

        if !totals.intro_sale_discount.is_zero() {
            writeln!(out, "Intro sale:     -{}", usd(totals.intro_sale_discount))?;
        }

        if !totals.volume_discount.is_zero() {
            writeln!(out, "Volume:         -{}", usd(totals.volume_discount))?;
        }

        if !totals.bundle_discount.is_zero() {
            writeln!(out, "Bundle:         -{}", usd(totals.bundle_discount))?;
        }

        writeln!(out, "Total:           {}", usd(totals.total))?;

        if let Some(rate) = self.display_rate {
            writeln!(out, "Total (SRD):     {}", srd(rate.to_display(totals.total)))?;
        }

        Ok(())
    }
}

/// Format a USD amount, rounding to cents for display.
fn usd(amount: Decimal) -> String {
    Money::from_decimal(display_round(amount), iso::USD).to_string()
}

/// Format an SRD amount, rounding to cents for display.
fn srd(amount: Decimal) -> String {
    Money::from_decimal(display_round(amount), iso::SRD).to_string()
}

fn display_round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
