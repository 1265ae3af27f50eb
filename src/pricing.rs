//! Pricing
//!
//! The cart pricing engine. [`compute_totals`] is a total, side-effect-free function
//! from a cart snapshot to a [`CartTotals`] breakdown; it never mutates its input and
//! never fails on well-formed line items (construction validates the preconditions).
//!
//! Discount precedence is a deliberate business policy, applied in this order:
//!
//! 1. Bundle-tagged lines are carved out first; they never join the flash, intro, or
//!    volume buckets.
//! 2. The intro-sale tier is sized from intro-eligible non-bundle units.
//! 3. The flash sale activates at three flash-eligible non-bundle units.
//! 4. Lines eligible for both promotions take whichever single discount is larger;
//!    an item's discount is never split across buckets.
//! 5. The volume tier is sized from the whole cart, but applies only to non-bundle
//!    lines outside the intro bucket and outside an *active* flash sale.
//! 6. The bundle discount is all-or-nothing: exactly four bundle lines and nothing
//!    else, or no bundle discount at all.
//!
//! All arithmetic stays in [`Decimal`] with no intermediate rounding; rounding to two
//! places is a display concern (see [`crate::receipt`]).

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    cart::LineItem,
    eligibility::{
        BUNDLE_SIZE, bundle_rate, flash_sale_rate, intro_sale_rate, is_flash_sale_active,
        volume_rate,
    },
};

/// The checkout breakdown for one cart snapshot.
///
/// Recomputed on every query; never persisted. Each discount field is the sum of the
/// amounts attributed to that bucket, so `subtotal - (sum of discounts) == total`
/// unless the total was clamped at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartTotals {
    /// Sum of unit price times quantity over the whole cart, bundle lines included.
    pub subtotal: Decimal,

    /// Amount attributed to the flash sale. Zero while the sale is inactive.
    pub flash_sale_discount: Decimal,

    /// Amount attributed to the intro sale.
    pub intro_sale_discount: Decimal,

    /// Amount attributed to the volume discount.
    pub volume_discount: Decimal,

    /// Amount attributed to the bundle discount.
    pub bundle_discount: Decimal,

    /// Whether the flash sale threshold was met.
    pub flash_sale_active: bool,

    /// Flash-eligible, non-bundle units counted towards activation.
    pub flash_sale_eligible_count: u32,

    /// Grand total after all discounts, clamped at zero.
    pub total: Decimal,
}

impl CartTotals {
    /// Total amount saved against the subtotal.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.subtotal - self.total
    }

    /// Savings as a fraction of the subtotal; zero for an empty cart.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        if self.subtotal.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(self.savings() / self.subtotal)
    }
}

/// Compute the checkout breakdown for a cart snapshot.
///
/// Line order is irrelevant to the result, the input is never mutated, and an empty
/// cart yields all-zero totals with the flash sale inactive.
#[must_use]
pub fn compute_totals(lines: &[LineItem]) -> CartTotals {
    let subtotal: Decimal = lines.iter().map(LineItem::line_total).sum();

    // Bundle lines are settled separately; everything else competes for the
    // flash/intro/volume buckets.
    let non_bundle: SmallVec<[&LineItem; 8]> = lines
        .iter()
        .filter(|line| !line.is_bundle_item())
        .collect();

    let intro_units: u32 = non_bundle
        .iter()
        .filter(|line| line.is_intro_sale_eligible())
        .map(|line| line.quantity())
        .sum();
    let intro_rate = intro_sale_rate(intro_units);

    let flash_sale_eligible_count: u32 = non_bundle
        .iter()
        .filter(|line| line.is_flash_sale_eligible())
        .map(|line| line.quantity())
        .sum();
    let flash_sale_active = is_flash_sale_active(flash_sale_eligible_count);

    let mut flash_sale_discount = Decimal::ZERO;
    let mut intro_sale_discount = Decimal::ZERO;

    for line in &non_bundle {
        let line_total = line.line_total();

        let intro_candidate = line
            .is_intro_sale_eligible()
            .then(|| intro_rate * line_total);
        let flash_candidate = (flash_sale_active && line.is_flash_sale_eligible())
            .then(|| flash_sale_rate() * line_total);

        // Dual-eligible lines take the single better deal; ties go to the flash bucket.
        match (intro_candidate, flash_candidate) {
            (Some(intro), Some(flash)) if intro > flash => intro_sale_discount += intro,
            (_, Some(flash)) => flash_sale_discount += flash,
            (Some(intro), None) => intro_sale_discount += intro,
            (None, None) => {}
        }
    }

    // The volume tier is driven by every unit in the cart, bundles included, but the
    // base it applies to is narrower: non-bundle lines outside the intro bucket, and
    // outside the flash bucket only while the flash sale is actually active.
    let total_units: u32 = lines.iter().map(LineItem::quantity).sum();
    let volume_base: Decimal = non_bundle
        .iter()
        .filter(|line| {
            !line.is_intro_sale_eligible()
                && !(flash_sale_active && line.is_flash_sale_eligible())
        })
        .map(|line| line.line_total())
        .sum();
    let volume_discount = volume_rate(total_units) * volume_base;

    // All-or-nothing: a pure bundle of exactly BUNDLE_SIZE lines, or nothing.
    let bundle_discount = if non_bundle.is_empty() && lines.len() == BUNDLE_SIZE {
        bundle_rate() * subtotal
    } else {
        Decimal::ZERO
    };

    let discounts =
        flash_sale_discount + intro_sale_discount + volume_discount + bundle_discount;
    let total = (subtotal - discounts).max(Decimal::ZERO);

    CartTotals {
        subtotal,
        flash_sale_discount,
        intro_sale_discount,
        volume_discount,
        bundle_discount,
        flash_sale_active,
        flash_sale_eligible_count,
        total,
    }
}
