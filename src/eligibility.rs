//! Promotion eligibility
//!
//! Pure predicates and step tables shared by the pricing engine and the storefront.
//! Every rate and threshold used by [`crate::pricing`] lives here, so the discount
//! policy can be audited in one place.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::catalog::Game;

/// Games with a Metacritic score strictly below this are flash-sale eligible.
pub const FLASH_SALE_SCORE_CEILING: u32 = 70;

/// Minimum flash-eligible, non-bundle units in the cart before the flash sale activates.
pub const FLASH_SALE_MIN_UNITS: u32 = 3;

/// The platform whose games qualify for the intro sale.
pub const INTRO_SALE_PLATFORM: &str = "Xbox One";

/// Percentage points added to the intro-sale rate per eligible unit.
pub const INTRO_SALE_STEP_POINTS: u32 = 5;

/// The intro-sale rate stops growing past this many eligible units (55%).
pub const INTRO_SALE_MAX_STEPS: u32 = 11;

/// A bundle discount applies only to a cart of exactly this many bundle-tagged lines.
///
/// This matches the one promotional bundle the storefront sells (three related games
/// plus the current game). Carts of any other shape get no bundle discount at all.
pub const BUNDLE_SIZE: usize = 4;

/// Whether a game qualifies for the flash sale.
///
/// Games without a Metacritic score never qualify.
#[must_use]
pub fn is_flash_sale_eligible(game: &Game) -> bool {
    game.metacritic_score()
        .is_some_and(|score| score < FLASH_SALE_SCORE_CEILING)
}

/// Whether a platform name qualifies for the intro sale.
///
/// Checked against the line item's platform at evaluation time, never cached.
#[must_use]
pub fn is_intro_sale_platform(platform: &str) -> bool {
    platform == INTRO_SALE_PLATFORM
}

/// Whether the flash sale is active for the given count of flash-eligible units.
#[must_use]
pub fn is_flash_sale_active(flash_eligible_units: u32) -> bool {
    flash_eligible_units >= FLASH_SALE_MIN_UNITS
}

/// The flat flash-sale rate (25%), applied per line while the sale is active.
#[must_use]
pub fn flash_sale_rate() -> Percentage {
    Percentage::from(Decimal::new(25, 2))
}

/// Intro-sale rate for the given count of intro-eligible units.
///
/// One unit earns 5%, each further unit another 5 percentage points, capped at 55%.
#[must_use]
pub fn intro_sale_rate(intro_units: u32) -> Percentage {
    let steps = intro_units.min(INTRO_SALE_MAX_STEPS);

    Percentage::from(Decimal::new(i64::from(steps * INTRO_SALE_STEP_POINTS), 2))
}

/// Volume-discount rate for the given count of units across the whole cart.
#[must_use]
pub fn volume_rate(total_units: u32) -> Percentage {
    let points = match total_units {
        0 | 1 => 0,
        2 => 5,
        3 | 4 => 10,
        _ => 20,
    };

    Percentage::from(Decimal::new(points, 2))
}

/// The bundle discount rate (15%), applied to the bundle subtotal.
#[must_use]
pub fn bundle_rate() -> Percentage {
    Percentage::from(Decimal::new(15, 2))
}
