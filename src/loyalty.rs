//! Loyalty
//!
//! The storefront's loyalty program: points accrue as games are added to the cart,
//! and the account tier is derived from lifetime points.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// Lifetime points needed for the Silver tier.
pub const SILVER_THRESHOLD: u64 = 500;

/// Lifetime points needed for the Gold tier.
pub const GOLD_THRESHOLD: u64 = 2_000;

/// Lifetime points needed for the Platinum tier.
pub const PLATINUM_THRESHOLD: u64 = 5_000;

/// Points awarded per added unit: ten points per unit of price, rounded down.
#[must_use]
pub fn points_for(unit_price: Decimal) -> u64 {
    (unit_price * Decimal::TEN).floor().to_u64().unwrap_or(0)
}

/// Loyalty tiers, ordered from entry level upwards.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LoyaltyTier {
    /// Entry tier.
    #[default]
    Bronze,

    /// 500+ lifetime points.
    Silver,

    /// 2000+ lifetime points.
    Gold,

    /// 5000+ lifetime points.
    Platinum,
}

impl LoyaltyTier {
    /// The tier earned by the given lifetime points.
    #[must_use]
    pub fn for_points(points: u64) -> Self {
        if points >= PLATINUM_THRESHOLD {
            Self::Platinum
        } else if points >= GOLD_THRESHOLD {
            Self::Gold
        } else if points >= SILVER_THRESHOLD {
            Self::Silver
        } else {
            Self::Bronze
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        };

        write!(f, "{name}")
    }
}

/// A customer's loyalty account. Part of the persisted session subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    points: u64,
}

impl LoyaltyAccount {
    /// Create an account with no points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifetime points.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Current tier, derived from lifetime points.
    #[must_use]
    pub fn tier(&self) -> LoyaltyTier {
        LoyaltyTier::for_points(self.points)
    }

    /// Award points for one added unit at the given price; returns the points added.
    pub fn award(&mut self, unit_price: Decimal) -> u64 {
        let earned = points_for(unit_price);
        self.points = self.points.saturating_add(earned);

        earned
    }
}
