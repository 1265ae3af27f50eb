//! FX
//!
//! Display-currency conversion. Prices are sold in USD; the storefront also shows an
//! SRD figure derived from a market rate plus a fixed markup. The pricing engine
//! never sees this module; conversion is purely a display concern.

use rust_decimal::Decimal;

/// A USD to SRD display rate with the store markup already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    usd_to_srd: Decimal,
}

impl ExchangeRate {
    /// Fixed markup added on top of the market rate (40 cents).
    fn markup() -> Decimal {
        Decimal::new(40, 2)
    }

    /// The rate used when the market feed is unavailable (36.35 plus markup).
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            usd_to_srd: Decimal::new(3635, 2) + Self::markup(),
        }
    }

    /// Build a display rate from a fetched market rate, adding the markup.
    #[must_use]
    pub fn from_market_rate(rate: Decimal) -> Self {
        Self {
            usd_to_srd: rate + Self::markup(),
        }
    }

    /// The effective USD to SRD rate, markup included.
    #[must_use]
    pub fn usd_to_srd(&self) -> Decimal {
        self.usd_to_srd
    }

    /// Convert a USD amount into the display currency.
    #[must_use]
    pub fn to_display(&self, amount: Decimal) -> Decimal {
        amount * self.usd_to_srd
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_rate_gains_the_markup() {
        let rate = ExchangeRate::from_market_rate(Decimal::from(36));

        assert_eq!(rate.usd_to_srd(), Decimal::new(3640, 2));
    }

    #[test]
    fn fallback_rate_includes_the_markup() {
        assert_eq!(
            ExchangeRate::fallback().usd_to_srd(),
            Decimal::new(3675, 2)
        );
    }

    #[test]
    fn conversion_is_multiplicative() {
        let rate = ExchangeRate::from_market_rate(Decimal::from(36));

        assert_eq!(rate.to_display(Decimal::from(10)), Decimal::from(364));
    }
}
