//! Replay prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, LineItem},
    catalog::{Catalog, CatalogError, Filter, Game, GameKey, PriceRange, RawGame, RawScore},
    eligibility::{
        BUNDLE_SIZE, FLASH_SALE_MIN_UNITS, FLASH_SALE_SCORE_CEILING, INTRO_SALE_PLATFORM,
        bundle_rate, flash_sale_rate, intro_sale_rate, is_flash_sale_active,
        is_flash_sale_eligible, is_intro_sale_platform, volume_rate,
    },
    fx::ExchangeRate,
    loyalty::{LoyaltyAccount, LoyaltyTier},
    pricing::{CartTotals, compute_totals},
    receipt::{OrderSummary, SummaryError},
    session::{Session, SessionError},
};
