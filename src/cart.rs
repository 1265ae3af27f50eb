//! Cart
//!
//! The shopping cart: an ordered collection of line items mutated only through the
//! operations here. The pricing engine reads the cart as an immutable snapshot; in a
//! multi-threaded host, wrap the cart in a single-writer guard so one
//! [`compute_totals`](crate::pricing::compute_totals) call sees a consistent state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::Game,
    eligibility,
    pricing::{CartTotals, compute_totals},
};

/// Errors raised by cart mutation and line item construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// No line with the given id exists in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(String),

    /// Quantities start at one; removing a line is an explicit operation.
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    /// Line items must carry a strictly positive unit price.
    #[error("Unit price must be positive, got {0}")]
    NonPositivePrice(Decimal),
}

/// One SKU in the cart.
///
/// The flash-sale flag is fixed from the product at add time; intro-sale eligibility
/// is derived from the platform at evaluation time and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: String,
    title: String,
    platform: String,
    unit_price: Decimal,
    quantity: u32,
    flash_sale_eligible: bool,
    #[serde(default)]
    bundle_item: bool,
}

impl LineItem {
    /// Create a line item, validating the pricing engine's preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NonPositivePrice`] or [`CartError::ZeroQuantity`] if the
    /// unit price is not strictly positive or the quantity is zero.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        platform: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        flash_sale_eligible: bool,
        bundle_item: bool,
    ) -> Result<Self, CartError> {
        if unit_price <= Decimal::ZERO {
            return Err(CartError::NonPositivePrice(unit_price));
        }

        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        Ok(Self {
            id: id.into(),
            title: title.into(),
            platform: platform.into(),
            unit_price,
            quantity,
            flash_sale_eligible,
            bundle_item,
        })
    }

    /// Build a line item from a catalog game, quantity one.
    ///
    /// Eligibility flags are captured from the product at this instant; `Game`
    /// guarantees a positive price, so this cannot fail.
    fn from_game(game: &Game, bundle_item: bool) -> Self {
        Self {
            id: game.id().to_string(),
            title: game.title().to_string(),
            platform: game.platform().to_string(),
            unit_price: game.price(),
            quantity: 1,
            flash_sale_eligible: eligibility::is_flash_sale_eligible(game),
            bundle_item,
        }
    }

    /// Product id of the line.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform the game was listed under.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Unit price in the source currency.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Units of this SKU in the cart, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether the product was flash-sale eligible when it was added.
    #[must_use]
    pub fn is_flash_sale_eligible(&self) -> bool {
        self.flash_sale_eligible
    }

    /// Whether this line was added through the bundle path.
    #[must_use]
    pub fn is_bundle_item(&self) -> bool {
        self.bundle_item
    }

    /// Intro-sale eligibility, derived from the platform at evaluation time.
    #[must_use]
    pub fn is_intro_sale_eligible(&self) -> bool {
        eligibility::is_intro_sale_platform(&self.platform)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a game.
    ///
    /// Adding a game already in the cart increments its quantity instead of
    /// duplicating the line.
    pub fn add(&mut self, game: &Game) {
        self.add_line(game, false);
    }

    /// Add one unit of each game as a bundle.
    ///
    /// New lines are tagged as bundle items. A game already in the cart keeps its
    /// existing tag and only gains quantity; the tag never changes once set.
    pub fn add_bundle<'g>(&mut self, games: impl IntoIterator<Item = &'g Game>) {
        for game in games {
            self.add_line(game, true);
        }
    }

    fn add_line(&mut self, game: &Game, bundle_item: bool) {
        if let Some(existing) = self.lines.iter_mut().find(|line| line.id == game.id()) {
            existing.quantity += 1;
        } else {
            self.lines.push(LineItem::from_game(game, bundle_item));
        }
    }

    /// Merge a pre-built line item into the cart.
    ///
    /// A line with the same id absorbs the quantity; otherwise the line is appended.
    pub fn push(&mut self, line: LineItem) {
        if let Some(existing) = self.lines.iter_mut().find(|existing| existing.id == line.id) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Remove a line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn remove(&mut self, id: &str) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);

        if self.lines.len() == before {
            return Err(CartError::ItemNotFound(id.to_string()));
        }

        Ok(())
    }

    /// Set the quantity of a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a quantity of zero (use [`Cart::remove`])
    /// or [`CartError::ItemNotFound`] if no line has the given id.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Empty the cart (post-checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart's lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.lines.iter().map(LineItem::quantity).sum()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Compute the checkout breakdown for the current cart state.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        compute_totals(&self.lines)
    }
}
