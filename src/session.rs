//! Session
//!
//! The persisted subset of storefront state: the cart and the loyalty account. The
//! host owns the actual key-value store; this module only defines the snapshot shape
//! and its serialize/deserialize boundary, so no ambient global state is needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, loyalty::LoyaltyAccount};

/// Errors crossing the session persistence boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    /// YAML serialization or parsing error.
    #[error("Failed to read or write session snapshot: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// The state that survives a reload: cart lines and loyalty points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The shopping cart.
    pub cart: Cart,

    /// The loyalty account.
    pub loyalty: LoyaltyAccount,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the snapshot for the external store.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SessionError> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Restore a snapshot previously produced by [`Session::to_yaml`].
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the snapshot cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self, SessionError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::cart::LineItem;

    use super::*;

    #[test]
    fn snapshot_round_trip() -> TestResult {
        let mut session = Session::new();
        session.cart.push(LineItem::new(
            "halo",
            "Halo 5",
            "Xbox One",
            Decimal::new(1550, 2),
            2,
            false,
            false,
        )?);
        session.loyalty.award(Decimal::new(1550, 2));

        let yaml = session.to_yaml()?;
        let restored = Session::from_yaml(&yaml)?;

        assert_eq!(restored, session);
        assert_eq!(restored.loyalty.points(), 155);

        Ok(())
    }

    #[test]
    fn empty_snapshot_parses() -> TestResult {
        let restored = Session::from_yaml(&Session::new().to_yaml()?)?;

        assert!(restored.cart.is_empty());
        assert_eq!(restored.loyalty.points(), 0);

        Ok(())
    }
}
