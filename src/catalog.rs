//! Catalog
//!
//! The typed product catalog and its normalization boundary. Records arrive from the
//! hosted backend in a loosely typed row shape ([`RawGame`]); everything past this
//! module only ever sees well-typed [`Game`] values, so the pricing engine never has
//! to re-validate prices or scores.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Game Key
    pub struct GameKey;
}

/// Errors raised while normalizing or indexing catalog records.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error.
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A record's price was missing, non-finite, or not strictly positive.
    #[error("Game {id}: invalid price {value}")]
    InvalidPrice {
        /// Backend id of the offending record.
        id: String,
        /// The rejected price value.
        value: f64,
    },

    /// A record's Metacritic score could not be read as a non-negative integer.
    #[error("Game {id}: invalid Metacritic score {value:?}")]
    InvalidScore {
        /// Backend id of the offending record.
        id: String,
        /// The rejected score text.
        value: String,
    },

    /// Two records share the same id.
    #[error("Duplicate game id: {0}")]
    DuplicateId(String),
}

/// A normalized catalog product.
///
/// Construction goes through [`Game::new`] or [`TryFrom<RawGame>`], both of which
/// enforce a strictly positive price.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: String,
    title: String,
    platform: String,
    genre: Option<String>,
    sub_genre: Option<String>,
    game_modes: Vec<String>,
    price: Decimal,
    metacritic_score: Option<u32>,
}

impl Game {
    /// Create a new game with the given id, title, platform and price.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] if the price is not strictly positive.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        platform: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, CatalogError> {
        let id = id.into();

        if price <= Decimal::ZERO {
            return Err(CatalogError::InvalidPrice {
                id,
                value: price.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            platform: platform.into(),
            genre: None,
            sub_genre: None,
            game_modes: Vec::new(),
            price,
            metacritic_score: None,
        })
    }

    /// Set the genre.
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the sub-genre.
    #[must_use]
    pub fn with_sub_genre(mut self, sub_genre: impl Into<String>) -> Self {
        self.sub_genre = Some(sub_genre.into());
        self
    }

    /// Set the game modes.
    #[must_use]
    pub fn with_game_modes(mut self, game_modes: impl Into<Vec<String>>) -> Self {
        self.game_modes = game_modes.into();
        self
    }

    /// Set the Metacritic score.
    #[must_use]
    pub fn with_metacritic_score(mut self, score: u32) -> Self {
        self.metacritic_score = Some(score);
        self
    }

    /// Backend id of the game.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform name, e.g. `"Xbox One"`.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Genre, if the backend provided one.
    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// Sub-genre, if the backend provided one.
    #[must_use]
    pub fn sub_genre(&self) -> Option<&str> {
        self.sub_genre.as_deref()
    }

    /// Supported game modes.
    #[must_use]
    pub fn game_modes(&self) -> &[String] {
        &self.game_modes
    }

    /// Asking price in the source currency. Always strictly positive.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Metacritic score, if the backend provided one.
    #[must_use]
    pub fn metacritic_score(&self) -> Option<u32> {
        self.metacritic_score
    }
}

/// A raw catalog row as returned by the backend.
///
/// Field names mirror the backend columns; the score field is loosely typed at the
/// source and may arrive as a number, a numeric string, or null.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGame {
    /// Backend id.
    pub id: String,

    /// Display title.
    #[serde(rename = "Game_Title")]
    pub title: String,

    /// Platform name.
    #[serde(rename = "Platform")]
    pub platform: String,

    /// Genre.
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,

    /// Sub-genre.
    #[serde(rename = "Sub_Genre", default)]
    pub sub_genre: Option<String>,

    /// Supported game modes.
    #[serde(rename = "Game_Modes", default)]
    pub game_modes: Vec<String>,

    /// Asking price.
    #[serde(rename = "Price_to_Sell_For")]
    pub price: f64,

    /// Loosely typed Metacritic score.
    #[serde(rename = "Metacritic_Score", default)]
    pub metacritic_score: Option<RawScore>,
}

/// The backend stores scores inconsistently; accept every shape it produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    /// A plain integer score.
    Int(i64),

    /// A floating-point score.
    Float(f64),

    /// A score serialized as text, possibly empty.
    Text(String),
}

impl TryFrom<RawGame> for Game {
    type Error = CatalogError;

    fn try_from(raw: RawGame) -> Result<Self, Self::Error> {
        let price = Decimal::from_f64(raw.price)
            .filter(|price| *price > Decimal::ZERO)
            .ok_or(CatalogError::InvalidPrice {
                id: raw.id.clone(),
                value: raw.price,
            })?;

        let metacritic_score = normalize_score(&raw.id, raw.metacritic_score)?;

        Ok(Game {
            id: raw.id,
            title: raw.title,
            platform: raw.platform,
            genre: raw.genre,
            sub_genre: raw.sub_genre,
            game_modes: raw.game_modes,
            price,
            metacritic_score,
        })
    }
}

/// Normalize a loosely typed score into an optional non-negative integer.
///
/// Empty or whitespace-only text means "no score", matching the backend's habit of
/// blanking the column instead of nulling it.
fn normalize_score(id: &str, raw: Option<RawScore>) -> Result<Option<u32>, CatalogError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let invalid = |value: String| CatalogError::InvalidScore {
        id: id.to_string(),
        value,
    };

    match raw {
        RawScore::Int(score) => u32::try_from(score)
            .map(Some)
            .map_err(|_| invalid(score.to_string())),
        RawScore::Float(score) => Decimal::from_f64(score)
            .filter(|dec| dec.fract().is_zero())
            .and_then(|dec| dec.to_u32())
            .map(Some)
            .ok_or_else(|| invalid(score.to_string())),
        RawScore::Text(text) => {
            let trimmed = text.trim();

            if trimmed.is_empty() {
                return Ok(None);
            }

            trimmed.parse::<u32>().map(Some).map_err(|_| invalid(text))
        }
    }
}

/// Price range filter bounds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// Lower bound.
    pub min: Decimal,

    /// Upper bound.
    pub max: Decimal,
}

/// Catalog browse filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Exact platform match.
    pub platform: Option<String>,

    /// Exact genre match.
    pub genre: Option<String>,

    /// Exact sub-genre match.
    pub sub_genre: Option<String>,

    /// Every listed mode must be supported by the game.
    pub game_modes: Vec<String>,

    /// Inclusive price bounds.
    pub price_range: Option<PriceRange>,
}

impl Filter {
    /// Whether a game passes every populated filter field.
    #[must_use]
    pub fn matches(&self, game: &Game) -> bool {
        if let Some(platform) = self.platform.as_deref() {
            if game.platform() != platform {
                return false;
            }
        }

        if let Some(genre) = self.genre.as_deref() {
            if game.genre() != Some(genre) {
                return false;
            }
        }

        if let Some(sub_genre) = self.sub_genre.as_deref() {
            if game.sub_genre() != Some(sub_genre) {
                return false;
            }
        }

        if !self
            .game_modes
            .iter()
            .all(|mode| game.game_modes().contains(mode))
        {
            return false;
        }

        if let Some(range) = self.price_range {
            if game.price() < range.min || game.price() > range.max {
                return false;
            }
        }

        true
    }
}

/// The product catalog: normalized games indexed by key and by backend id.
#[derive(Debug, Default)]
pub struct Catalog {
    games: SlotMap<GameKey, Game>,
    by_id: FxHashMap<String, GameKey>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw backend records, normalizing each one.
    ///
    /// # Errors
    ///
    /// Returns the first normalization failure, or [`CatalogError::DuplicateId`] if
    /// two records share an id.
    pub fn from_records(records: impl IntoIterator<Item = RawGame>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for record in records {
            catalog.insert(Game::try_from(record)?)?;
        }

        Ok(catalog)
    }

    /// Build a catalog from a YAML document containing a list of raw records.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML cannot be parsed or a record fails
    /// normalization.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawGame> = serde_norway::from_str(yaml)?;

        Self::from_records(records)
    }

    /// Insert an already-normalized game.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if a game with the same id exists.
    pub fn insert(&mut self, game: Game) -> Result<GameKey, CatalogError> {
        if self.by_id.contains_key(game.id()) {
            return Err(CatalogError::DuplicateId(game.id().to_string()));
        }

        let id = game.id().to_string();
        let key = self.games.insert(game);
        self.by_id.insert(id, key);

        Ok(key)
    }

    /// Look up a game by key.
    #[must_use]
    pub fn get(&self, key: GameKey) -> Option<&Game> {
        self.games.get(key)
    }

    /// Look up a game by backend id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Game> {
        self.by_id.get(id).and_then(|key| self.games.get(*key))
    }

    /// Iterate over all games.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Number of games in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// All games passing the given filter.
    #[must_use]
    pub fn filter(&self, filter: &Filter) -> Vec<&Game> {
        self.iter().filter(|game| filter.matches(game)).collect()
    }

    /// Case-insensitive title substring search.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Game> {
        let query = query.to_lowercase();

        self.iter()
            .filter(|game| game.title().to_lowercase().contains(&query))
            .collect()
    }
}
