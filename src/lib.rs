//! Replay
//!
//! Replay is the storefront core for a secondhand video-game retailer: a typed product
//! catalog, a shopping cart with overlapping promotional discounts, and a deterministic
//! pricing engine that produces an auditable checkout breakdown.

pub mod cart;
pub mod catalog;
pub mod eligibility;
pub mod fx;
pub mod loyalty;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod utils;
