//! Shared types and models for Stocky
//!
//! This crate holds the inventory domain shared between the backend and the
//! browser frontend (via WASM): the product ledger rules, the movement journal
//! rules and the read-side aggregations used by dashboards.

pub mod aggregation;
pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;

pub use aggregation::*;
pub use ledger::*;
pub use models::*;
pub use types::*;
pub use validation::*;
