//! Refurbished-phone resale engine.
//!
//! Tracks an inventory of refurbished phones and computes, per unit, the
//! price and eligibility for listing on third-party resale platforms with
//! distinct fee structures and condition vocabularies. Inventory lives in
//! SQLite; bulk ingestion accepts CSV files with per-row validation.

pub mod db;
pub mod domain;
pub mod errors;
pub mod import;
pub mod listing_service;

#[cfg(test)]
mod tests;

pub use db::connection::{init_db, Database};
pub use domain::conditions::{ConditionGrade, ConditionMap};
pub use domain::platforms::{FeeModel, Platform, PlatformCatalog};
pub use domain::pricing::{is_profitable, platform_price, profit_margin, DEFAULT_MIN_MARGIN};
pub use errors::StoreError;
pub use import::{import_phones, ImportError, ImportReport};
