// src/domain/listing.rs

use chrono::NaiveDateTime;
use serde::Serialize;

use super::conditions::{ConditionGrade, ConditionMap};
use super::platforms::PlatformCatalog;
use super::pricing::{platform_price, PricingError};

/// One row of the platform_listings table: the state of one phone on one
/// platform. `platform_condition` is `None` exactly when the phone's grade
/// has no mapping for the platform; such a row is never marked listed.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformListing {
    pub phone_id: i64,
    pub platform: String,
    pub listed: bool,
    pub platform_price: f64,
    pub platform_condition: Option<String>,
    pub listing_date: Option<NaiveDateTime>,
}

/// A listing row computed before its phone has an id: the derived price
/// and mapped condition for one platform. Used by create, update, and
/// bulk import to populate platform_listings.
#[derive(Debug, Clone)]
pub struct ListingSeed {
    pub platform: String,
    pub platform_price: f64,
    pub platform_condition: Option<String>,
}

/// Derives one seed per catalog platform for a phone with the given base
/// price and grade. Listings start unlisted.
pub fn seed_listings(
    base_price: f64,
    condition: ConditionGrade,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
) -> Result<Vec<ListingSeed>, PricingError> {
    let mut seeds = Vec::with_capacity(catalog.platforms().len());
    for platform in catalog.platforms() {
        seeds.push(ListingSeed {
            platform: platform.code.clone(),
            platform_price: platform_price(base_price, platform)?,
            platform_condition: conditions
                .map(condition, &platform.code)
                .map(str::to_string),
        });
    }
    Ok(seeds)
}

/// Per-platform totals for the platform overview.
#[derive(Debug, Serialize)]
pub struct PlatformSummary {
    pub name: String,
    pub total_phones: i64,
    pub listed_phones: i64,
    /// Average price of currently listed phones, rounded to cents.
    pub avg_price: f64,
    /// Human-readable fee structure, e.g. "10%" or "8% + $2".
    pub fee_structure: String,
}
