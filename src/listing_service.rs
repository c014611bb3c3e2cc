// src/listing_service.rs

use chrono::Utc;
use rusqlite::params;

use crate::db::connection::Database;
use crate::db::listings;
use crate::domain::conditions::{ConditionGrade, ConditionMap};
use crate::domain::platforms::{Platform, PlatformCatalog};
use crate::domain::pricing::is_profitable;
use crate::errors::StoreError;

/// Outcome of asking a platform to accept one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAttempt {
    Listed,
    Rejected(String),
}

/// External listing collaborator: the party that actually pushes a phone
/// onto a marketplace. Injected so stores and tests can substitute their
/// own behavior.
pub trait ListingService {
    fn attempt_list(&self, phone_id: i64, platform: &Platform) -> ListAttempt;
}

/// Listing service that accepts everything. Useful as a test double and
/// as the default until a real platform API client exists.
pub struct AcceptAll;

impl ListingService for AcceptAll {
    fn attempt_list(&self, _phone_id: i64, _platform: &Platform) -> ListAttempt {
        ListAttempt::Listed
    }
}

/// Attempts to list every eligible phone on one platform: unlisted, in
/// stock, condition supported there, and clearing the margin threshold.
/// Returns how many the service accepted and were marked listed.
pub fn bulk_list(
    db: &Database,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
    platform_code: &str,
    service: &dyn ListingService,
    min_margin: f64,
) -> Result<usize, StoreError> {
    let platform = catalog.get(platform_code).ok_or(StoreError::NotFound)?;

    let candidates: Vec<(i64, f64, ConditionGrade)> =
        db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT p.id, p.base_price, p.condition
                     FROM phones p
                     JOIN platform_listings pl ON p.id = pl.phone_id
                     WHERE pl.platform = ?1 AND pl.listed = 0 AND p.stock_quantity > 0",
                )
                .map_err(|e| StoreError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![platform_code], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .map_err(|e| StoreError::DbError(e.to_string()))?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row.map_err(|e| StoreError::DbError(e.to_string()))?);
            }
            Ok(out)
        })?;

    let mut listed_count = 0;
    for (phone_id, base_price, condition) in candidates {
        if conditions.map(condition, platform_code).is_none() {
            continue;
        }
        if !is_profitable(base_price, platform, min_margin) {
            continue;
        }

        match service.attempt_list(phone_id, platform) {
            ListAttempt::Listed => {
                listings::mark_listed(db, phone_id, platform_code, Utc::now().naive_utc())?;
                listed_count += 1;
            }
            ListAttempt::Rejected(reason) => {
                eprintln!("Platform {platform_code} rejected phone {phone_id}: {reason}");
            }
        }
    }

    Ok(listed_count)
}
