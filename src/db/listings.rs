//! Listing store: per-platform listing rows keyed by (phone, platform),
//! plus the platform-level maintenance operations built on them.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

use crate::db::connection::Database;
use crate::domain::listing::{PlatformListing, PlatformSummary};
use crate::domain::platforms::PlatformCatalog;
use crate::domain::pricing::platform_price;
use crate::errors::StoreError;

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<PlatformListing> {
    Ok(PlatformListing {
        phone_id: row.get(0)?,
        platform: row.get(1)?,
        listed: row.get(2)?,
        platform_price: row.get(3)?,
        platform_condition: row.get(4)?,
        listing_date: row.get(5)?,
    })
}

const LISTING_COLUMNS: &str =
    "phone_id, platform, listed, platform_price, platform_condition, listing_date";

pub(crate) fn listings_for_phone_conn(
    conn: &Connection,
    phone_id: i64,
) -> Result<Vec<PlatformListing>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LISTING_COLUMNS} FROM platform_listings
             WHERE phone_id = ?1 ORDER BY platform"
        ))
        .map_err(|e| StoreError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![phone_id], listing_from_row)
        .map_err(|e| StoreError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| StoreError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn listings_for_phone(
    db: &Database,
    phone_id: i64,
) -> Result<Vec<PlatformListing>, StoreError> {
    db.with_conn(|conn| listings_for_phone_conn(conn, phone_id))
}

pub fn get_listing(
    db: &Database,
    phone_id: i64,
    platform_code: &str,
) -> Result<PlatformListing, StoreError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!(
                "SELECT {LISTING_COLUMNS} FROM platform_listings
                 WHERE phone_id = ?1 AND platform = ?2"
            ),
            params![phone_id, platform_code],
            listing_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            other => StoreError::DbError(other.to_string()),
        })
    })
}

/// Marks a listing as live on its platform, stamping the listing date.
///
/// Refuses rows whose platform condition is unsupported (NULL): those can
/// never be listed.
pub fn mark_listed(
    db: &Database,
    phone_id: i64,
    platform_code: &str,
    when: NaiveDateTime,
) -> Result<(), StoreError> {
    db.with_conn(|conn| {
        let updated = conn
            .execute(
                "UPDATE platform_listings
                 SET listed = 1, listing_date = ?1
                 WHERE phone_id = ?2 AND platform = ?3 AND platform_condition IS NOT NULL",
                params![when, phone_id, platform_code],
            )
            .map_err(|e| StoreError::DbError(e.to_string()))?;
        if updated == 0 {
            return Err(StoreError::InvalidInput(format!(
                "phone {phone_id} cannot be listed on platform {platform_code}: \
                 no listing row or unsupported condition"
            )));
        }
        Ok(())
    })
}

/// Recomputes platform prices for every phone on one platform from the
/// current base prices. Returns the number of rows refreshed.
pub fn refresh_platform_prices(
    db: &Database,
    catalog: &PlatformCatalog,
    platform_code: &str,
) -> Result<usize, StoreError> {
    let platform = catalog.get(platform_code).ok_or(StoreError::NotFound)?;

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let phones: Vec<(i64, f64)> = {
            let mut stmt = tx
                .prepare(
                    "SELECT p.id, p.base_price
                     FROM phones p
                     JOIN platform_listings pl ON p.id = pl.phone_id
                     WHERE pl.platform = ?1",
                )
                .map_err(|e| StoreError::DbError(e.to_string()))?;
            let rows = stmt
                .query_map(params![platform_code], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
                .map_err(|e| StoreError::DbError(e.to_string()))?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row.map_err(|e| StoreError::DbError(e.to_string()))?);
            }
            out
        };

        let mut refreshed = 0;
        for (phone_id, base_price) in phones {
            let new_price = platform_price(base_price, platform)?;
            tx.execute(
                "UPDATE platform_listings SET platform_price = ?1
                 WHERE phone_id = ?2 AND platform = ?3",
                params![new_price, phone_id, platform_code],
            )
            .map_err(|e| StoreError::DbError(e.to_string()))?;
            refreshed += 1;
        }

        tx.commit().map_err(|e| StoreError::DbError(e.to_string()))?;
        Ok(refreshed)
    })
}

/// Per-platform overview: how many phones have a listing row there, how
/// many are live, and the average live price.
pub fn platform_summary(
    db: &Database,
    catalog: &PlatformCatalog,
) -> Result<BTreeMap<String, PlatformSummary>, StoreError> {
    db.with_conn(|conn| {
        let mut summary = BTreeMap::new();
        for platform in catalog.platforms() {
            let (total, listed, avg_price): (i64, i64, Option<f64>) = conn
                .query_row(
                    "SELECT COUNT(*),
                            SUM(CASE WHEN pl.listed = 1 THEN 1 ELSE 0 END),
                            AVG(CASE WHEN pl.listed = 1 THEN pl.platform_price ELSE NULL END)
                     FROM platform_listings pl
                     JOIN phones p ON pl.phone_id = p.id
                     WHERE pl.platform = ?1",
                    params![platform.code],
                    |row| {
                        Ok((
                            row.get(0)?,
                            row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                            row.get(2)?,
                        ))
                    },
                )
                .map_err(|e| StoreError::DbError(e.to_string()))?;

            summary.insert(
                platform.code.clone(),
                PlatformSummary {
                    name: platform.name.clone(),
                    total_phones: total,
                    listed_phones: listed,
                    avg_price: (avg_price.unwrap_or(0.0) * 100.0).round() / 100.0,
                    fee_structure: platform.fee_model.describe(),
                },
            );
        }
        Ok(summary)
    })
}
