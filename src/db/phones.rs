//! Inventory store: CRUD over the phones table plus the listing rows
//! that are derived from each phone's base price and condition.

use chrono::Utc;
use rusqlite::{params, params_from_iter, Row, Transaction};
use std::collections::BTreeMap;

use crate::db::connection::Database;
use crate::domain::conditions::ConditionMap;
use crate::domain::listing::{seed_listings, ListingSeed, PlatformListing};
use crate::domain::phone::{NewPhone, PhoneFilters, PhoneRecord, PhoneWithPlatforms};
use crate::domain::platforms::PlatformCatalog;
use crate::errors::StoreError;
use crate::import::ValidatedRow;

fn phone_from_row(row: &Row<'_>) -> rusqlite::Result<PhoneRecord> {
    Ok(PhoneRecord {
        id: row.get(0)?,
        model_name: row.get(1)?,
        brand: row.get(2)?,
        condition: row.get(3)?,
        storage: row.get(4)?,
        color: row.get(5)?,
        stock_quantity: row.get(6)?,
        base_price: row.get(7)?,
        specifications: row.get(8)?,
        tags: row.get(9)?,
        created_at: row.get(10)?,
    })
}

const PHONE_COLUMNS: &str = "id, model_name, brand, condition, storage, color, \
     stock_quantity, base_price, specifications, tags, created_at";

fn insert_phone(tx: &Transaction<'_>, phone: &NewPhone) -> Result<i64, StoreError> {
    tx.execute(
        "INSERT INTO phones (model_name, brand, condition, storage, color,
                             stock_quantity, base_price, specifications, tags, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            phone.model_name,
            phone.brand,
            phone.condition,
            phone.storage,
            phone.color,
            phone.stock_quantity,
            phone.base_price,
            phone.specifications,
            phone.tags,
            Utc::now().naive_utc(),
        ],
    )
    .map_err(|e| StoreError::DbError(e.to_string()))?;
    Ok(tx.last_insert_rowid())
}

fn insert_listing(
    tx: &Transaction<'_>,
    phone_id: i64,
    seed: &ListingSeed,
) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO platform_listings (phone_id, platform, listed, platform_price, platform_condition)
         VALUES (?1, ?2, 0, ?3, ?4)",
        params![phone_id, seed.platform, seed.platform_price, seed.platform_condition],
    )
    .map_err(|e| StoreError::DbError(e.to_string()))?;
    Ok(())
}

/// Creates a phone and one unlisted listing row per catalog platform,
/// in a single transaction. Returns the new phone id.
pub fn create_phone(
    db: &Database,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
    phone: &NewPhone,
) -> Result<i64, StoreError> {
    let seeds = seed_listings(phone.base_price, phone.condition, catalog, conditions)?;

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let phone_id = insert_phone(&tx, phone)?;
        for seed in &seeds {
            insert_listing(&tx, phone_id, seed)?;
        }

        tx.commit().map_err(|e| StoreError::DbError(e.to_string()))?;
        Ok(phone_id)
    })
}

/// Updates a phone and refreshes its listing rows: new platform prices and
/// condition labels, and any listing whose condition became unsupported is
/// delisted (an unsupported listing must never stay listed).
pub fn update_phone(
    db: &Database,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
    phone_id: i64,
    phone: &NewPhone,
) -> Result<(), StoreError> {
    let seeds = seed_listings(phone.base_price, phone.condition, catalog, conditions)?;

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let updated = tx
            .execute(
                "UPDATE phones
                 SET model_name = ?1, brand = ?2, condition = ?3, storage = ?4, color = ?5,
                     stock_quantity = ?6, base_price = ?7, specifications = ?8, tags = ?9
                 WHERE id = ?10",
                params![
                    phone.model_name,
                    phone.brand,
                    phone.condition,
                    phone.storage,
                    phone.color,
                    phone.stock_quantity,
                    phone.base_price,
                    phone.specifications,
                    phone.tags,
                    phone_id,
                ],
            )
            .map_err(|e| StoreError::DbError(e.to_string()))?;
        if updated == 0 {
            return Err(StoreError::NotFound);
        }

        for seed in &seeds {
            tx.execute(
                "UPDATE platform_listings
                 SET platform_price = ?1,
                     platform_condition = ?2,
                     listed = CASE WHEN ?2 IS NULL THEN 0 ELSE listed END,
                     listing_date = CASE WHEN ?2 IS NULL THEN NULL ELSE listing_date END
                 WHERE phone_id = ?3 AND platform = ?4",
                params![seed.platform_price, seed.platform_condition, phone_id, seed.platform],
            )
            .map_err(|e| StoreError::DbError(e.to_string()))?;
        }

        tx.commit().map_err(|e| StoreError::DbError(e.to_string()))?;
        Ok(())
    })
}

/// Deletes a phone and its listing rows.
pub fn delete_phone(db: &Database, phone_id: i64) -> Result<(), StoreError> {
    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        tx.execute(
            "DELETE FROM platform_listings WHERE phone_id = ?1",
            params![phone_id],
        )
        .map_err(|e| StoreError::DbError(e.to_string()))?;
        let deleted = tx
            .execute("DELETE FROM phones WHERE id = ?1", params![phone_id])
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        tx.commit().map_err(|e| StoreError::DbError(e.to_string()))?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    })
}

pub fn get_phone(db: &Database, phone_id: i64) -> Result<PhoneRecord, StoreError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {PHONE_COLUMNS} FROM phones WHERE id = ?1"),
            params![phone_id],
            phone_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            other => StoreError::DbError(other.to_string()),
        })
    })
}

/// Inventory listing with optional search (model/brand substring) and
/// condition filters, newest first, each phone carrying its per-platform
/// listed flags.
pub fn list_phones(
    db: &Database,
    filters: &PhoneFilters,
) -> Result<Vec<PhoneWithPlatforms>, StoreError> {
    let mut sql = format!(
        "SELECT {}, pl.platform, pl.listed
         FROM phones p
         LEFT JOIN platform_listings pl ON p.id = pl.phone_id
         WHERE 1=1",
        PHONE_COLUMNS
            .split(", ")
            .map(|c| format!("p.{c}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let mut sql_params: Vec<String> = Vec::new();

    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND (p.model_name LIKE ?1 OR p.brand LIKE ?1)");
        sql_params.push(format!("%{search}%"));
    }
    if let Some(condition) = filters.condition {
        sql.push_str(&format!(" AND p.condition = ?{}", sql_params.len() + 1));
        sql_params.push(condition.as_str().to_string());
    }

    sql.push_str(" ORDER BY p.created_at DESC, p.id DESC, pl.platform");

    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(sql_params.iter()), |row| {
                let phone = phone_from_row(row)?;
                let platform: Option<String> = row.get(11)?;
                let listed: Option<bool> = row.get(12)?;
                Ok((phone, platform, listed))
            })
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let mut out: Vec<PhoneWithPlatforms> = Vec::new();
        for row in rows {
            let (phone, platform, listed) =
                row.map_err(|e| StoreError::DbError(e.to_string()))?;

            let is_new_phone = out.last().map(|p| p.phone.id != phone.id).unwrap_or(true);
            if is_new_phone {
                out.push(PhoneWithPlatforms {
                    phone,
                    platforms: BTreeMap::new(),
                });
            }
            if let (Some(code), Some(current)) = (platform, out.last_mut()) {
                current.platforms.insert(code, listed.unwrap_or(false));
            }
        }
        Ok(out)
    })
}

/// Persists a validated bulk-import batch atomically: every accepted row
/// and its listing seeds, or nothing at all.
pub fn batch_create(db: &Database, rows: &[ValidatedRow]) -> Result<Vec<i64>, StoreError> {
    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let phone_id = insert_phone(&tx, &row.phone)?;
            for seed in &row.listings {
                insert_listing(&tx, phone_id, seed)?;
            }
            ids.push(phone_id);
        }

        tx.commit().map_err(|e| StoreError::DbError(e.to_string()))?;
        Ok(ids)
    })
}

/// Loads every phone with its listing rows, ordered by model name, as
/// input for the profitability analyzer.
pub fn load_phones_with_listings(
    db: &Database,
) -> Result<Vec<(PhoneRecord, Vec<PlatformListing>)>, StoreError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PHONE_COLUMNS} FROM phones ORDER BY model_name, id"
            ))
            .map_err(|e| StoreError::DbError(e.to_string()))?;
        let phone_rows = stmt
            .query_map([], phone_from_row)
            .map_err(|e| StoreError::DbError(e.to_string()))?;

        let mut phones = Vec::new();
        for row in phone_rows {
            phones.push(row.map_err(|e| StoreError::DbError(e.to_string()))?);
        }
        drop(stmt);

        let mut out = Vec::with_capacity(phones.len());
        for phone in phones {
            let listings = super::listings::listings_for_phone_conn(conn, phone.id)?;
            out.push((phone, listings));
        }
        Ok(out)
    })
}
