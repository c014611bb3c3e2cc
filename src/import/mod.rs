//! Bulk CSV ingestion of inventory rows.
//!
//! One call per uploaded file: decode the bytes, validate the header,
//! validate every data row independently, then commit all accepted rows
//! as a single transaction. Row failures never abort the batch; file-level
//! failures abort before any row is processed.

pub mod csv;
pub mod decode;
pub mod import_error;

pub use import_error::ImportError;

use serde::Serialize;
use std::collections::HashMap;

use crate::db::connection::Database;
use crate::db::phones;
use crate::domain::conditions::{ConditionGrade, ConditionMap};
use crate::domain::listing::{seed_listings, ListingSeed};
use crate::domain::phone::NewPhone;
use crate::domain::platforms::PlatformCatalog;

pub const REQUIRED_COLUMNS: [&str; 4] = ["model_name", "brand", "condition", "base_price"];

/// Cap on how many row errors the report carries back to the caller.
pub const MAX_REPORTED_ERRORS: usize = 10;

/// Result of one bulk import call, returned as data.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub success_count: usize,
    pub error_count: usize,
    /// At most [`MAX_REPORTED_ERRORS`] entries, each "Row <n>: <reason>".
    pub errors: Vec<String>,
    pub message: String,
}

/// One accepted row: the phone plus its derived per-platform listing rows,
/// ready for the transactional batch insert.
#[derive(Debug)]
pub struct ValidatedRow {
    pub phone: NewPhone,
    pub listings: Vec<ListingSeed>,
}

enum RowOutcome {
    Accepted(Box<ValidatedRow>),
    Rejected(String),
}

/// Imports phones from an uploaded CSV file.
///
/// `filename` is only checked for a ".csv" suffix (case-insensitive);
/// `bytes` is the raw file content. Accepted rows are persisted in one
/// transaction; per-row rejections are reported, not fatal. Fails when
/// the file itself is unusable or when not a single row was accepted.
pub fn import_phones(
    db: &Database,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
    filename: &str,
    bytes: &[u8],
) -> Result<ImportReport, ImportError> {
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(ImportError::NotCsv {
            filename: filename.to_string(),
        });
    }

    let text = decode::decode_text(bytes);
    let records = csv::parse_records(&text);

    let Some((header, data_rows)) = records.split_first() else {
        return Err(ImportError::EmptyInput);
    };

    // Header names arrive with stray whitespace in the wild.
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !header.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns {
            missing,
            found: header,
        });
    }

    let columns: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut accepted: Vec<ValidatedRow> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (index, row) in data_rows.iter().enumerate() {
        // 1-based, counting the header line: the first data row is row 2.
        // Blank rows are skipped but still occupy their row number.
        let row_num = index + 2;

        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        match validate_row(row, &columns, catalog, conditions) {
            RowOutcome::Accepted(validated) => accepted.push(*validated),
            RowOutcome::Rejected(reason) => {
                eprintln!("Rejected import row {row_num}: {reason}");
                errors.push(format!("Row {row_num}: {reason}"));
            }
        }
    }

    if accepted.is_empty() && errors.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    if !accepted.is_empty() {
        phones::batch_create(db, &accepted)
            .map_err(|e| ImportError::Persistence(e.to_string()))?;
    }

    let success_count = accepted.len();
    let error_count = errors.len();
    errors.truncate(MAX_REPORTED_ERRORS);

    if success_count == 0 {
        return Err(ImportError::NothingImported { errors });
    }

    let mut message = format!("Successfully imported {success_count} phones");
    if error_count > 0 {
        message.push_str(&format!(" ({error_count} rows had errors)"));
    }

    Ok(ImportReport {
        success_count,
        error_count,
        errors,
        message,
    })
}

fn field<'a>(row: &'a [String], columns: &HashMap<&str, usize>, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|&i| row.get(i))
        .map(|s| s.trim())
        .unwrap_or("")
}

fn validate_row(
    row: &[String],
    columns: &HashMap<&str, usize>,
    catalog: &PlatformCatalog,
    conditions: &ConditionMap,
) -> RowOutcome {
    let model_name = field(row, columns, "model_name");
    let brand = field(row, columns, "brand");
    let condition_raw = field(row, columns, "condition");

    if model_name.is_empty() || brand.is_empty() || condition_raw.is_empty() {
        return RowOutcome::Rejected(
            "Missing required fields (model_name, brand, or condition)".to_string(),
        );
    }

    let price_raw = field(row, columns, "base_price");
    let base_price = match price_raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            return RowOutcome::Rejected(format!(
                "Invalid base_price '{price_raw}' - must be a positive number"
            ));
        }
    };

    let Some(condition) = ConditionGrade::parse(condition_raw) else {
        return RowOutcome::Rejected(format!(
            "Invalid condition '{condition_raw}' - must be one of: {}",
            ConditionGrade::valid_labels()
        ));
    };

    // Absent or unparsable quantities default to 0, negatives clamp to 0;
    // this field never rejects a row.
    let stock_quantity = field(row, columns, "stock_quantity")
        .parse::<i64>()
        .unwrap_or(0)
        .max(0);

    let phone = NewPhone {
        model_name: model_name.to_string(),
        brand: brand.to_string(),
        condition,
        storage: field(row, columns, "storage").to_string(),
        color: field(row, columns, "color").to_string(),
        stock_quantity,
        base_price,
        specifications: field(row, columns, "specifications").to_string(),
        tags: field(row, columns, "tags").to_string(),
    };

    // The base price was validated above, so seeding cannot fail here;
    // fold the impossible case into the price rejection anyway.
    match seed_listings(base_price, condition, catalog, conditions) {
        Ok(listings) => RowOutcome::Accepted(Box::new(ValidatedRow { phone, listings })),
        Err(e) => RowOutcome::Rejected(format!(
            "Invalid base_price '{price_raw}' - {e}"
        )),
    }
}
