// src/domain/phone.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use super::conditions::ConditionGrade;

/// Input for creating a phone, either from a CRUD caller or one accepted
/// bulk-import row. Optional free-text fields default to "".
#[derive(Debug, Clone, Serialize)]
pub struct NewPhone {
    pub model_name: String,
    pub brand: String,
    pub condition: ConditionGrade,
    pub storage: String,
    pub color: String,
    pub stock_quantity: i64,
    pub base_price: f64,
    pub specifications: String,
    pub tags: String,
}

/// One inventory unit as persisted in the phones table.
#[derive(Debug, Clone, Serialize)]
pub struct PhoneRecord {
    pub id: i64,
    pub model_name: String,
    pub brand: String,
    pub condition: ConditionGrade,
    pub storage: String,
    pub color: String,
    pub stock_quantity: i64,
    pub base_price: f64,
    pub specifications: String,
    pub tags: String,
    pub created_at: NaiveDateTime,
}

/// Inventory list entry: the phone plus a per-platform listed flag,
/// as returned by the inventory listing query.
#[derive(Debug, Serialize)]
pub struct PhoneWithPlatforms {
    #[serde(flatten)]
    pub phone: PhoneRecord,
    pub platforms: BTreeMap<String, bool>,
}

/// Filters for the inventory listing query.
#[derive(Debug, Default, Clone)]
pub struct PhoneFilters {
    /// Substring match over model name or brand.
    pub search: Option<String>,
    pub condition: Option<ConditionGrade>,
}
