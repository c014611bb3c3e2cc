// src/domain/analysis.rs

use serde::Serialize;
use std::collections::BTreeMap;

use super::conditions::ConditionGrade;
use super::listing::PlatformListing;
use super::phone::PhoneRecord;

/// Margin (as a percentage) a platform entry must reach to count as
/// profitable in the analysis view.
pub const PROFITABLE_MARGIN_PCT: f64 = 10.0;

#[derive(Debug, Serialize)]
pub struct PlatformProfitability {
    pub price: f64,
    /// price - base price.
    pub profit: f64,
    /// Profit over base price, as a percentage (ratio x 100).
    pub profit_margin: f64,
    pub listed: bool,
    pub profitable: bool,
}

#[derive(Debug, Serialize)]
pub struct PhoneProfitability {
    pub id: i64,
    pub model_name: String,
    pub brand: String,
    pub base_price: f64,
    pub condition: ConditionGrade,
    pub platforms: BTreeMap<String, PlatformProfitability>,
}

/// Cross-platform profitability report: one entry per phone, aggregating
/// every platform listing. Read-only and recomputed fully on each call.
///
/// Input order is preserved (the store loads phones sorted by model name).
pub fn analyze_profitability(
    rows: &[(PhoneRecord, Vec<PlatformListing>)],
) -> Vec<PhoneProfitability> {
    rows.iter()
        .map(|(phone, listings)| {
            let mut platforms = BTreeMap::new();
            for listing in listings {
                let profit = listing.platform_price - phone.base_price;
                // Guard: a zero base price would divide by zero.
                let profit_margin = if phone.base_price > 0.0 {
                    (profit / phone.base_price) * 100.0
                } else {
                    0.0
                };

                platforms.insert(
                    listing.platform.clone(),
                    PlatformProfitability {
                        price: listing.platform_price,
                        profit,
                        profit_margin,
                        listed: listing.listed,
                        profitable: profit_margin >= PROFITABLE_MARGIN_PCT,
                    },
                );
            }

            PhoneProfitability {
                id: phone.id,
                model_name: phone.model_name.clone(),
                brand: phone.brand.clone(),
                base_price: phone.base_price,
                condition: phone.condition,
                platforms,
            }
        })
        .collect()
}
