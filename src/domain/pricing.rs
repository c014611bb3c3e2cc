// src/domain/pricing.rs

use std::error::Error;
use std::fmt;

use super::platforms::{FeeModel, Platform};

/// Margin threshold a listing must clear before we bother listing it.
pub const DEFAULT_MIN_MARGIN: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingError {
    /// Base price must be a finite, strictly positive number.
    InvalidBasePrice(f64),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidBasePrice(v) => {
                write!(f, "base price must be a positive number, got {v}")
            }
        }
    }
}

impl Error for PricingError {}

/// Rounds a monetary amount to cents, half away from zero.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The sale price on a platform: base price plus the platform's fees,
/// rounded to cents.
pub fn platform_price(base_price: f64, platform: &Platform) -> Result<f64, PricingError> {
    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(PricingError::InvalidBasePrice(base_price));
    }

    let raw = match platform.fee_model {
        FeeModel::Percentage { rate } => base_price * (1.0 + rate),
        FeeModel::PercentagePlusFixed { rate, fixed_fee } => {
            base_price * (1.0 + rate) + fixed_fee
        }
    };

    Ok(round_cents(raw))
}

/// (platform price - base price) / base price.
///
/// Returns 0.0 for a zero, negative, or non-finite base price instead of
/// erroring, so callers can treat "no margin" uniformly.
pub fn profit_margin(base_price: f64, platform: &Platform) -> f64 {
    match platform_price(base_price, platform) {
        Ok(price) => (price - base_price) / base_price,
        Err(_) => 0.0,
    }
}

/// Whether listing at this base price clears the margin threshold.
/// The threshold is inclusive: margin == min_margin is profitable.
pub fn is_profitable(base_price: f64, platform: &Platform, min_margin: f64) -> bool {
    profit_margin(base_price, platform) >= min_margin
}
