// errors.rs
use std::fmt;

use crate::domain::pricing::PricingError;

/// Errors originating from the store layer or from bad input
/// handed to a store operation.
#[derive(Debug)]
pub enum StoreError {
    NotFound,
    InvalidInput(String),
    DbError(String),
    InternalError,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Not Found"),
            StoreError::InvalidInput(msg) => write!(f, "Invalid Input: {msg}"),
            StoreError::DbError(msg) => write!(f, "Database Error: {msg}"),
            StoreError::InternalError => write!(f, "Internal Error"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<PricingError> for StoreError {
    fn from(e: PricingError) -> Self {
        StoreError::InvalidInput(e.to_string())
    }
}
