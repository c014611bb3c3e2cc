pub mod analysis;
pub mod conditions;
pub mod listing;
pub mod phone;
pub mod platforms;
pub mod pricing;
