//! Business logic services for the Farm Market Platform

use chrono::{NaiveDate, Utc};

pub mod lot;
pub mod pricing;

pub use lot::LotService;
pub use pricing::PricingService;

/// Date used for harvest-age math: the caller's, or today's UTC date
pub fn resolve_current_date(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| Utc::now().date_naive())
}
