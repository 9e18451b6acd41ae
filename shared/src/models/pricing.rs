//! Lot pricing recommendation engine
//!
//! Derives a suggested minimum price for a lot from the crop's market profile
//! and whatever the farmer has entered so far. The result is recomputed from
//! scratch on every relevant change; nothing here keeps state.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::lot::LotDraft;
use super::market::{CropMarketProfile, CropMarketTable};
use crate::types::{ConfidenceLevel, DemandForecast, TrendDirection};

/// Lowest value the storage multiplier can decay to
pub const STORAGE_MULTIPLIER_FLOOR: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Share of the price lost over one full storage-viability period
pub const STORAGE_DECAY_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Inputs and multipliers that went into a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorBreakdown {
    pub msp_floor: Decimal,
    pub mandi_rate: Decimal,
    pub demand_multiplier: Decimal,
    pub quality_multiplier: Decimal,
    pub location_multiplier: Decimal,
    pub storage_multiplier: Decimal,
    pub trend_multiplier: Decimal,
}

/// Suggested minimum price for a lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRecommendation {
    /// Whole rupees per quintal
    pub recommended_price: Decimal,
    pub confidence_level: ConfidenceLevel,
    pub factor_breakdown: FactorBreakdown,
    /// Rendered in order
    pub reasoning_lines: Vec<String>,
}

/// Whole days since harvest; future or missing dates count as zero
pub fn days_since_harvest(harvest_date: Option<NaiveDate>, current_date: NaiveDate) -> i64 {
    harvest_date
        .map(|harvested| (current_date - harvested).num_days().max(0))
        .unwrap_or(0)
}

/// Freshness multiplier, decaying linearly with age and floored at 0.85.
/// A zero viability period means the crop does not decay.
pub fn storage_multiplier(days_since_harvest: i64, storage_viability_days: u32) -> Decimal {
    if storage_viability_days == 0 {
        return Decimal::ONE;
    }

    let elapsed = Decimal::from(days_since_harvest.max(0)) / Decimal::from(storage_viability_days);
    let decayed = Decimal::ONE - elapsed.saturating_mul(STORAGE_DECAY_RATE);
    decayed.max(STORAGE_MULTIPLIER_FLOOR)
}

/// First matching rule wins: high, then low, otherwise medium
pub fn determine_confidence(profile: &CropMarketProfile) -> ConfidenceLevel {
    let falling = profile.trend_direction == TrendDirection::Falling;

    if profile.has_support_price() && !falling && profile.demand_forecast == DemandForecast::High {
        ConfidenceLevel::High
    } else if falling || profile.demand_forecast == DemandForecast::Low {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::Medium
    }
}

/// Compute a pricing recommendation for a draft.
///
/// Returns `None` until the draft names a crop and at least one of quality
/// grade, location or harvest date; callers show [`MarketInfo`] instead.
///
/// [`MarketInfo`]: super::market::MarketInfo
pub fn compute_recommendation(
    profile: &CropMarketProfile,
    draft: &LotDraft,
    current_date: NaiveDate,
) -> Option<PricingRecommendation> {
    if !draft.is_ready_for_pricing() {
        return None;
    }

    let days = days_since_harvest(draft.harvest_date, current_date);

    let base_price = profile.base_price();
    let quality_multiplier = draft
        .quality_grade
        .map(|grade| grade.multiplier())
        .unwrap_or(Decimal::ONE);
    let demand_multiplier = profile.demand_forecast.multiplier();
    let location_multiplier = profile.competition_level.multiplier();
    let storage = storage_multiplier(days, profile.storage_viability_days);
    let trend_multiplier = profile.trend_direction.multiplier();

    let recommended_price = [
        quality_multiplier,
        demand_multiplier,
        location_multiplier,
        storage,
        trend_multiplier,
    ]
    .iter()
    .fold(base_price, |price, factor| price.saturating_mul(*factor))
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .normalize();

    let reasoning_lines = build_reasoning(profile, draft, quality_multiplier, days);

    Some(PricingRecommendation {
        recommended_price,
        confidence_level: determine_confidence(profile),
        factor_breakdown: FactorBreakdown {
            msp_floor: profile.minimum_support_price,
            mandi_rate: profile.reference_market_rate,
            demand_multiplier,
            quality_multiplier,
            location_multiplier,
            storage_multiplier: storage,
            trend_multiplier,
        },
        reasoning_lines,
    })
}

/// Look up the draft's crop in `table` and compute its recommendation
pub fn recommend_for_draft(
    table: &CropMarketTable,
    draft: &LotDraft,
    current_date: NaiveDate,
) -> Option<PricingRecommendation> {
    let crop = draft.crop()?;
    compute_recommendation(table.profile(crop), draft, current_date)
}

fn build_reasoning(
    profile: &CropMarketProfile,
    draft: &LotDraft,
    quality_multiplier: Decimal,
    days_since_harvest: i64,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(7);

    if profile.has_support_price() {
        lines.push(format!(
            "MSP floor price: ₹{}/quintal",
            profile.minimum_support_price.normalize()
        ));
    }
    lines.push(format!(
        "Current mandi rate: ₹{}/quintal",
        profile.reference_market_rate.normalize()
    ));

    let sign = if profile.trend_magnitude_percent > Decimal::ZERO { "+" } else { "" };
    lines.push(format!(
        "Market trend: {} ({}{}%)",
        profile.trend_direction,
        sign,
        profile.trend_magnitude_percent.normalize()
    ));
    lines.push(format!("Demand forecast: {}", profile.demand_forecast));

    match draft.quality_grade {
        Some(grade) => {
            let premium = ((quality_multiplier - Decimal::ONE) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            lines.push(format!("Quality grade: {} ({}% premium)", grade, premium));
        }
        None => lines.push("Quality grade: Not specified (using base rate)".to_string()),
    }

    if draft.harvest_date.is_some() {
        if days_since_harvest > 0 {
            lines.push(format!("Storage factor: {} days since harvest", days_since_harvest));
        } else {
            lines.push("Storage factor: Fresh harvest".to_string());
        }
    }

    lines.push(format!("Competition level: {}", profile.competition_level));
    lines
}
