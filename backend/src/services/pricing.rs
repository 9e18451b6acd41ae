//! Pricing service: crop catalog, market info and lot price recommendations

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::{
    recommend_for_draft, CropMarketProfile, CropMarketTable, LotDraft, MarketInfo,
    PricingRecommendation,
};

/// Pricing service backed by a read-only crop market table
#[derive(Clone)]
pub struct PricingService {
    market: Arc<CropMarketTable>,
}

/// Crop entry in the catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct CropSummary {
    pub crop_key: String,
    pub profile: CropMarketProfile,
}

/// Input for a recommendation request
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub draft: LotDraft,
    /// Defaults to today's UTC date
    pub current_date: Option<NaiveDate>,
}

/// Recommendation plus the market panel shown alongside or instead of it
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: Option<PricingRecommendation>,
    pub market_info: Option<MarketInfo>,
}

impl PricingService {
    /// Create a new PricingService instance
    pub fn new(market: Arc<CropMarketTable>) -> Self {
        Self { market }
    }

    /// All known crops in key order
    pub fn list_crops(&self) -> Vec<CropSummary> {
        self.market
            .crops()
            .map(|(crop_key, profile)| CropSummary {
                crop_key: crop_key.to_string(),
                profile: profile.clone(),
            })
            .collect()
    }

    pub fn market_info(&self, crop_key: &str) -> MarketInfo {
        self.market.market_info(crop_key)
    }

    /// Recommendation for a draft; `None` until the draft has enough input
    pub fn recommend(&self, draft: &LotDraft, current_date: NaiveDate) -> Option<PricingRecommendation> {
        let recommendation = recommend_for_draft(&self.market, draft, current_date);

        match (&recommendation, draft.crop()) {
            (Some(rec), Some(crop)) => tracing::debug!(
                crop = %crop,
                price = %rec.recommended_price,
                confidence = %rec.confidence_level,
                "computed pricing recommendation"
            ),
            (None, Some(crop)) => {
                tracing::debug!(crop = %crop, "not enough input for a pricing recommendation")
            }
            _ => {}
        }

        recommendation
    }

    /// Recommendation together with the market panel for the draft's crop
    pub fn recommend_with_market_info(
        &self,
        draft: &LotDraft,
        current_date: NaiveDate,
    ) -> RecommendationResponse {
        RecommendationResponse {
            recommendation: self.recommend(draft, current_date),
            market_info: draft.crop().map(|crop| self.market_info(crop)),
        }
    }

    pub fn crop_count(&self) -> usize {
        self.market.len()
    }
}
