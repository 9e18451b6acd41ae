//! HTTP handlers for lot pricing recommendations

use axum::{extract::State, Json};

use crate::services::pricing::{PricingService, RecommendationRequest, RecommendationResponse};
use crate::services::resolve_current_date;
use crate::AppState;

/// Compute the pricing recommendation for a lot draft
pub async fn get_recommendation(
    State(state): State<AppState>,
    Json(input): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let service = PricingService::new(state.market);
    let current_date = resolve_current_date(input.current_date);
    Json(service.recommend_with_market_info(&input.draft, current_date))
}
