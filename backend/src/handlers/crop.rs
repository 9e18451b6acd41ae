//! HTTP handlers for crop market reference data

use axum::{
    extract::{Path, State},
    Json,
};

use crate::services::pricing::{CropSummary, PricingService};
use crate::AppState;
use shared::MarketInfo;

/// List all crops with market profiles
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropSummary>> {
    let service = PricingService::new(state.market);
    Json(service.list_crops())
}

/// Market info panel for a crop (unknown crops get the default profile)
pub async fn get_market_info(
    State(state): State<AppState>,
    Path(crop_key): Path<String>,
) -> Json<MarketInfo> {
    let service = PricingService::new(state.market);
    Json(service.market_info(&crop_key))
}
