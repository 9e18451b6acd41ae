//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::PricingService;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub crops_loaded: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pricing = PricingService::new(state.market.clone());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        crops_loaded: pricing.crop_count(),
    })
}
