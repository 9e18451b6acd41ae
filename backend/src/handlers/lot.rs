//! HTTP handlers for the lot creation flow

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::services::lot::{DraftInput, DraftUpdateResult, DraftValidation, UpdateDraftInput};
use crate::services::{resolve_current_date, LotService, PricingService};
use crate::AppState;
use shared::{LotDraft, LotListing};

fn lot_service(state: AppState) -> LotService {
    LotService::new(PricingService::new(state.market))
}

/// Apply a single field update to a draft
pub async fn update_draft(
    State(state): State<AppState>,
    Json(input): Json<UpdateDraftInput>,
) -> Json<DraftUpdateResult> {
    let service = lot_service(state);
    let current_date = resolve_current_date(input.current_date);
    Json(service.update_draft(input.draft, input.update, current_date))
}

/// Copy the recommended price into the draft's minimum price
pub async fn apply_recommended_price(
    State(state): State<AppState>,
    Json(input): Json<DraftInput>,
) -> AppResult<Json<LotDraft>> {
    let service = lot_service(state);
    let current_date = resolve_current_date(input.current_date);
    let draft = service.apply_recommended_price(input.draft, current_date)?;
    Ok(Json(draft))
}

/// Report which form steps are complete
pub async fn validate_draft(
    State(state): State<AppState>,
    Json(input): Json<DraftInput>,
) -> Json<DraftValidation> {
    let service = lot_service(state);
    Json(service.validate_draft(&input.draft))
}

/// Submit a completed draft as a lot listing
pub async fn submit_lot(
    State(state): State<AppState>,
    Json(input): Json<DraftInput>,
) -> AppResult<(StatusCode, Json<LotListing>)> {
    let service = lot_service(state);
    let listing = service.submit(input.draft, Utc::now())?;
    Ok((StatusCode::CREATED, Json(listing)))
}
