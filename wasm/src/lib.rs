//! WebAssembly module for the Farm Market Platform
//!
//! Provides client-side computation for the lot creation form:
//! - Pricing recommendations
//! - Market info fallback panel
//! - Draft updates and the Apply action
//! - Step validation

use chrono::NaiveDate;
use js_sys::Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_draft(draft_json: &str) -> Result<LotDraft, JsValue> {
    serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid lot draft JSON: {}", e)))
}

fn parse_date(current_date: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(current_date, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", current_date, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the pricing recommendation for a draft.
/// Returns the recommendation JSON, or "null" when there is not enough input.
#[wasm_bindgen]
pub fn compute_pricing_recommendation(draft_json: &str, current_date: &str) -> Result<String, JsValue> {
    let draft = parse_draft(draft_json)?;
    let today = parse_date(current_date)?;

    let recommendation = recommend_for_draft(&CropMarketTable::builtin(), &draft, today);
    to_json(&recommendation)
}

/// Market info panel for a crop
#[wasm_bindgen]
pub fn crop_market_info(crop_key: &str) -> Result<String, JsValue> {
    to_json(&CropMarketTable::builtin().market_info(crop_key))
}

/// Copy the recommended price into the draft; errors when none is available
#[wasm_bindgen]
pub fn apply_recommended_price(draft_json: &str, current_date: &str) -> Result<String, JsValue> {
    let draft = parse_draft(draft_json)?;
    let today = parse_date(current_date)?;

    match recommend_for_draft(&CropMarketTable::builtin(), &draft, today) {
        Some(rec) => to_json(&draft.with_recommended_price(&rec)),
        None => {
            web_sys::console::warn_1(&JsValue::from_str(
                "No pricing recommendation available for this draft",
            ));
            Err(JsValue::from_str("No pricing recommendation available"))
        }
    }
}

/// Apply a `{"field": ..., "value": ...}` update to a draft
#[wasm_bindgen]
pub fn apply_lot_draft_update(draft_json: &str, update_json: &str) -> Result<String, JsValue> {
    let draft = parse_draft(draft_json)?;
    let update: LotDraftUpdate = serde_json::from_str(update_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid update JSON: {}", e)))?;

    to_json(&draft.apply(update))
}

/// Whether an update to `field` should trigger a pricing recomputation
#[wasm_bindgen]
pub fn field_affects_pricing(field: &str) -> bool {
    LotDraftUpdate::PRICING_FIELDS.contains(&field)
}

/// Validate a form step (1-3). Returns an empty string when valid.
#[wasm_bindgen]
pub fn validate_lot_step(draft_json: &str, step: u8) -> Result<String, JsValue> {
    let draft = parse_draft(draft_json)?;
    let step = LotFormStep::from_number(step)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown form step {}", step)))?;

    Ok(match draft.validate_step(step) {
        Ok(()) => String::new(),
        Err(LotDraftError::IncompleteStep { reason, .. }) => reason.to_string(),
    })
}

/// Crop keys with dedicated market profiles
#[wasm_bindgen]
pub fn known_crop_keys() -> Array {
    CropMarketTable::builtin()
        .crops()
        .map(|(crop_key, _)| JsValue::from_str(crop_key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHEAT_DRAFT: &str = r#"{
        "crop_key": "wheat",
        "quality_grade": "premium",
        "harvest_date": "2024-11-15",
        "location_text": "Karnal"
    }"#;

    #[test]
    fn test_compute_pricing_recommendation() {
        let json = compute_pricing_recommendation(WHEAT_DRAFT, "2024-11-15").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["recommended_price"], "3370");
        assert_eq!(value["confidence_level"], "high");
    }

    #[test]
    fn test_recommendation_null_for_crop_only() {
        let json = compute_pricing_recommendation(r#"{"crop_key": "rice"}"#, "2024-11-15").unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn test_apply_lot_draft_update() {
        let json = apply_lot_draft_update(
            r#"{"crop_key": "maize"}"#,
            r#"{"field": "location_text", "value": "Davanagere"}"#,
        )
        .unwrap();
        let draft: LotDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft.location_text, "Davanagere");
        assert_eq!(draft.crop(), Some("maize"));
    }

    #[test]
    fn test_field_affects_pricing() {
        assert!(field_affects_pricing("crop_key"));
        assert!(field_affects_pricing("harvest_date"));
        assert!(!field_affects_pricing("quantity"));
        assert!(!field_affects_pricing("minimum_price"));
    }

    #[test]
    fn test_field_affects_pricing_agrees_with_update() {
        let update: LotDraftUpdate =
            serde_json::from_str(r#"{"field": "quality_grade", "value": "good"}"#).unwrap();
        assert_eq!(field_affects_pricing(update.field_name()), update.affects_pricing());

        let update: LotDraftUpdate =
            serde_json::from_str(r#"{"field": "description", "value": "Sortex cleaned"}"#).unwrap();
        assert_eq!(field_affects_pricing(update.field_name()), update.affects_pricing());
    }
}
