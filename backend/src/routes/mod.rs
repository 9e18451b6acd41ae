//! Route definitions for the Farm Market Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Crop market reference data
        .nest("/crops", crop_routes())
        // Pricing recommendations
        .nest("/pricing", pricing_routes())
        // Lot creation flow
        .nest("/lots", lot_routes())
}

/// Crop catalog routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_key/market-info", get(handlers::get_market_info))
}

/// Pricing routes
fn pricing_routes() -> Router<AppState> {
    Router::new().route("/recommendation", post(handlers::get_recommendation))
}

/// Lot creation routes
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_lot))
        .route("/draft/update", post(handlers::update_draft))
        .route("/draft/apply-price", post(handlers::apply_recommended_price))
        .route("/draft/validate", post(handlers::validate_draft))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{AppState, Config};
    use shared::CropMarketTable;

    fn app() -> Router {
        crate::create_app(AppState {
            market: Arc::new(CropMarketTable::builtin()),
            config: Arc::new(Config::default()),
        })
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn wheat_draft() -> Value {
        json!({
            "crop_key": "wheat",
            "quality_grade": "premium",
            "harvest_date": "2024-11-15",
            "location_text": "Karnal, Haryana"
        })
    }

    #[tokio::test]
    async fn test_health_reports_loaded_crops() {
        let (status, body) = send("GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["crops_loaded"], 9);
    }

    #[tokio::test]
    async fn test_list_crops() {
        let (status, body) = send("GET", "/api/v1/crops", None).await;
        assert_eq!(status, StatusCode::OK);
        let crops = body.as_array().unwrap();
        assert_eq!(crops.len(), 9);
        assert_eq!(crops[0]["crop_key"], "cotton");
    }

    #[tokio::test]
    async fn test_market_info_unknown_crop_falls_back() {
        let (status, body) = send("GET", "/api/v1/crops/other/market-info", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["known_crop"], false);
        assert_eq!(body["reference_market_rate"], "2200");
    }

    #[tokio::test]
    async fn test_recommendation_for_wheat() {
        let request = json!({ "draft": wheat_draft(), "current_date": "2024-11-15" });
        let (status, body) = send("POST", "/api/v1/pricing/recommendation", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendation"]["recommended_price"], "3370");
        assert_eq!(body["recommendation"]["confidence_level"], "high");
        assert_eq!(body["market_info"]["crop_key"], "wheat");
    }

    #[tokio::test]
    async fn test_recommendation_null_without_signal() {
        let request = json!({ "draft": { "crop_key": "wheat" }, "current_date": "2024-11-15" });
        let (status, body) = send("POST", "/api/v1/pricing/recommendation", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["recommendation"].is_null());
        assert_eq!(body["market_info"]["reference_market_rate"], "2350");
    }

    #[tokio::test]
    async fn test_draft_update_recomputes_pricing() {
        let request = json!({
            "draft": { "crop_key": "rice" },
            "update": { "field": "quality_grade", "value": "good" },
            "current_date": "2024-11-15"
        });
        let (status, body) = send("POST", "/api/v1/lots/draft/update", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pricing_changed"], true);
        assert_eq!(body["draft"]["quality_grade"], "good");
        assert!(body["recommendation"].is_object());
    }

    #[tokio::test]
    async fn test_apply_price_copies_recommendation() {
        let request = json!({ "draft": wheat_draft(), "current_date": "2024-11-15" });
        let (status, body) = send("POST", "/api/v1/lots/draft/apply-price", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["minimum_price"], "3370");
    }

    #[tokio::test]
    async fn test_apply_price_without_input_is_unprocessable() {
        let request = json!({ "draft": {} });
        let (status, body) = send("POST", "/api/v1/lots/draft/apply-price", Some(request)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "PRICING_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_validate_empty_draft() {
        let (status, body) =
            send("POST", "/api/v1/lots/draft/validate", Some(json!({ "draft": {} }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready_to_submit"], false);
        assert_eq!(body["steps"][0]["valid"], false);
        assert_eq!(body["steps"][0]["number"], 1);
    }

    #[tokio::test]
    async fn test_submit_lot() {
        let mut draft = wheat_draft();
        draft["variety"] = json!("HD 2967");
        draft["quantity"] = json!("40");
        draft["unit"] = json!("quintals");
        draft["minimum_price"] = json!("3370");
        draft["description"] = json!("Machine cleaned, 11% moisture");
        draft["auction_duration_days"] = json!(5);

        let (status, body) = send("POST", "/api/v1/lots", Some(json!({ "draft": draft }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["crop_key"], "wheat");
        assert_eq!(body["auction_duration_days"], 5);
    }

    #[tokio::test]
    async fn test_submit_incomplete_lot_rejected() {
        let (status, body) =
            send("POST", "/api/v1/lots", Some(json!({ "draft": wheat_draft() }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "step_1");
    }
}
