//! Lot service: draft updates, Apply, step validation and submission

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::pricing::PricingService;
use shared::{LotDraft, LotDraftUpdate, LotFormStep, LotListing, PricingRecommendation};

/// Lot service for the lot creation flow. Drafts are owned by the caller.
#[derive(Clone)]
pub struct LotService {
    pricing: PricingService,
}

/// Input for a draft field update
#[derive(Debug, Deserialize)]
pub struct UpdateDraftInput {
    pub draft: LotDraft,
    pub update: LotDraftUpdate,
    pub current_date: Option<NaiveDate>,
}

/// Updated draft, with a fresh recommendation when a pricing field changed
#[derive(Debug, Serialize)]
pub struct DraftUpdateResult {
    pub draft: LotDraft,
    pub pricing_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<PricingRecommendation>,
}

/// Input carrying only a draft
#[derive(Debug, Deserialize)]
pub struct DraftInput {
    pub draft: LotDraft,
    pub current_date: Option<NaiveDate>,
}

/// Validity of a single form step
#[derive(Debug, Serialize)]
pub struct StepStatus {
    pub step: LotFormStep,
    pub number: u8,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validity of every form step
#[derive(Debug, Serialize)]
pub struct DraftValidation {
    pub steps: Vec<StepStatus>,
    pub ready_to_submit: bool,
}

impl LotService {
    /// Create a new LotService instance
    pub fn new(pricing: PricingService) -> Self {
        Self { pricing }
    }

    /// Apply a field update and recompute pricing when the field feeds it
    pub fn update_draft(
        &self,
        draft: LotDraft,
        update: LotDraftUpdate,
        current_date: NaiveDate,
    ) -> DraftUpdateResult {
        let pricing_changed = update.affects_pricing();
        let draft = draft.apply(update);

        let recommendation = if pricing_changed {
            self.pricing.recommend(&draft, current_date)
        } else {
            None
        };

        DraftUpdateResult {
            draft,
            pricing_changed,
            recommendation,
        }
    }

    /// Copy the current recommendation into the draft's minimum price
    pub fn apply_recommended_price(
        &self,
        draft: LotDraft,
        current_date: NaiveDate,
    ) -> AppResult<LotDraft> {
        let recommendation = self.pricing.recommend(&draft, current_date).ok_or_else(|| {
            AppError::PricingUnavailable(
                "Select a crop and fill in quality grade, harvest date or location first"
                    .to_string(),
            )
        })?;

        tracing::info!(
            "Applying recommended price {} to lot draft",
            recommendation.recommended_price
        );
        Ok(draft.with_recommended_price(&recommendation))
    }

    pub fn validate_draft(&self, draft: &LotDraft) -> DraftValidation {
        let steps: Vec<StepStatus> = LotFormStep::ALL
            .iter()
            .map(|&step| {
                let result = draft.validate_step(step);
                StepStatus {
                    step,
                    number: step.number(),
                    valid: result.is_ok(),
                    message: result.err().map(|e| e.to_string()),
                }
            })
            .collect();

        let ready_to_submit = steps.iter().all(|s| s.valid);
        DraftValidation {
            steps,
            ready_to_submit,
        }
    }

    /// Finalize a draft into a listing
    pub fn submit(&self, draft: LotDraft, now: DateTime<Utc>) -> AppResult<LotListing> {
        let listing = draft.finalize(now)?;
        tracing::info!(
            "Created lot listing {} for {} ({} days)",
            listing.id,
            listing.crop_key,
            listing.auction_duration_days
        );
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{CropMarketTable, QualityGrade, QuantityUnit};
    use std::sync::Arc;

    fn service() -> LotService {
        LotService::new(PricingService::new(Arc::new(CropMarketTable::builtin())))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
    }

    #[test]
    fn test_update_non_pricing_field_skips_recommendation() {
        let draft = LotDraft::new()
            .apply(LotDraftUpdate::CropKey(Some("rice".to_string())))
            .apply(LotDraftUpdate::QualityGrade(Some(QualityGrade::Premium)));

        let result = service().update_draft(draft, LotDraftUpdate::Quantity(Decimal::from(10)), today());
        assert!(!result.pricing_changed);
        assert!(result.recommendation.is_none());
        assert_eq!(result.draft.quantity, Decimal::from(10));
    }

    #[test]
    fn test_update_pricing_field_recomputes() {
        let draft = LotDraft::new().apply(LotDraftUpdate::CropKey(Some("rice".to_string())));

        let result = service().update_draft(
            draft,
            LotDraftUpdate::LocationText("Guntur".to_string()),
            today(),
        );
        assert!(result.pricing_changed);
        assert!(result.recommendation.is_some());
    }

    #[test]
    fn test_apply_price_without_recommendation_fails() {
        let err = service()
            .apply_recommended_price(LotDraft::new(), today())
            .unwrap_err();
        assert!(matches!(err, AppError::PricingUnavailable(_)));
    }

    #[test]
    fn test_apply_price_is_idempotent() {
        let service = service();
        let draft = LotDraft::new()
            .apply(LotDraftUpdate::CropKey(Some("soybean".to_string())))
            .apply(LotDraftUpdate::QualityGrade(Some(QualityGrade::Fair)));

        let once = service.apply_recommended_price(draft, today()).unwrap();
        let twice = service.apply_recommended_price(once.clone(), today()).unwrap();
        assert_eq!(once.minimum_price, twice.minimum_price);
        assert!(once.minimum_price > Decimal::ZERO);
    }

    #[test]
    fn test_validate_and_submit() {
        let service = service();
        let draft = LotDraft::new()
            .apply(LotDraftUpdate::CropKey(Some("onion".to_string())))
            .apply(LotDraftUpdate::Variety("Nasik Red".to_string()))
            .apply(LotDraftUpdate::Quantity(Decimal::from(25)))
            .apply(LotDraftUpdate::Unit(Some(QuantityUnit::Quintals)));

        let report = service.validate_draft(&draft);
        assert!(report.steps[0].valid);
        assert!(!report.steps[1].valid);
        assert!(!report.ready_to_submit);
        assert!(service.submit(draft.clone(), Utc::now()).is_err());

        let draft = draft
            .apply(LotDraftUpdate::QualityGrade(Some(QualityGrade::Good)))
            .apply(LotDraftUpdate::HarvestDate(Some(today())))
            .apply(LotDraftUpdate::LocationText("Lasalgaon".to_string()))
            .apply(LotDraftUpdate::Description("Dry, uniform bulbs".to_string()));
        let draft = service.apply_recommended_price(draft, today()).unwrap();

        assert!(service.validate_draft(&draft).ready_to_submit);
        let listing = service.submit(draft, Utc::now()).unwrap();
        assert_eq!(listing.crop_key, "onion");
    }
}
