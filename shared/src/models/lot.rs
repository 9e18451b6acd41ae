//! Auction lot drafts and listings

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::pricing::PricingRecommendation;
use crate::types::{QualityGrade, QuantityUnit, DEFAULT_AUCTION_DURATION_DAYS};
use crate::validation;

/// A lot being filled in by a farmer, one per lot-creation session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LotDraft {
    pub crop_key: Option<String>,
    pub variety: String,
    pub quantity: Decimal,
    pub unit: Option<QuantityUnit>,
    pub quality_grade: Option<QualityGrade>,
    pub harvest_date: Option<NaiveDate>,
    /// Free text; only its presence matters for pricing
    pub location_text: String,
    /// Minimum price per quintal
    pub minimum_price: Decimal,
    pub description: String,
    pub auction_duration_days: u32,
}

impl Default for LotDraft {
    fn default() -> Self {
        Self {
            crop_key: None,
            variety: String::new(),
            quantity: Decimal::ZERO,
            unit: None,
            quality_grade: None,
            harvest_date: None,
            location_text: String::new(),
            minimum_price: Decimal::ZERO,
            description: String::new(),
            auction_duration_days: DEFAULT_AUCTION_DURATION_DAYS,
        }
    }
}

/// A single field change on a lot draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LotDraftUpdate {
    CropKey(Option<String>),
    Variety(String),
    Quantity(Decimal),
    Unit(Option<QuantityUnit>),
    QualityGrade(Option<QualityGrade>),
    HarvestDate(Option<NaiveDate>),
    LocationText(String),
    MinimumPrice(Decimal),
    Description(String),
    AuctionDurationDays(u32),
}

impl LotDraftUpdate {
    /// Fields whose changes trigger a pricing recomputation
    pub const PRICING_FIELDS: &'static [&'static str] =
        &["crop_key", "quality_grade", "location_text", "harvest_date"];

    /// Wire name of the updated field, as in the `field` tag
    pub fn field_name(&self) -> &'static str {
        match self {
            LotDraftUpdate::CropKey(_) => "crop_key",
            LotDraftUpdate::Variety(_) => "variety",
            LotDraftUpdate::Quantity(_) => "quantity",
            LotDraftUpdate::Unit(_) => "unit",
            LotDraftUpdate::QualityGrade(_) => "quality_grade",
            LotDraftUpdate::HarvestDate(_) => "harvest_date",
            LotDraftUpdate::LocationText(_) => "location_text",
            LotDraftUpdate::MinimumPrice(_) => "minimum_price",
            LotDraftUpdate::Description(_) => "description",
            LotDraftUpdate::AuctionDurationDays(_) => "auction_duration_days",
        }
    }

    /// Whether this change should trigger a pricing recomputation
    pub fn affects_pricing(&self) -> bool {
        Self::PRICING_FIELDS.contains(&self.field_name())
    }
}

/// Steps of the lot creation form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LotFormStep {
    /// Crop, variety, quantity and unit
    Produce,
    /// Quality, harvest date, location and minimum price
    Pricing,
    /// Description and auction duration
    Listing,
}

impl LotFormStep {
    pub const ALL: [LotFormStep; 3] = [LotFormStep::Produce, LotFormStep::Pricing, LotFormStep::Listing];

    pub fn number(&self) -> u8 {
        match self {
            LotFormStep::Produce => 1,
            LotFormStep::Pricing => 2,
            LotFormStep::Listing => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LotFormStep::Produce),
            2 => Some(LotFormStep::Pricing),
            3 => Some(LotFormStep::Listing),
            _ => None,
        }
    }
}

impl std::fmt::Display for LotFormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotFormStep::Produce => write!(f, "Produce Details"),
            LotFormStep::Pricing => write!(f, "Quality & Pricing"),
            LotFormStep::Listing => write!(f, "Listing Details"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LotDraftError {
    #[error("{step} incomplete: {reason}")]
    IncompleteStep { step: LotFormStep, reason: &'static str },
}

impl LotDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure state transition: returns the draft with one field replaced
    pub fn apply(self, update: LotDraftUpdate) -> Self {
        match update {
            LotDraftUpdate::CropKey(crop_key) => Self { crop_key, ..self },
            LotDraftUpdate::Variety(variety) => Self { variety, ..self },
            LotDraftUpdate::Quantity(quantity) => Self { quantity, ..self },
            LotDraftUpdate::Unit(unit) => Self { unit, ..self },
            LotDraftUpdate::QualityGrade(quality_grade) => Self { quality_grade, ..self },
            LotDraftUpdate::HarvestDate(harvest_date) => Self { harvest_date, ..self },
            LotDraftUpdate::LocationText(location_text) => Self { location_text, ..self },
            LotDraftUpdate::MinimumPrice(minimum_price) => Self { minimum_price, ..self },
            LotDraftUpdate::Description(description) => Self { description, ..self },
            LotDraftUpdate::AuctionDurationDays(auction_duration_days) => Self {
                auction_duration_days,
                ..self
            },
        }
    }

    /// Selected crop, ignoring blank input
    pub fn crop(&self) -> Option<&str> {
        self.crop_key
            .as_deref()
            .map(str::trim)
            .filter(|crop| !crop.is_empty())
    }

    /// Any location text counts; its content never affects pricing
    pub fn has_location(&self) -> bool {
        !self.location_text.is_empty()
    }

    /// Enough input for a pricing recommendation
    pub fn is_ready_for_pricing(&self) -> bool {
        self.crop().is_some()
            && (self.quality_grade.is_some() || self.has_location() || self.harvest_date.is_some())
    }

    /// Copy a recommended price into the minimum price field
    pub fn with_recommended_price(self, recommendation: &PricingRecommendation) -> Self {
        Self {
            minimum_price: recommendation.recommended_price,
            ..self
        }
    }

    pub fn validate_step(&self, step: LotFormStep) -> Result<(), LotDraftError> {
        let result = match step {
            LotFormStep::Produce => self.check_produce(),
            LotFormStep::Pricing => self.check_pricing(),
            LotFormStep::Listing => self.check_listing(),
        };
        result.map_err(|reason| LotDraftError::IncompleteStep { step, reason })
    }

    fn check_produce(&self) -> Result<(), &'static str> {
        validation::validate_crop_key(self.crop_key.as_deref().unwrap_or(""))?;
        validation::validate_variety(&self.variety)?;
        validation::validate_quantity(self.quantity)?;
        if self.unit.is_none() {
            return Err("Unit must be selected");
        }
        Ok(())
    }

    fn check_pricing(&self) -> Result<(), &'static str> {
        if self.quality_grade.is_none() {
            return Err("Quality grade must be selected");
        }
        if self.harvest_date.is_none() {
            return Err("Harvest date is required");
        }
        validation::validate_location(&self.location_text)?;
        validation::validate_minimum_price(self.minimum_price)
    }

    fn check_listing(&self) -> Result<(), &'static str> {
        validation::validate_description(&self.description)?;
        validation::validate_auction_duration(self.auction_duration_days)
    }

    /// Validate every step and turn the draft into a listing
    pub fn finalize(self, now: DateTime<Utc>) -> Result<LotListing, LotDraftError> {
        for step in LotFormStep::ALL {
            self.validate_step(step)?;
        }

        // validate_step guarantees every Option below is Some
        let incomplete = |step, reason| LotDraftError::IncompleteStep { step, reason };
        let crop_key = self
            .crop()
            .map(|crop| crop.to_lowercase())
            .ok_or(incomplete(LotFormStep::Produce, "Crop must be selected"))?;
        let unit = self
            .unit
            .ok_or(incomplete(LotFormStep::Produce, "Unit must be selected"))?;
        let quality_grade = self
            .quality_grade
            .ok_or(incomplete(LotFormStep::Pricing, "Quality grade must be selected"))?;
        let harvest_date = self
            .harvest_date
            .ok_or(incomplete(LotFormStep::Pricing, "Harvest date is required"))?;

        Ok(LotListing {
            id: Uuid::new_v4(),
            crop_key,
            variety: self.variety.trim().to_string(),
            quantity: self.quantity,
            unit,
            quality_grade,
            harvest_date,
            location_text: self.location_text.trim().to_string(),
            minimum_price: self.minimum_price,
            description: self.description.trim().to_string(),
            auction_duration_days: self.auction_duration_days,
            auction_starts_at: now,
            auction_ends_at: now + Duration::days(i64::from(self.auction_duration_days)),
            created_at: now,
        })
    }
}

/// A submitted lot, open for auction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotListing {
    pub id: Uuid,
    pub crop_key: String,
    pub variety: String,
    pub quantity: Decimal,
    pub unit: QuantityUnit,
    pub quality_grade: QualityGrade,
    pub harvest_date: NaiveDate,
    pub location_text: String,
    pub minimum_price: Decimal,
    pub description: String,
    pub auction_duration_days: u32,
    pub auction_starts_at: DateTime<Utc>,
    pub auction_ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
