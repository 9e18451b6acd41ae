//! Crop market reference data used for lot pricing

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CompetitionLevel, DemandForecast, TrendDirection};

/// Market reference data for a single crop (prices in ₹ per quintal)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropMarketProfile {
    /// Government support price; zero when the crop has none (vegetables)
    pub minimum_support_price: Decimal,
    /// Current mandi rate
    pub reference_market_rate: Decimal,
    pub trend_direction: TrendDirection,
    pub trend_magnitude_percent: Decimal,
    pub demand_forecast: DemandForecast,
    /// Days the produce can be held before quality degrades
    pub storage_viability_days: u32,
    /// Informational only, not priced in
    pub logistics_cost_estimate: Decimal,
    pub competition_level: CompetitionLevel,
}

impl CropMarketProfile {
    /// Profile used for crops missing from the table
    pub fn default_profile() -> Self {
        Self {
            minimum_support_price: Decimal::from(2000),
            reference_market_rate: Decimal::from(2200),
            trend_direction: TrendDirection::Stable,
            trend_magnitude_percent: Decimal::ZERO,
            demand_forecast: DemandForecast::Medium,
            storage_viability_days: 90,
            logistics_cost_estimate: Decimal::from(150),
            competition_level: CompetitionLevel::Medium,
        }
    }

    pub fn has_support_price(&self) -> bool {
        self.minimum_support_price > Decimal::ZERO
    }

    /// MSP acts as a floor where it exists, otherwise the mandi rate stands alone
    pub fn base_price(&self) -> Decimal {
        self.minimum_support_price.max(self.reference_market_rate)
    }
}

impl Default for CropMarketProfile {
    fn default() -> Self {
        Self::default_profile()
    }
}

/// Errors raised while loading a crop market table
#[derive(Debug, Error)]
pub enum MarketTableError {
    #[error("failed to read crop market table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed crop market table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid profile for crop '{crop}': {reason}")]
    InvalidProfile { crop: String, reason: &'static str },
}

/// On-disk shape of a crop market table
#[derive(Debug, Deserialize)]
struct CropMarketTableFile {
    #[serde(default)]
    default: Option<CropMarketProfile>,
    crops: BTreeMap<String, CropMarketProfile>,
}

/// Keyed collection of crop profiles with a fallback for unknown crops
#[derive(Debug, Clone, PartialEq)]
pub struct CropMarketTable {
    profiles: BTreeMap<String, CropMarketProfile>,
    default_profile: CropMarketProfile,
}

/// Market snapshot shown when there is not enough input for a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketInfo {
    pub crop_key: String,
    pub known_crop: bool,
    pub reference_market_rate: Decimal,
    pub minimum_support_price: Decimal,
    pub trend_direction: TrendDirection,
    pub trend_magnitude_percent: Decimal,
}

/// Normalize a crop key for lookup ("  Wheat " -> "wheat")
pub fn normalize_crop_key(crop_key: &str) -> String {
    crop_key.trim().to_lowercase()
}

impl CropMarketTable {
    /// Empty table that resolves every crop to `default_profile`
    pub fn new(default_profile: CropMarketProfile) -> Self {
        Self {
            profiles: BTreeMap::new(),
            default_profile,
        }
    }

    /// Reference data bundled with the platform
    pub fn builtin() -> Self {
        let mut table = Self::new(CropMarketProfile::default_profile());

        #[allow(clippy::type_complexity)]
        let rows: [(&str, i64, i64, TrendDirection, i64, DemandForecast, u32, i64, CompetitionLevel); 9] = [
            ("rice", 2040, 2650, TrendDirection::Rising, 85, DemandForecast::High, 180, 150, CompetitionLevel::High),
            ("wheat", 2015, 2350, TrendDirection::Rising, 52, DemandForecast::High, 365, 120, CompetitionLevel::High),
            ("maize", 1870, 2100, TrendDirection::Stable, 21, DemandForecast::Medium, 90, 180, CompetitionLevel::Medium),
            ("cotton", 5450, 6200, TrendDirection::Rising, 123, DemandForecast::High, 270, 200, CompetitionLevel::Medium),
            ("sugarcane", 315, 340, TrendDirection::Falling, -32, DemandForecast::Medium, 7, 100, CompetitionLevel::High),
            ("soybean", 3950, 4200, TrendDirection::Rising, 68, DemandForecast::High, 120, 160, CompetitionLevel::Medium),
            // No MSP for vegetables
            ("potato", 0, 1800, TrendDirection::Stable, 15, DemandForecast::Medium, 30, 80, CompetitionLevel::High),
            ("tomato", 0, 2500, TrendDirection::Falling, -82, DemandForecast::Low, 7, 60, CompetitionLevel::High),
            ("onion", 0, 2200, TrendDirection::Rising, 156, DemandForecast::High, 60, 70, CompetitionLevel::High),
        ];

        for (crop, msp, rate, trend, trend_tenths, demand, storage, logistics, competition) in rows {
            table.insert(
                crop,
                CropMarketProfile {
                    minimum_support_price: Decimal::from(msp),
                    reference_market_rate: Decimal::from(rate),
                    trend_direction: trend,
                    trend_magnitude_percent: Decimal::new(trend_tenths, 1),
                    demand_forecast: demand,
                    storage_viability_days: storage,
                    logistics_cost_estimate: Decimal::from(logistics),
                    competition_level: competition,
                },
            );
        }

        table
    }

    /// Parse a table from JSON: `{ "default": {..}?, "crops": { "<key>": {..} } }`
    pub fn from_json_str(json: &str) -> Result<Self, MarketTableError> {
        let file: CropMarketTableFile = serde_json::from_str(json)?;

        let default_profile = match file.default {
            Some(profile) => {
                validate_profile("default", &profile)?;
                profile
            }
            None => CropMarketProfile::default_profile(),
        };

        let mut table = Self::new(default_profile);
        for (crop, profile) in file.crops {
            validate_profile(&crop, &profile)?;
            table.insert(&crop, profile);
        }
        Ok(table)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MarketTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add or replace the profile for a crop
    pub fn insert(&mut self, crop_key: &str, profile: CropMarketProfile) {
        self.profiles.insert(normalize_crop_key(crop_key), profile);
    }

    /// Resolve a crop to its profile, falling back to the default profile
    pub fn profile(&self, crop_key: &str) -> &CropMarketProfile {
        self.profiles
            .get(&normalize_crop_key(crop_key))
            .unwrap_or(&self.default_profile)
    }

    pub fn default_profile(&self) -> &CropMarketProfile {
        &self.default_profile
    }

    pub fn contains(&self, crop_key: &str) -> bool {
        self.profiles.contains_key(&normalize_crop_key(crop_key))
    }

    /// Known crops in key order
    pub fn crops(&self) -> impl Iterator<Item = (&str, &CropMarketProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Fallback panel data for a crop
    pub fn market_info(&self, crop_key: &str) -> MarketInfo {
        let profile = self.profile(crop_key);
        MarketInfo {
            crop_key: normalize_crop_key(crop_key),
            known_crop: self.contains(crop_key),
            reference_market_rate: profile.reference_market_rate,
            minimum_support_price: profile.minimum_support_price,
            trend_direction: profile.trend_direction,
            trend_magnitude_percent: profile.trend_magnitude_percent,
        }
    }
}

impl Default for CropMarketTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_profile(crop: &str, profile: &CropMarketProfile) -> Result<(), MarketTableError> {
    crate::validation::validate_market_profile(profile).map_err(|reason| {
        MarketTableError::InvalidProfile {
            crop: crop.to_string(),
            reason,
        }
    })
}
