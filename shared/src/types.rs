//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of recent mandi price movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    #[serde(alias = "up")]
    Rising,
    #[serde(alias = "down")]
    Falling,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Stable => "stable",
        }
    }

    /// Momentum adjustment applied to the recommended price
    pub fn multiplier(&self) -> Decimal {
        match self {
            TrendDirection::Rising => Decimal::new(105, 2),
            TrendDirection::Falling => Decimal::new(95, 2),
            TrendDirection::Stable => Decimal::ONE,
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buyer demand outlook for a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DemandForecast {
    High,
    Medium,
    Low,
}

impl DemandForecast {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandForecast::High => "high",
            DemandForecast::Medium => "medium",
            DemandForecast::Low => "low",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            DemandForecast::High => Decimal::new(115, 2),
            DemandForecast::Medium => Decimal::ONE,
            DemandForecast::Low => Decimal::new(90, 2),
        }
    }
}

impl std::fmt::Display for DemandForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of competition among sellers of the same crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    High,
    Medium,
    Low,
}

impl CompetitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::High => "high",
            CompetitionLevel::Medium => "medium",
            CompetitionLevel::Low => "low",
        }
    }

    /// Location adjustment. More sellers means a lower achievable price.
    pub fn multiplier(&self) -> Decimal {
        match self {
            CompetitionLevel::High => Decimal::new(95, 2),
            CompetitionLevel::Medium => Decimal::ONE,
            CompetitionLevel::Low => Decimal::new(105, 2),
        }
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse produce quality classification chosen by the farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    /// A grade
    Premium,
    /// B grade
    Good,
    /// C grade
    Fair,
    Standard,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::Premium => "premium",
            QualityGrade::Good => "good",
            QualityGrade::Fair => "fair",
            QualityGrade::Standard => "standard",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            QualityGrade::Premium => Decimal::new(125, 2),
            QualityGrade::Good => Decimal::new(110, 2),
            QualityGrade::Fair => Decimal::ONE,
            QualityGrade::Standard => Decimal::new(95, 2),
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much trust to place in a pricing recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

/// Units a lot quantity can be listed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    Quintals,
    Tonnes,
    Kg,
    /// 50 kg bags
    Bags,
}

impl std::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityUnit::Quintals => write!(f, "Quintals"),
            QuantityUnit::Tonnes => write!(f, "Tonnes"),
            QuantityUnit::Kg => write!(f, "Kilograms"),
            QuantityUnit::Bags => write!(f, "Bags (50kg)"),
        }
    }
}

/// Auction durations offered when listing a lot
pub const AUCTION_DURATION_DAYS: &[u32] = &[3, 5, 7, 10, 14];

/// Duration preselected on a fresh lot form
pub const DEFAULT_AUCTION_DURATION_DAYS: u32 = 7;
