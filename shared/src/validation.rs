//! Validation utilities for the Farm Market platform

use rust_decimal::Decimal;

use crate::models::CropMarketProfile;
use crate::types::AUCTION_DURATION_DAYS;

// ============================================================================
// Market Data Validations
// ============================================================================

/// Validate a crop market profile loaded from configuration
pub fn validate_market_profile(profile: &CropMarketProfile) -> Result<(), &'static str> {
    if profile.minimum_support_price < Decimal::ZERO {
        return Err("Minimum support price cannot be negative");
    }
    if profile.reference_market_rate < Decimal::ZERO {
        return Err("Reference market rate cannot be negative");
    }
    if profile.logistics_cost_estimate < Decimal::ZERO {
        return Err("Logistics cost estimate cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Lot Form Validations
// ============================================================================

/// Validate crop key (letters, digits, spaces, '-' and '/', up to 40 chars)
pub fn validate_crop_key(crop_key: &str) -> Result<(), &'static str> {
    let crop_key = crop_key.trim();
    if crop_key.is_empty() {
        return Err("Crop must be selected");
    }
    if crop_key.chars().count() > 40 {
        return Err("Crop name must be at most 40 characters");
    }
    if !crop_key
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '/')
    {
        return Err("Crop name contains invalid characters");
    }
    Ok(())
}

pub fn validate_variety(variety: &str) -> Result<(), &'static str> {
    if variety.trim().is_empty() {
        return Err("Variety is required");
    }
    Ok(())
}

/// Validate lot quantity is positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

pub fn validate_location(location: &str) -> Result<(), &'static str> {
    if location.trim().is_empty() {
        return Err("Location is required");
    }
    Ok(())
}

/// Validate minimum price per quintal is positive
pub fn validate_minimum_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Minimum price must be greater than zero");
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), &'static str> {
    if description.trim().is_empty() {
        return Err("Description is required");
    }
    Ok(())
}

/// Validate auction duration is one of the offered options
pub fn validate_auction_duration(days: u32) -> Result<(), &'static str> {
    if !AUCTION_DURATION_DAYS.contains(&days) {
        return Err("Auction duration must be 3, 5, 7, 10 or 14 days");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Market Data Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_market_profile_default() {
        assert!(validate_market_profile(&CropMarketProfile::default_profile()).is_ok());
    }

    #[test]
    fn test_validate_market_profile_zero_msp_allowed() {
        let mut profile = CropMarketProfile::default_profile();
        profile.minimum_support_price = Decimal::ZERO;
        assert!(validate_market_profile(&profile).is_ok());
    }

    #[test]
    fn test_validate_market_profile_negative_values() {
        let mut profile = CropMarketProfile::default_profile();
        profile.reference_market_rate = Decimal::from(-10);
        assert!(validate_market_profile(&profile).is_err());

        let mut profile = CropMarketProfile::default_profile();
        profile.logistics_cost_estimate = Decimal::from(-1);
        assert!(validate_market_profile(&profile).is_err());
    }

    // ========================================================================
    // Lot Form Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_crop_key_valid() {
        assert!(validate_crop_key("wheat").is_ok());
        assert!(validate_crop_key("Rice/Paddy").is_ok());
        assert!(validate_crop_key("Tur-Arhar").is_ok());
    }

    #[test]
    fn test_validate_crop_key_invalid() {
        assert!(validate_crop_key("").is_err());
        assert!(validate_crop_key("   ").is_err());
        assert!(validate_crop_key("wheat; drop").is_err());
        assert!(validate_crop_key(&"a".repeat(41)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Decimal::new(5, 1)).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(Decimal::from(-3)).is_err());
    }

    #[test]
    fn test_validate_minimum_price() {
        assert!(validate_minimum_price(Decimal::from(2350)).is_ok());
        assert!(validate_minimum_price(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_text_fields() {
        assert!(validate_variety("Pusa 1121").is_ok());
        assert!(validate_variety(" ").is_err());
        assert!(validate_location("Ludhiana, Punjab").is_ok());
        assert!(validate_location("").is_err());
        assert!(validate_description("Sortex cleaned").is_ok());
        assert!(validate_description("\n").is_err());
    }

    #[test]
    fn test_validate_auction_duration() {
        for days in [3, 5, 7, 10, 14] {
            assert!(validate_auction_duration(days).is_ok());
        }
        assert!(validate_auction_duration(0).is_err());
        assert!(validate_auction_duration(6).is_err());
        assert!(validate_auction_duration(30).is_err());
    }
}
