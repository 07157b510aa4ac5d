//! Input validation helpers.
//!
//! Payloads arrive loosely typed at the transport edge; everything is checked
//! here before any business logic runs. Unknown fields are rejected by the
//! DTO definitions (`deny_unknown_fields`); value-level rules live in the
//! helpers below.

use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Deserialize a JSON payload into a typed request, reporting the exact
/// field path on failure.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, ApiError> {
    let deserializer = &mut serde_json::Deserializer::from_str(payload);
    serde_path_to_error::deserialize(deserializer)
        .map_err(|e| ApiError::InvalidInput(format!("malformed payload at '{}': {}", e.path(), e.inner())))
}

/// Require a non-empty, non-blank string field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

/// Require a strictly positive, finite weight in kilograms.
pub fn require_positive_weight(weight_kg: f64) -> Result<(), ApiError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "'weight_kg' must be a positive number, got {}",
            weight_kg
        )));
    }
    Ok(())
}

/// Require a strictly positive point amount.
pub fn require_positive_points(points: u64) -> Result<(), ApiError> {
    if points == 0 {
        return Err(ApiError::InvalidInput("'points' must be greater than zero".to_string()));
    }
    Ok(())
}

/// Parse an enumerated string field, mapping parse failures to `InvalidInput`.
pub fn parse_enum<T>(field: &str, value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| ApiError::InvalidInput(format!("'{}': {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AssignPointsRequest;
    use crate::models::{PickupStatus, WasteType};

    #[test]
    fn from_json_reports_field_path() {
        let err = from_json::<AssignPointsRequest>(r#"{"phone":"123","waste_type":"plastic","weight_kg":"heavy"}"#)
            .unwrap_err();
        match err {
            ApiError::InvalidInput(msg) => assert!(msg.contains("weight_kg"), "{}", msg),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let err = from_json::<AssignPointsRequest>(
            r#"{"phone":"123","waste_type":"plastic","weight_kg":1.0,"points":9999}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn enum_parsing_maps_to_invalid_input() {
        assert_eq!(
            parse_enum::<WasteType>("waste_type", "plastic").unwrap(),
            WasteType::Plastic
        );
        let err = parse_enum::<PickupStatus>("status", "Shipped").unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn weight_validation() {
        assert!(require_positive_weight(2.5).is_ok());
        assert!(require_positive_weight(0.0).is_err());
        assert!(require_positive_weight(-1.0).is_err());
        assert!(require_positive_weight(f64::NAN).is_err());
    }
}
