//! Waste-collection ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, CollectionId};

/// Waste category accepted by the collection workflow.
///
/// The per-kilogram point rate lives in the points engine
/// ([`crate::services::points::rate_per_kg`]), not here, so rates can change
/// without touching the ledger model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Plastic,
    Organic,
    #[serde(rename = "ecofriendly")]
    EcoFriendly,
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteType::Plastic => write!(f, "plastic"),
            WasteType::Organic => write!(f, "organic"),
            WasteType::EcoFriendly => write!(f, "ecofriendly"),
        }
    }
}

impl FromStr for WasteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plastic" => Ok(WasteType::Plastic),
            "organic" => Ok(WasteType::Organic),
            "ecofriendly" => Ok(WasteType::EcoFriendly),
            other => Err(format!("unknown waste type '{}'", other)),
        }
    }
}

/// One logged waste-collection event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEvent {
    pub id: CollectionId,
    pub account_id: AccountId,
    pub waste_type: WasteType,
    /// Collected weight in kilograms; validated strictly positive upstream.
    pub weight_kg: f64,
    /// Points awarded for this event, computed server-side.
    pub points: u64,
    /// Identity of the administrator who logged the event.
    pub collected_by: String,
    pub date: DateTime<Utc>,
}

/// Fields required to append a collection event; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewCollectionEvent {
    pub account_id: AccountId,
    pub waste_type: WasteType,
    pub weight_kg: f64,
    pub points: u64,
    pub collected_by: String,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waste_type_parses_case_insensitively() {
        assert_eq!("Plastic".parse::<WasteType>().unwrap(), WasteType::Plastic);
        assert_eq!(
            "ECOFRIENDLY".parse::<WasteType>().unwrap(),
            WasteType::EcoFriendly
        );
    }

    #[test]
    fn unknown_waste_type_is_rejected() {
        assert!("metal".parse::<WasteType>().is_err());
    }
}
