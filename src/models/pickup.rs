//! Doorstep pickup requests and their status machine.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, PickupId, WasteType};

/// Status of a pickup request.
///
/// The machine is strictly forward-only:
///
/// ```text
/// Pending ──▶ Confirmed ──▶ Completed
///    │            │
///    └────────────┴──▶ Cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal. Only administrators transition
/// status; users only ever create requests in `Pending`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl PickupStatus {
    /// Whether a transition from `self` to `target` is allowed.
    pub fn can_transition_to(self, target: PickupStatus) -> bool {
        use PickupStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PickupStatus::Completed | PickupStatus::Cancelled)
    }
}

impl fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickupStatus::Pending => write!(f, "pending"),
            PickupStatus::Confirmed => write!(f, "confirmed"),
            PickupStatus::Completed => write!(f, "completed"),
            PickupStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for PickupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PickupStatus::Pending),
            "confirmed" => Ok(PickupStatus::Confirmed),
            "completed" => Ok(PickupStatus::Completed),
            "cancelled" => Ok(PickupStatus::Cancelled),
            other => Err(format!("unknown pickup status '{}'", other)),
        }
    }
}

/// Rough quantity band selected by the user when scheduling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityBand {
    Small,
    Medium,
    Large,
}

impl fmt::Display for QuantityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityBand::Small => write!(f, "small"),
            QuantityBand::Medium => write!(f, "medium"),
            QuantityBand::Large => write!(f, "large"),
        }
    }
}

impl FromStr for QuantityBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(QuantityBand::Small),
            "medium" => Ok(QuantityBand::Medium),
            "large" => Ok(QuantityBand::Large),
            other => Err(format!("unknown quantity band '{}'", other)),
        }
    }
}

/// A scheduled doorstep collection request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupRequest {
    pub id: PickupId,
    pub account_id: AccountId,
    pub waste_types: BTreeSet<WasteType>,
    pub quantity: QuantityBand,
    pub address: String,
    pub requested_date: NaiveDate,
    pub time_slot: String,
    pub status: PickupStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a pickup request; status starts at `Pending`
/// and the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewPickupRequest {
    pub account_id: AccountId,
    pub waste_types: BTreeSet<WasteType>,
    pub quantity: QuantityBand,
    pub address: String,
    pub requested_date: NaiveDate,
    pub time_slot: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(PickupStatus::Pending.can_transition_to(PickupStatus::Confirmed));
        assert!(PickupStatus::Pending.can_transition_to(PickupStatus::Cancelled));
        assert!(PickupStatus::Confirmed.can_transition_to(PickupStatus::Completed));
        assert!(PickupStatus::Confirmed.can_transition_to(PickupStatus::Cancelled));
    }

    #[test]
    fn backward_and_terminal_transitions_are_rejected() {
        assert!(!PickupStatus::Confirmed.can_transition_to(PickupStatus::Pending));
        assert!(!PickupStatus::Completed.can_transition_to(PickupStatus::Pending));
        assert!(!PickupStatus::Completed.can_transition_to(PickupStatus::Confirmed));
        assert!(!PickupStatus::Cancelled.can_transition_to(PickupStatus::Confirmed));
        assert!(!PickupStatus::Pending.can_transition_to(PickupStatus::Completed));
    }

    #[test]
    fn status_parsing_rejects_unknown_values() {
        assert_eq!(
            "confirmed".parse::<PickupStatus>().unwrap(),
            PickupStatus::Confirmed
        );
        assert!("Shipped".parse::<PickupStatus>().is_err());
    }
}
