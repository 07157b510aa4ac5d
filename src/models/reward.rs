//! Reward catalog entries and redemption records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, RewardId};

/// Reward category as surfaced in the marketplace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Discount,
    Voucher,
    Recharge,
    Product,
}

impl fmt::Display for RewardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardCategory::Discount => write!(f, "discount"),
            RewardCategory::Voucher => write!(f, "voucher"),
            RewardCategory::Recharge => write!(f, "recharge"),
            RewardCategory::Product => write!(f, "product"),
        }
    }
}

impl FromStr for RewardCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "discount" => Ok(RewardCategory::Discount),
            "voucher" => Ok(RewardCategory::Voucher),
            "recharge" => Ok(RewardCategory::Recharge),
            "product" => Ok(RewardCategory::Product),
            other => Err(format!("unknown reward category '{}'", other)),
        }
    }
}

/// A redeemable catalog entry. Immutable from the user's perspective;
/// administrators may create entries and flip `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    pub title: String,
    pub description: String,
    pub points_required: u64,
    pub category: RewardCategory,
    /// Minimum tier level an account must hold to redeem.
    pub required_level: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a catalog entry; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewReward {
    pub title: String,
    pub description: String,
    pub points_required: u64,
    pub category: RewardCategory,
    pub required_level: u8,
}

/// Append-only record of a completed redemption.
///
/// `points_spent` snapshots the reward's cost at redemption time; later
/// catalog price changes must not alter historical spend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    pub account_id: AccountId,
    pub reward_id: RewardId,
    pub points_spent: u64,
    pub redeemed_at: DateTime<Utc>,
}
