//! Account records for end users and administrators.
//!
//! A single [`Account`] type covers both roles. Users are identified by their
//! phone number and carry the household profile captured at registration;
//! administrators are identified by an ID number and carry no household
//! profile. Accounts are never hard-deleted; deactivation flips `is_active`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, RewardId};

/// Role of an account, embedded in auth tokens as a claim.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A persisted account record.
///
/// `points` is an unsigned total, so the "points never go negative" invariant
/// holds by construction; debits are guarded repository operations that fail
/// rather than underflow. The tier/level is derived from `points` through
/// [`crate::services::points::tier_for`] and is not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Unique identity: phone number for users, ID number for admins.
    pub identity: String,
    pub display_name: String,
    pub email: Option<String>,
    pub village: Option<String>,
    pub household_size: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub points: u64,
    /// Reward ids this account has already redeemed. Each reward is
    /// redeemable at most once per account, permanently.
    pub redeemed_rewards: HashSet<RewardId>,
    pub is_active: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a new account; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub identity: String,
    pub display_name: String,
    pub email: Option<String>,
    pub village: Option<String>,
    pub household_size: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub password_hash: String,
}
