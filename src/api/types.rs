//! Request/response DTOs for the operation surface.
//!
//! Design guidelines, in the same spirit as the rest of the boundary:
//!
//! 1. **Flat structures** — no deep nesting, optimized for JSON transport.
//! 2. **Strings at the edge** — enumerated fields arrive as strings and are
//!    parsed with an `InvalidInput` failure, never trusted blindly.
//! 3. **Computed fields stay server-side** — points and levels appear only in
//!    responses, never in requests (except the explicit game-credit call,
//!    which is validated and tier-checked like any other award).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Account, AccountId, Notification, NotificationId, PickupId, PickupRequest, Reward, RewardId,
    Role,
};
use crate::services::points;

// =========================================================
// Auth
// =========================================================

/// Payload for `register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub village: String,
    pub household_size: String,
    pub address: String,
    pub password: String,
}

/// Payload for `login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Token plus the public slice of the authenticated account.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub profile: PublicProfile,
}

/// Public fields of an account, safe to show to the account holder and in
/// auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub id: AccountId,
    pub display_name: String,
    pub identity: String,
    pub village: Option<String>,
    pub points: u64,
    pub level: u8,
    pub role: Role,
}

impl From<&Account> for PublicProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name.clone(),
            identity: account.identity.clone(),
            village: account.village.clone(),
            points: account.points,
            level: points::tier_for(account.points).level,
            role: account.role,
        }
    }
}

/// Full profile of an account, excluding the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateProfile {
    pub id: AccountId,
    pub identity: String,
    pub display_name: String,
    pub email: Option<String>,
    pub village: Option<String>,
    pub household_size: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub points: u64,
    pub level: u8,
    pub tier_name: String,
    pub redeemed_rewards: Vec<RewardId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for PrivateProfile {
    fn from(account: &Account) -> Self {
        let tier = points::tier_for(account.points);
        let mut redeemed: Vec<RewardId> = account.redeemed_rewards.iter().copied().collect();
        redeemed.sort();
        Self {
            id: account.id,
            identity: account.identity.clone(),
            display_name: account.display_name.clone(),
            email: account.email.clone(),
            village: account.village.clone(),
            household_size: account.household_size.clone(),
            address: account.address.clone(),
            role: account.role,
            points: account.points,
            level: tier.level,
            tier_name: tier.name.to_string(),
            redeemed_rewards: redeemed,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

// =========================================================
// Points
// =========================================================

/// Payload for the admin `assign_points` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignPointsRequest {
    pub phone: String,
    pub waste_type: String,
    pub weight_kg: f64,
}

/// Result of an admin point assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignPointsResponse {
    pub points_awarded: u64,
    /// Human-readable bonus explanation; empty when no bonus applied.
    pub explanation: String,
    pub new_balance: u64,
    pub level: u8,
}

/// Payload for a direct game-point credit.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddGamePointsRequest {
    pub points: u64,
    /// Which mini-game produced the credit, e.g. "trash-sort".
    pub source: String,
}

/// Result of a game-point credit.
#[derive(Debug, Clone, Serialize)]
pub struct AddGamePointsResponse {
    pub new_balance: u64,
    pub level: u8,
}

/// One row of the public leaderboard. Public fields only.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub display_name: String,
    pub village: Option<String>,
    pub points: u64,
    pub level: u8,
}

/// Aggregate platform statistics for the landing page.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub households: u64,
    pub villages: u64,
    pub waste_collected_kg: f64,
    pub rewards_redeemed: u64,
}

// =========================================================
// Rewards
// =========================================================

/// Payload for the admin `create_reward` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRewardRequest {
    pub title: String,
    pub description: String,
    pub points_required: u64,
    pub category: String,
    pub required_level: u8,
}

/// A catalog entry as surfaced to users.
#[derive(Debug, Clone, Serialize)]
pub struct RewardDto {
    pub id: RewardId,
    pub title: String,
    pub description: String,
    pub points_required: u64,
    pub category: String,
    pub required_level: u8,
}

impl From<&Reward> for RewardDto {
    fn from(reward: &Reward) -> Self {
        Self {
            id: reward.id,
            title: reward.title.clone(),
            description: reward.description.clone(),
            points_required: reward.points_required,
            category: reward.category.to_string(),
            required_level: reward.required_level,
        }
    }
}

/// Result of a successful redemption.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemResponse {
    pub reward_title: String,
    pub new_balance: u64,
}

// =========================================================
// Pickups
// =========================================================

/// Payload for `schedule_pickup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulePickupRequest {
    pub waste_types: Vec<String>,
    pub quantity: String,
    pub address: String,
    pub requested_date: NaiveDate,
    pub time_slot: String,
}

/// Payload for the admin `update_pickup_status` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePickupStatusRequest {
    pub status: String,
}

/// A pickup request as surfaced to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct PickupDto {
    pub id: PickupId,
    pub waste_types: Vec<String>,
    pub quantity: String,
    pub address: String,
    pub requested_date: NaiveDate,
    pub time_slot: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&PickupRequest> for PickupDto {
    fn from(pickup: &PickupRequest) -> Self {
        Self {
            id: pickup.id,
            waste_types: pickup.waste_types.iter().map(|w| w.to_string()).collect(),
            quantity: pickup.quantity.to_string(),
            address: pickup.address.clone(),
            requested_date: pickup.requested_date,
            time_slot: pickup.time_slot.clone(),
            status: pickup.status.to_string(),
            created_at: pickup.created_at,
        }
    }
}

/// A pickup request joined with the requester's public identity, for the
/// admin queue.
#[derive(Debug, Clone, Serialize)]
pub struct AdminPickupDto {
    #[serde(flatten)]
    pub pickup: PickupDto,
    pub requester_name: String,
    pub requester_phone: String,
    pub requester_village: Option<String>,
}

// =========================================================
// Notifications
// =========================================================

/// A notification as surfaced to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationDto {
    pub id: NotificationId,
    pub message: String,
    pub read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationDto {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            message: n.message.clone(),
            read: n.read,
            link: n.link.clone(),
            created_at: n.created_at,
        }
    }
}

/// Result of a bulk mark-read.
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub updated: usize,
}
