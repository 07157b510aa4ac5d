//! Reward catalog repository trait, including the atomic redemption write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{AccountId, NewReward, Redemption, Reward, RewardId};

/// Outcome of an attempted redemption.
///
/// Precondition failures are data, not errors, at this layer: the store
/// reports what it observed under the write guard and the service maps the
/// outcome to the caller-facing error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// Points debited, redeemed set appended, redemption and notification
    /// records inserted.
    Redeemed { new_balance: u64 },
    /// The reward id was already in the account's redeemed set.
    AlreadyRedeemed,
    /// The account's balance did not cover the cost.
    InsufficientPoints { available: u64 },
}

/// Repository trait for the reward catalog and redemptions.
#[async_trait]
pub trait RewardRepository: Send + Sync {
    /// Insert a new catalog entry.
    async fn insert_reward(&self, new: NewReward) -> RepositoryResult<Reward>;

    /// Retrieve a reward by id, active or not.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no such reward exists
    async fn get_reward(&self, id: RewardId) -> RepositoryResult<Reward>;

    /// List active catalog entries, cheapest first.
    async fn list_active_rewards(&self) -> RepositoryResult<Vec<Reward>>;

    /// Flip a reward's active flag.
    ///
    /// # Returns
    /// * `Ok(Reward)` - The updated entry
    /// * `Err(RepositoryError::NotFound)` - If no such reward exists
    async fn set_reward_active(&self, id: RewardId, active: bool) -> RepositoryResult<Reward>;

    /// Atomically apply a redemption.
    ///
    /// Under a single store-level guard: verify the reward id is not in the
    /// account's redeemed set, verify `points >= cost`, then debit the
    /// points, append the reward id to the redeemed set, insert the
    /// [`Redemption`] record (snapshotting `cost`) and insert the
    /// notification described by `notification_message`. Either all four
    /// writes land or none do; two racing identical calls yield exactly one
    /// `Redeemed` and one `AlreadyRedeemed`.
    ///
    /// # Arguments
    /// * `account_id` - Redeeming account
    /// * `reward_id` - Catalog entry being redeemed
    /// * `cost` - Point cost snapshotted into the redemption record
    /// * `notification_message` - Message for the notification inserted with
    ///   the redemption
    /// * `now` - Timestamp recorded on the redemption and notification
    ///
    /// # Returns
    /// * `Ok(RedemptionOutcome)` - What the store observed and applied
    /// * `Err(RepositoryError::NotFound)` - If no such account exists
    async fn apply_redemption(
        &self,
        account_id: AccountId,
        reward_id: RewardId,
        cost: u64,
        notification_message: String,
        now: DateTime<Utc>,
    ) -> RepositoryResult<RedemptionOutcome>;

    /// All redemption records for an account, newest first.
    async fn redemptions_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Redemption>>;

    /// Total number of redemption records in the store.
    async fn redemption_count(&self) -> RepositoryResult<u64>;
}
