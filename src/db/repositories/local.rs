//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.
//!
//! Every conditional operation (`credit_points`, `apply_redemption`,
//! `transition_pickup`) performs its check and its writes inside a single
//! `write()` guard, which is the in-memory equivalent of the conditional
//! document update a production backend would issue.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// Stores all data in HashMaps and Vecs behind one `RwLock`, making it ideal
/// for unit tests and local development that need isolation and speed.
///
/// # Example
/// ```
/// use greenquest::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.account_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    accounts: HashMap<AccountId, Account>,
    collections: Vec<CollectionEvent>,
    rewards: HashMap<RewardId, Reward>,
    redemptions: Vec<Redemption>,
    pickups: HashMap<PickupId, PickupRequest>,
    notifications: Vec<Notification>,

    // ID counters
    next_account_id: i64,
    next_collection_id: i64,
    next_reward_id: i64,
    next_pickup_id: i64,
    next_notification_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            collections: Vec::new(),
            rewards: HashMap::new(),
            redemptions: Vec::new(),
            pickups: HashMap::new(),
            notifications: Vec::new(),
            next_account_id: 1,
            next_collection_id: 1,
            next_reward_id: 1,
            next_pickup_id: 1,
            next_notification_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of accounts stored.
    pub fn account_count(&self) -> usize {
        self.data.read().unwrap().accounts.len()
    }

    /// Number of collection events stored.
    pub fn collection_count(&self) -> usize {
        self.data.read().unwrap().collections.len()
    }

    /// Helper to check health and return an error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Store is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn account_not_found(id: AccountId) -> RepositoryError {
    RepositoryError::NotFound(format!("Account {} not found", id))
}

// ==================== Account Repository ====================

#[async_trait]
impl AccountRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn insert_account(&self, new: NewAccount) -> RepositoryResult<Account> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let taken = data
            .accounts
            .values()
            .any(|a| a.identity == new.identity && a.role == new.role);
        if taken {
            return Err(RepositoryError::Conflict(format!(
                "Identity '{}' is already registered",
                new.identity
            )));
        }

        let id = AccountId(data.next_account_id);
        data.next_account_id += 1;

        let account = Account {
            id,
            identity: new.identity,
            display_name: new.display_name,
            email: new.email,
            village: new.village,
            household_size: new.household_size,
            address: new.address,
            role: new.role,
            points: 0,
            redeemed_rewards: Default::default(),
            is_active: true,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };

        data.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: AccountId) -> RepositoryResult<Account> {
        let data = self.data.read().unwrap();
        data.accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| account_not_found(id))
    }

    async fn find_by_identity(
        &self,
        identity: &str,
        role: Role,
    ) -> RepositoryResult<Option<Account>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .accounts
            .values()
            .find(|a| a.identity == identity && a.role == role)
            .cloned())
    }

    async fn credit_points(&self, id: AccountId, points: u64) -> RepositoryResult<PointsUpdate> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let account = data.accounts.get_mut(&id).ok_or_else(|| account_not_found(id))?;
        let previous_points = account.points;
        account.points = previous_points.checked_add(points).ok_or_else(|| {
            RepositoryError::ValidationError(format!(
                "crediting {} points would overflow the balance of account {}",
                points, id
            ))
        })?;

        Ok(PointsUpdate {
            previous_points,
            current_points: account.points,
        })
    }

    async fn top_accounts(&self, limit: usize) -> RepositoryResult<Vec<Account>> {
        let data = self.data.read().unwrap();

        let mut users: Vec<Account> = data
            .accounts
            .values()
            .filter(|a| a.role == Role::User && a.is_active)
            .cloned()
            .collect();

        // Ties broken by id so the ordering is stable across calls
        users.sort_by(|a, b| b.points.cmp(&a.points).then(a.id.cmp(&b.id)));
        users.truncate(limit);
        Ok(users)
    }

    async fn account_stats(&self) -> RepositoryResult<AccountStats> {
        let data = self.data.read().unwrap();

        let users: Vec<&Account> = data
            .accounts
            .values()
            .filter(|a| a.role == Role::User)
            .collect();

        let villages: std::collections::HashSet<&str> = users
            .iter()
            .filter_map(|a| a.village.as_deref())
            .collect();

        Ok(AccountStats {
            households: users.len() as u64,
            villages: villages.len() as u64,
        })
    }
}

// ==================== Collection Repository ====================

#[async_trait]
impl CollectionRepository for LocalRepository {
    async fn insert_collection(
        &self,
        event: NewCollectionEvent,
    ) -> RepositoryResult<CollectionEvent> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !data.accounts.contains_key(&event.account_id) {
            return Err(account_not_found(event.account_id));
        }

        let id = CollectionId(data.next_collection_id);
        data.next_collection_id += 1;

        let stored = CollectionEvent {
            id,
            account_id: event.account_id,
            waste_type: event.waste_type,
            weight_kg: event.weight_kg,
            points: event.points,
            collected_by: event.collected_by,
            date: event.date,
        };

        data.collections.push(stored.clone());
        Ok(stored)
    }

    async fn collections_for_account_since(
        &self,
        account_id: AccountId,
        waste_type: WasteType,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<CollectionEvent>> {
        let data = self.data.read().unwrap();

        let mut events: Vec<CollectionEvent> = data
            .collections
            .iter()
            .filter(|c| {
                c.account_id == account_id && c.waste_type == waste_type && c.date >= since
            })
            .cloned()
            .collect();

        events.sort_by_key(|c| c.date);
        Ok(events)
    }

    async fn collection_stats(&self) -> RepositoryResult<CollectionStats> {
        let data = self.data.read().unwrap();
        Ok(CollectionStats {
            total_events: data.collections.len() as u64,
            total_weight_kg: data.collections.iter().map(|c| c.weight_kg).sum(),
        })
    }
}

// ==================== Reward Repository ====================

#[async_trait]
impl RewardRepository for LocalRepository {
    async fn insert_reward(&self, new: NewReward) -> RepositoryResult<Reward> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = RewardId(data.next_reward_id);
        data.next_reward_id += 1;

        let reward = Reward {
            id,
            title: new.title,
            description: new.description,
            points_required: new.points_required,
            category: new.category,
            required_level: new.required_level,
            is_active: true,
            created_at: Utc::now(),
        };

        data.rewards.insert(id, reward.clone());
        Ok(reward)
    }

    async fn get_reward(&self, id: RewardId) -> RepositoryResult<Reward> {
        let data = self.data.read().unwrap();
        data.rewards
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Reward {} not found", id)))
    }

    async fn list_active_rewards(&self) -> RepositoryResult<Vec<Reward>> {
        let data = self.data.read().unwrap();

        let mut rewards: Vec<Reward> = data
            .rewards
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect();

        rewards.sort_by(|a, b| {
            a.points_required
                .cmp(&b.points_required)
                .then(a.id.cmp(&b.id))
        });
        Ok(rewards)
    }

    async fn set_reward_active(&self, id: RewardId, active: bool) -> RepositoryResult<Reward> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let reward = data
            .rewards
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Reward {} not found", id)))?;
        reward.is_active = active;
        Ok(reward.clone())
    }

    async fn apply_redemption(
        &self,
        account_id: AccountId,
        reward_id: RewardId,
        cost: u64,
        notification_message: String,
        now: DateTime<Utc>,
    ) -> RepositoryResult<RedemptionOutcome> {
        self.check_health()?;

        // All checks and all four writes happen under this one guard; this is
        // the store-level atomic conditional write of the redemption contract.
        let mut data = self.data.write().unwrap();

        let account = data
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| account_not_found(account_id))?;

        if account.redeemed_rewards.contains(&reward_id) {
            return Ok(RedemptionOutcome::AlreadyRedeemed);
        }
        if account.points < cost {
            return Ok(RedemptionOutcome::InsufficientPoints {
                available: account.points,
            });
        }

        account.points -= cost;
        account.redeemed_rewards.insert(reward_id);
        let new_balance = account.points;

        data.redemptions.push(Redemption {
            account_id,
            reward_id,
            points_spent: cost,
            redeemed_at: now,
        });

        let notification_id = NotificationId(data.next_notification_id);
        data.next_notification_id += 1;
        data.notifications.push(Notification {
            id: notification_id,
            account_id,
            message: notification_message,
            read: false,
            link: Some("/dashboard/rewards".to_string()),
            created_at: now,
        });

        Ok(RedemptionOutcome::Redeemed { new_balance })
    }

    async fn redemptions_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Redemption>> {
        let data = self.data.read().unwrap();

        let mut redemptions: Vec<Redemption> = data
            .redemptions
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect();

        redemptions.sort_by(|a, b| b.redeemed_at.cmp(&a.redeemed_at));
        Ok(redemptions)
    }

    async fn redemption_count(&self) -> RepositoryResult<u64> {
        let data = self.data.read().unwrap();
        Ok(data.redemptions.len() as u64)
    }
}

// ==================== Pickup Repository ====================

#[async_trait]
impl PickupRepository for LocalRepository {
    async fn insert_pickup(&self, new: NewPickupRequest) -> RepositoryResult<PickupRequest> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !data.accounts.contains_key(&new.account_id) {
            return Err(account_not_found(new.account_id));
        }

        let id = PickupId(data.next_pickup_id);
        data.next_pickup_id += 1;

        let pickup = PickupRequest {
            id,
            account_id: new.account_id,
            waste_types: new.waste_types,
            quantity: new.quantity,
            address: new.address,
            requested_date: new.requested_date,
            time_slot: new.time_slot,
            status: PickupStatus::Pending,
            created_at: Utc::now(),
        };

        data.pickups.insert(id, pickup.clone());
        Ok(pickup)
    }

    async fn get_pickup(&self, id: PickupId) -> RepositoryResult<PickupRequest> {
        let data = self.data.read().unwrap();
        data.pickups
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Pickup {} not found", id)))
    }

    async fn pickups_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        let data = self.data.read().unwrap();

        let mut pickups: Vec<PickupRequest> = data
            .pickups
            .values()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect();

        pickups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(pickups)
    }

    async fn all_pickups(&self) -> RepositoryResult<Vec<(PickupRequest, Account)>> {
        let data = self.data.read().unwrap();

        let mut joined: Vec<(PickupRequest, Account)> = data
            .pickups
            .values()
            .filter_map(|p| {
                data.accounts
                    .get(&p.account_id)
                    .map(|a| (p.clone(), a.clone()))
            })
            .collect();

        joined.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at).then(b.0.id.cmp(&a.0.id)));
        Ok(joined)
    }

    async fn transition_pickup(
        &self,
        id: PickupId,
        new_status: PickupStatus,
    ) -> RepositoryResult<TransitionOutcome> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let pickup = data
            .pickups
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Pickup {} not found", id)))?;

        if !pickup.status.can_transition_to(new_status) {
            return Ok(TransitionOutcome::Rejected {
                current: pickup.status,
            });
        }

        pickup.status = new_status;
        Ok(TransitionOutcome::Transitioned(pickup.clone()))
    }
}

// ==================== Notification Repository ====================

#[async_trait]
impl NotificationRepository for LocalRepository {
    async fn insert_notification(&self, new: NewNotification) -> RepositoryResult<Notification> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !data.accounts.contains_key(&new.account_id) {
            return Err(account_not_found(new.account_id));
        }

        let id = NotificationId(data.next_notification_id);
        data.next_notification_id += 1;

        let notification = Notification {
            id,
            account_id: new.account_id,
            message: new.message,
            read: false,
            link: new.link,
            created_at: Utc::now(),
        };

        data.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn notifications_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Notification>> {
        let data = self.data.read().unwrap();

        let mut notifications: Vec<Notification> = data
            .notifications
            .iter()
            .filter(|n| n.account_id == account_id)
            .cloned()
            .collect();

        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notifications)
    }

    async fn mark_all_read(&self, account_id: AccountId) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let mut updated = 0;
        for n in data
            .notifications
            .iter_mut()
            .filter(|n| n.account_id == account_id && !n.read)
        {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(identity: &str) -> NewAccount {
        NewAccount {
            identity: identity.to_string(),
            display_name: "Test User".to_string(),
            email: None,
            village: Some("Greendale".to_string()),
            household_size: Some("4".to_string()),
            address: Some("12 Main St".to_string()),
            role: Role::User,
            password_hash: "hash".to_string(),
        }
    }

    fn new_reward(points_required: u64) -> NewReward {
        NewReward {
            title: "Electricity Discount".to_string(),
            description: "₹50 off".to_string(),
            points_required,
            category: RewardCategory::Discount,
            required_level: 1,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_account_rejects_duplicate_identity() {
        let repo = LocalRepository::new();

        repo.insert_account(new_user("9900112233")).await.unwrap();
        let result = repo.insert_account(new_user("9900112233")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));

        // Same identity with a different role is a distinct account
        let mut admin = new_user("9900112233");
        admin.role = Role::Admin;
        assert!(repo.insert_account(admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_credit_points_reports_before_and_after() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("111")).await.unwrap();

        let update = repo.credit_points(account.id, 150).await.unwrap();
        assert_eq!(update.previous_points, 0);
        assert_eq!(update.current_points, 150);

        let update = repo.credit_points(account.id, 50).await.unwrap();
        assert_eq!(update.previous_points, 150);
        assert_eq!(update.current_points, 200);
    }

    #[tokio::test]
    async fn test_credit_points_rejects_overflow() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("666")).await.unwrap();
        repo.credit_points(account.id, u64::MAX).await.unwrap();

        let result = repo.credit_points(account.id, 1).await;
        assert!(matches!(result, Err(RepositoryError::ValidationError(_))));

        // The failed credit left the balance unchanged
        let account = repo.get_account(account.id).await.unwrap();
        assert_eq!(account.points, u64::MAX);
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();
        let result = repo.get_account(AccountId(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_apply_redemption_debits_once() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("222")).await.unwrap();
        let reward = repo.insert_reward(new_reward(100)).await.unwrap();
        repo.credit_points(account.id, 250).await.unwrap();

        let outcome = repo
            .apply_redemption(account.id, reward.id, 100, "Redeemed!".to_string(), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, RedemptionOutcome::Redeemed { new_balance: 150 });

        // Second attempt is rejected without touching the balance
        let outcome = repo
            .apply_redemption(account.id, reward.id, 100, "Redeemed!".to_string(), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, RedemptionOutcome::AlreadyRedeemed);

        let account = repo.get_account(account.id).await.unwrap();
        assert_eq!(account.points, 150);
        assert_eq!(repo.redemptions_for_account(account.id).await.unwrap().len(), 1);
        // Redemption inserted its notification in the same write
        assert_eq!(
            repo.notifications_for_account(account.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_apply_redemption_insufficient_points_leaves_state_unchanged() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("333")).await.unwrap();
        let reward = repo.insert_reward(new_reward(500)).await.unwrap();
        repo.credit_points(account.id, 80).await.unwrap();

        let outcome = repo
            .apply_redemption(account.id, reward.id, 500, "Redeemed!".to_string(), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, RedemptionOutcome::InsufficientPoints { available: 80 });

        let account = repo.get_account(account.id).await.unwrap();
        assert_eq!(account.points, 80);
        assert!(account.redeemed_rewards.is_empty());
        assert_eq!(repo.redemption_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transition_pickup_enforces_machine() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("444")).await.unwrap();

        let pickup = repo
            .insert_pickup(NewPickupRequest {
                account_id: account.id,
                waste_types: [WasteType::Plastic].into_iter().collect(),
                quantity: QuantityBand::Small,
                address: "12 Main St".to_string(),
                requested_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                time_slot: "morning".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(pickup.status, PickupStatus::Pending);

        let outcome = repo
            .transition_pickup(pickup.id, PickupStatus::Completed)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            TransitionOutcome::Rejected {
                current: PickupStatus::Pending
            }
        );

        let outcome = repo
            .transition_pickup(pickup.id, PickupStatus::Confirmed)
            .await
            .unwrap();
        assert!(matches!(outcome, TransitionOutcome::Transitioned(_)));
    }

    #[tokio::test]
    async fn test_mark_all_read_is_bulk_and_idempotent() {
        let repo = LocalRepository::new();
        let account = repo.insert_account(new_user("555")).await.unwrap();

        for i in 0..3 {
            repo.insert_notification(NewNotification {
                account_id: account.id,
                message: format!("message {}", i),
                link: None,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.mark_all_read(account.id).await.unwrap(), 3);
        assert_eq!(repo.mark_all_read(account.id).await.unwrap(), 0);
    }
}
