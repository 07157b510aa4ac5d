//! Pickup request repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Account, AccountId, NewPickupRequest, PickupId, PickupRequest, PickupStatus};

/// Outcome of an attempted status transition, decided under the store guard.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The transition was legal and has been applied.
    Transitioned(PickupRequest),
    /// The machine forbids moving from `current` to the requested status.
    Rejected { current: PickupStatus },
}

/// Repository trait for pickup requests.
#[async_trait]
pub trait PickupRepository: Send + Sync {
    /// Insert a new request in `Pending` status.
    async fn insert_pickup(&self, new: NewPickupRequest) -> RepositoryResult<PickupRequest>;

    /// Retrieve a request by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no such request exists
    async fn get_pickup(&self, id: PickupId) -> RepositoryResult<PickupRequest>;

    /// All requests owned by one account, newest first.
    async fn pickups_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<PickupRequest>>;

    /// All requests joined with their requesting account, newest first.
    /// Admin queue view.
    async fn all_pickups(&self) -> RepositoryResult<Vec<(PickupRequest, Account)>>;

    /// Atomically transition a request's status.
    ///
    /// The legality check ([`PickupStatus::can_transition_to`]) and the write
    /// happen under one store guard, so two racing transitions observe each
    /// other.
    ///
    /// # Returns
    /// * `Ok(TransitionOutcome)` - Applied, or rejected with the current status
    /// * `Err(RepositoryError::NotFound)` - If no such request exists
    async fn transition_pickup(
        &self,
        id: PickupId,
        new_status: PickupStatus,
    ) -> RepositoryResult<TransitionOutcome>;
}
