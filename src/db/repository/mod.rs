//! Repository trait definitions for the waste-management store.
//!
//! This module provides a collection of focused repository traits that
//! abstract the backing document store. By splitting responsibilities across
//! multiple traits, implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`accounts`]: Account CRUD and atomic point mutations
//! - [`collections`]: Append-only waste-collection ledger
//! - [`rewards`]: Reward catalog and the atomic redemption write
//! - [`pickups`]: Pickup requests and their status transitions
//! - [`notifications`]: Per-account notification sink
//!
//! # Atomicity
//!
//! Operations that mutate an account's point total or redeemed-reward set are
//! defined as single conditional repository calls
//! ([`accounts::AccountRepository::credit_points`],
//! [`rewards::RewardRepository::apply_redemption`],
//! [`pickups::PickupRepository::transition_pickup`]) so implementations can
//! map them to one guarded read-modify-write. Application code never does a
//! read-then-write pair around these; two racing requests can therefore never
//! produce a lost point update or a double redemption.
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let account = repo.get_account(account_id).await?;
//!     repo.insert_notification(note).await?;
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod collections;
pub mod error;
pub mod notifications;
pub mod pickups;
pub mod rewards;

// Re-export error types
pub use error::{RepositoryError, RepositoryResult};

// Re-export all traits and operation outcome types
pub use accounts::{AccountRepository, AccountStats, PointsUpdate};
pub use collections::{CollectionRepository, CollectionStats};
pub use notifications::NotificationRepository;
pub use pickups::{PickupRepository, TransitionOutcome};
pub use rewards::{RedemptionOutcome, RewardRepository};

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all five
/// repository traits. Use this as a convenient bound when a service needs
/// access to the whole store.
pub trait FullRepository:
    AccountRepository
    + CollectionRepository
    + RewardRepository
    + PickupRepository
    + NotificationRepository
{
}

// Blanket implementation: implementing all five traits implies FullRepository
impl<T> FullRepository for T where
    T: AccountRepository
        + CollectionRepository
        + RewardRepository
        + PickupRepository
        + NotificationRepository
{
}
