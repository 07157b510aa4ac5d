//! Notification sink repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{AccountId, NewNotification, Notification};

/// Repository trait for the per-account notification sink.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification for one account.
    async fn insert_notification(&self, new: NewNotification) -> RepositoryResult<Notification>;

    /// All notifications for an account, newest first.
    async fn notifications_for_account(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Notification>>;

    /// Mark every unread notification for an account as read.
    ///
    /// # Returns
    /// The number of notifications flipped.
    async fn mark_all_read(&self, account_id: AccountId) -> RepositoryResult<usize>;
}
