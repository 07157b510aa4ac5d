//! Notification sink services.

use crate::api::error::ApiResult;
use crate::api::types::{MarkReadResponse, NotificationDto};
use crate::db::repository::FullRepository;
use crate::models::AccountId;

/// Notifications for the calling account, newest first.
pub async fn list<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
) -> ApiResult<Vec<NotificationDto>> {
    let notifications = repo.notifications_for_account(account_id).await?;
    Ok(notifications.iter().map(NotificationDto::from).collect())
}

/// Mark every unread notification for the calling account as read.
pub async fn mark_all_read<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
) -> ApiResult<MarkReadResponse> {
    let updated = repo.mark_all_read(account_id).await?;
    Ok(MarkReadResponse { updated })
}
