//! Notification routes.

use crate::api::error::ApiResult;
use crate::api::types::{MarkReadResponse, NotificationDto};
use crate::db::repository::FullRepository;
use crate::services::notifications as services;

use super::AppContext;

/// `GET /notifications` — the caller's notifications, newest first.
pub async fn notifications<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
) -> ApiResult<Vec<NotificationDto>> {
    let claims = ctx.authenticate(token)?;
    services::list(ctx.repo.as_ref(), claims.account_id()).await
}

/// `POST /notifications/mark-read` — bulk mark-read for the caller.
pub async fn mark_notifications_read<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
) -> ApiResult<MarkReadResponse> {
    let claims = ctx.authenticate(token)?;
    services::mark_all_read(ctx.repo.as_ref(), claims.account_id()).await
}
