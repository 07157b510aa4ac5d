//! Per-account notification messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, NotificationId};

/// A message surfaced to one account. Created by system events (tier-up,
/// redemption, pickup status change); the only mutation ever applied is
/// flipping `read`, in bulk per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub account_id: AccountId,
    pub message: String,
    pub read: bool,
    /// Optional client-side navigation target, e.g. `/dashboard/rewards`.
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to append a notification; `read` starts false and the
/// repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub account_id: AccountId,
    pub message: String,
    pub link: Option<String>,
}
