//! Point-award orchestration: admin collection assignments and game credits.
//!
//! The computation itself lives in [`crate::services::points`]; this module
//! is the caller responsible for fetching trend history, appending the
//! ledger entry, crediting the account atomically and emitting a tier-up
//! notification when the new total crosses a threshold.

use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{AddGamePointsResponse, AssignPointsResponse};
use crate::db::repository::{FullRepository, PointsUpdate};
use crate::models::{AccountId, NewCollectionEvent, NewNotification, Role, WasteType};
use crate::services::points;

/// Assign points for a logged waste collection (admin operation).
///
/// Looks up the user by phone, computes the award (including the plastic
/// trend bonus over the account's trailing 30 days), credits the account and
/// appends the collection event. The tier-up notification compares tiers
/// computed from the pre- and post-award totals.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `collected_by` - Identity of the administrator logging the event
/// * `phone` - Phone number of the collecting household
/// * `waste_type` - Parsed waste category
/// * `weight_kg` - Collected weight; validated positive by the route layer
/// * `now` - Evaluation instant for the trend window and event timestamp
pub async fn assign_collection_points<R: FullRepository>(
    repo: &R,
    collected_by: &str,
    phone: &str,
    waste_type: WasteType,
    weight_kg: f64,
    now: DateTime<Utc>,
) -> ApiResult<AssignPointsResponse> {
    let account = repo
        .find_by_identity(phone, Role::User)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no account with phone '{}'", phone)))?;

    // Only plastic has a trend bonus, so only plastic needs history.
    let history = if waste_type == WasteType::Plastic {
        repo.collections_for_account_since(
            account.id,
            WasteType::Plastic,
            now - Duration::days(points::TREND_WINDOW_DAYS),
        )
        .await?
    } else {
        Vec::new()
    };

    let award = points::award(waste_type, weight_kg, &history, now);

    let update = repo.credit_points(account.id, award.points).await?;

    repo.insert_collection(NewCollectionEvent {
        account_id: account.id,
        waste_type,
        weight_kg,
        points: award.points,
        collected_by: collected_by.to_string(),
        date: now,
    })
    .await?;

    notify_if_tier_crossed(repo, account.id, update).await?;

    info!(
        "assigned {} points to account {} for {:.1} kg of {}",
        award.points, account.id, weight_kg, waste_type
    );

    Ok(AssignPointsResponse {
        points_awarded: award.points,
        explanation: award.explanation,
        new_balance: update.current_points,
        level: points::tier_for(update.current_points).level,
    })
}

/// Credit points earned in a recycling mini-game directly to the caller's
/// account. No per-kg computation; tier-crossing notification still applies.
pub async fn add_game_points<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
    game_points: u64,
    source: &str,
) -> ApiResult<AddGamePointsResponse> {
    let update = repo.credit_points(account_id, game_points).await?;

    notify_if_tier_crossed(repo, account_id, update).await?;

    info!(
        "credited {} game points ({}) to account {}",
        game_points, source, account_id
    );

    Ok(AddGamePointsResponse {
        new_balance: update.current_points,
        level: points::tier_for(update.current_points).level,
    })
}

/// Emit a tier-up notification when a point credit crossed a threshold.
async fn notify_if_tier_crossed<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
    update: PointsUpdate,
) -> ApiResult<()> {
    let before = points::tier_for(update.previous_points);
    let after = points::tier_for(update.current_points);
    if after.level > before.level {
        repo.insert_notification(NewNotification {
            account_id,
            message: format!(
                "Congratulations! You reached level {} ({}).",
                after.level, after.name
            ),
            link: Some("/dashboard".to_string()),
        })
        .await?;
    }
    Ok(())
}
