//! Reward catalog services and the redemption transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{RedeemResponse, RewardDto};
use crate::db::repository::{FullRepository, RedemptionOutcome, RepositoryError};
use crate::models::{AccountId, NewReward, RewardId};
use crate::services::mail::{self, MailPort};
use crate::services::points;

/// Active catalog entries, cheapest first.
pub async fn list_rewards<R: FullRepository>(repo: &R) -> ApiResult<Vec<RewardDto>> {
    let rewards = repo.list_active_rewards().await?;
    Ok(rewards.iter().map(RewardDto::from).collect())
}

/// Create a catalog entry (admin operation).
pub async fn create_reward<R: FullRepository>(repo: &R, new: NewReward) -> ApiResult<RewardDto> {
    let reward = repo.insert_reward(new).await?;
    info!("created reward {} '{}'", reward.id, reward.title);
    Ok(RewardDto::from(&reward))
}

/// Deactivate a catalog entry (admin operation). The entry stays in the
/// store so historical redemptions keep resolving.
pub async fn deactivate_reward<R: FullRepository>(
    repo: &R,
    reward_id: RewardId,
) -> ApiResult<RewardDto> {
    let reward = repo.set_reward_active(reward_id, false).await?;
    info!("deactivated reward {} '{}'", reward.id, reward.title);
    Ok(RewardDto::from(&reward))
}

/// Exchange points for a reward, at most once per account per reward.
///
/// Precondition order follows the contract: the reward must exist and be
/// active (`NotFound`), must not already be redeemed (`AlreadyRedeemed`),
/// the account must hold the required tier (`Forbidden`), and the balance
/// must cover the cost (`InsufficientPoints`). The debit,
/// the redeemed-set append, the redemption record and the notification land
/// as one atomic store write; a confirmation email is dispatched after the
/// commit on a best-effort basis and never affects the result.
pub async fn redeem<R: FullRepository>(
    repo: &R,
    mailer: &Arc<dyn MailPort>,
    account_id: AccountId,
    reward_id: RewardId,
    now: DateTime<Utc>,
) -> ApiResult<RedeemResponse> {
    let reward = match repo.get_reward(reward_id).await {
        Ok(reward) if reward.is_active => reward,
        Ok(_) => {
            return Err(ApiError::NotFound(format!(
                "reward {} is no longer available",
                reward_id
            )))
        }
        Err(RepositoryError::NotFound(msg)) => return Err(ApiError::NotFound(msg)),
        Err(e) => return Err(e.into()),
    };

    let account = repo.get_account(account_id).await?;

    // A repeat attempt reports AlreadyRedeemed even when the balance has
    // since dropped below the reward's tier; the gate only applies to first
    // redemptions. The atomic apply below re-checks the set under the guard.
    if account.redeemed_rewards.contains(&reward.id) {
        return Err(ApiError::AlreadyRedeemed);
    }

    let level = points::tier_for(account.points).level;
    if level < reward.required_level {
        return Err(ApiError::Forbidden(format!(
            "'{}' requires level {}, account is level {}",
            reward.title, reward.required_level, level
        )));
    }

    let message = format!(
        "You redeemed '{}' for {} points.",
        reward.title, reward.points_required
    );

    let outcome = repo
        .apply_redemption(account_id, reward.id, reward.points_required, message, now)
        .await?;

    let new_balance = match outcome {
        RedemptionOutcome::Redeemed { new_balance } => new_balance,
        RedemptionOutcome::AlreadyRedeemed => return Err(ApiError::AlreadyRedeemed),
        RedemptionOutcome::InsufficientPoints { available } => {
            return Err(ApiError::InsufficientPoints {
                required: reward.points_required,
                available,
            })
        }
    };

    info!(
        "account {} redeemed reward {} for {} points",
        account_id, reward.id, reward.points_required
    );

    if let Some(email) = account.email.clone() {
        mail::dispatch_best_effort(
            Arc::clone(mailer),
            email,
            format!("Reward redeemed: {}", reward.title),
            format!(
                "Hi {},\n\nyou redeemed '{}' for {} points. Remaining balance: {}.",
                account.display_name, reward.title, reward.points_required, new_balance
            ),
        );
    }

    Ok(RedeemResponse {
        reward_title: reward.title,
        new_balance,
    })
}
