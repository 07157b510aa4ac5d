//! Reward catalog and redemption routes.

use chrono::Utc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{CreateRewardRequest, RedeemResponse, RewardDto};
use crate::api::validation::{parse_enum, require_non_empty, require_positive_points};
use crate::db::repository::FullRepository;
use crate::models::{NewReward, RewardCategory, RewardId};
use crate::services::auth::require_admin;
use crate::services::points;
use crate::services::rewards as services;

use super::AppContext;

/// `GET /rewards` — the active catalog.
pub async fn rewards<R: FullRepository>(ctx: &AppContext<R>) -> ApiResult<Vec<RewardDto>> {
    services::list_rewards(ctx.repo.as_ref()).await
}

/// `POST /rewards` [admin] — create a catalog entry.
pub async fn create_reward<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    request: CreateRewardRequest,
) -> ApiResult<RewardDto> {
    let claims = ctx.authenticate(token)?;
    require_admin(&claims)?;

    require_non_empty("title", &request.title)?;
    require_positive_points(request.points_required)?;
    let category: RewardCategory = parse_enum("category", &request.category)?;

    let max_level = points::TIERS[0].level;
    if request.required_level < 1 || request.required_level > max_level {
        return Err(ApiError::InvalidInput(format!(
            "'required_level' must be between 1 and {}",
            max_level
        )));
    }

    services::create_reward(
        ctx.repo.as_ref(),
        NewReward {
            title: request.title,
            description: request.description,
            points_required: request.points_required,
            category,
            required_level: request.required_level,
        },
    )
    .await
}

/// `DELETE /rewards/:id` [admin] — deactivate a catalog entry.
pub async fn deactivate_reward<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    reward_id: RewardId,
) -> ApiResult<RewardDto> {
    let claims = ctx.authenticate(token)?;
    require_admin(&claims)?;

    services::deactivate_reward(ctx.repo.as_ref(), reward_id).await
}

/// `POST /rewards/:id/redeem` — exchange points for a reward.
pub async fn redeem_reward<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    reward_id: RewardId,
) -> ApiResult<RedeemResponse> {
    let claims = ctx.authenticate(token)?;

    services::redeem(
        ctx.repo.as_ref(),
        &ctx.mailer,
        claims.account_id(),
        reward_id,
        Utc::now(),
    )
    .await
}
