//! Point-assignment routes: admin collection logging and game credits.

use chrono::Utc;

use crate::api::error::ApiResult;
use crate::api::types::{
    AddGamePointsRequest, AddGamePointsResponse, AssignPointsRequest, AssignPointsResponse,
};
use crate::api::validation::{
    parse_enum, require_non_empty, require_positive_points, require_positive_weight,
};
use crate::db::repository::FullRepository;
use crate::models::WasteType;
use crate::services::auth::require_admin;
use crate::services::awards as services;

use super::AppContext;

/// `POST /assign-points` [admin] — log a waste collection and award points.
pub async fn assign_points<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    request: AssignPointsRequest,
) -> ApiResult<AssignPointsResponse> {
    let claims = ctx.authenticate(token)?;
    require_admin(&claims)?;

    require_non_empty("phone", &request.phone)?;
    let waste_type: WasteType = parse_enum("waste_type", &request.waste_type)?;
    require_positive_weight(request.weight_kg)?;

    // The collected_by field records the admin's identity, not their raw id.
    let admin = ctx.repo.get_account(claims.account_id()).await?;

    services::assign_collection_points(
        ctx.repo.as_ref(),
        &admin.identity,
        &request.phone,
        waste_type,
        request.weight_kg,
        Utc::now(),
    )
    .await
}

/// `POST /game-points` — credit mini-game points to the calling account.
pub async fn add_game_points<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    request: AddGamePointsRequest,
) -> ApiResult<AddGamePointsResponse> {
    let claims = ctx.authenticate(token)?;
    require_positive_points(request.points)?;
    require_non_empty("source", &request.source)?;

    services::add_game_points(
        ctx.repo.as_ref(),
        claims.account_id(),
        request.points,
        &request.source,
    )
    .await
}
