//! Registration, login, profile, leaderboard and stats routes.

use crate::api::error::ApiResult;
use crate::api::types::{
    AuthResponse, LeaderboardEntry, LoginRequest, PrivateProfile, RegisterRequest, StatsResponse,
};
use crate::api::validation::{parse_enum, require_non_empty};
use crate::db::repository::FullRepository;
use crate::models::Role;
use crate::services::accounts as services;

use super::AppContext;

/// `POST /register` — create a user account and return its first token.
pub async fn register<R: FullRepository>(
    ctx: &AppContext<R>,
    request: RegisterRequest,
) -> ApiResult<AuthResponse> {
    require_non_empty("full_name", &request.full_name)?;
    require_non_empty("phone", &request.phone)?;
    require_non_empty("village", &request.village)?;
    require_non_empty("household_size", &request.household_size)?;
    require_non_empty("address", &request.address)?;
    require_non_empty("password", &request.password)?;

    services::register(ctx.repo.as_ref(), &ctx.auth, request).await
}

/// `POST /login` — authenticate as a user or administrator.
pub async fn login<R: FullRepository>(
    ctx: &AppContext<R>,
    request: LoginRequest,
) -> ApiResult<AuthResponse> {
    require_non_empty("username", &request.username)?;
    require_non_empty("password", &request.password)?;
    let role: Role = parse_enum("role", &request.role)?;

    services::login(
        ctx.repo.as_ref(),
        &ctx.auth,
        &request.username,
        &request.password,
        role,
    )
    .await
}

/// `GET /profile` — the authenticated account's own profile.
pub async fn profile<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
) -> ApiResult<PrivateProfile> {
    let claims = ctx.authenticate(token)?;
    services::profile(ctx.repo.as_ref(), claims.account_id()).await
}

/// `GET /leaderboard` — top accounts by points, public fields only.
pub async fn leaderboard<R: FullRepository>(
    ctx: &AppContext<R>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    services::leaderboard(ctx.repo.as_ref(), ctx.config.leaderboard.limit).await
}

/// `GET /stats` — public aggregate statistics.
pub async fn stats<R: FullRepository>(ctx: &AppContext<R>) -> ApiResult<StatsResponse> {
    services::stats(ctx.repo.as_ref()).await
}
