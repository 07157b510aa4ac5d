//! Account services: registration, login, profiles, leaderboard, platform
//! stats and first-run bootstrap.

use log::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{
    AuthResponse, LeaderboardEntry, PrivateProfile, PublicProfile, RegisterRequest, StatsResponse,
};
use crate::config::BootstrapSettings;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{AccountId, NewAccount, Role};
use crate::services::auth::AuthCodec;
use crate::services::points;

/// Register a new user account and issue its first token.
///
/// Fails `Conflict` if the phone number is already registered. The request
/// is assumed field-validated by the route layer; this function only hashes
/// the password and persists.
pub async fn register<R: FullRepository>(
    repo: &R,
    codec: &AuthCodec,
    request: RegisterRequest,
) -> ApiResult<AuthResponse> {
    let password_hash = codec.hash_password(&request.password)?;

    let account = repo
        .insert_account(NewAccount {
            identity: request.phone,
            display_name: request.full_name,
            email: request.email,
            village: Some(request.village),
            household_size: Some(request.household_size),
            address: Some(request.address),
            role: Role::User,
            password_hash,
        })
        .await?;

    info!("registered account {} ({})", account.id, account.identity);

    let token = codec.issue(account.id, account.role)?;
    Ok(AuthResponse {
        token,
        profile: PublicProfile::from(&account),
    })
}

/// Authenticate by identity and password within a role.
///
/// Every failure path — unknown identity, wrong password, deactivated
/// account — reports the same `Unauthorized` message, so callers cannot
/// probe which phone numbers are registered.
pub async fn login<R: FullRepository>(
    repo: &R,
    codec: &AuthCodec,
    identity: &str,
    password: &str,
    role: Role,
) -> ApiResult<AuthResponse> {
    let invalid = || ApiError::Unauthorized("invalid credentials".to_string());

    let account = repo
        .find_by_identity(identity, role)
        .await?
        .ok_or_else(invalid)?;

    if !account.is_active || !codec.verify_password(password, &account.password_hash)? {
        return Err(invalid());
    }

    let token = codec.issue(account.id, account.role)?;
    Ok(AuthResponse {
        token,
        profile: PublicProfile::from(&account),
    })
}

/// Full profile of the authenticated account, minus the password hash.
pub async fn profile<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
) -> ApiResult<PrivateProfile> {
    let account = repo.get_account(account_id).await?;
    Ok(PrivateProfile::from(&account))
}

/// Top accounts by points, public fields only.
pub async fn leaderboard<R: FullRepository>(
    repo: &R,
    limit: usize,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let accounts = repo.top_accounts(limit).await?;

    Ok(accounts
        .iter()
        .enumerate()
        .map(|(i, account)| LeaderboardEntry {
            rank: i + 1,
            display_name: account.display_name.clone(),
            village: account.village.clone(),
            points: account.points,
            level: points::tier_for(account.points).level,
        })
        .collect())
}

/// Aggregate platform statistics for the landing page.
pub async fn stats<R: FullRepository>(repo: &R) -> ApiResult<StatsResponse> {
    let accounts = repo.account_stats().await?;
    let collections = repo.collection_stats().await?;
    let rewards_redeemed = repo.redemption_count().await?;

    Ok(StatsResponse {
        households: accounts.households,
        villages: accounts.villages,
        waste_collected_kg: collections.total_weight_kg,
        rewards_redeemed,
    })
}

/// Create the default administrator account if it does not exist yet.
///
/// Idempotent: safe to run on every startup. A concurrent duplicate insert
/// is treated as success.
pub async fn seed_default_admin<R: FullRepository>(
    repo: &R,
    codec: &AuthCodec,
    bootstrap: &BootstrapSettings,
) -> ApiResult<()> {
    if repo
        .find_by_identity(&bootstrap.default_admin_id, Role::Admin)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = codec.hash_password(&bootstrap.default_admin_password)?;
    match repo
        .insert_account(NewAccount {
            identity: bootstrap.default_admin_id.clone(),
            display_name: bootstrap.default_admin_name.clone(),
            email: None,
            village: None,
            household_size: None,
            address: None,
            role: Role::Admin,
            password_hash,
        })
        .await
    {
        Ok(account) => {
            info!("created default admin account {}", account.identity);
            Ok(())
        }
        Err(RepositoryError::Conflict(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
