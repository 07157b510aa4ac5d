//! Pickup workflow services.

use log::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{AdminPickupDto, PickupDto};
use crate::db::repository::{FullRepository, TransitionOutcome};
use crate::models::{AccountId, NewPickupRequest, NewNotification, PickupId, PickupStatus};

/// Create a pickup request for the calling account. Requests always start in
/// `Pending`; only administrators move them from there.
pub async fn schedule_pickup<R: FullRepository>(
    repo: &R,
    new: NewPickupRequest,
) -> ApiResult<PickupDto> {
    let pickup = repo.insert_pickup(new).await?;
    info!(
        "account {} scheduled pickup {} for {}",
        pickup.account_id, pickup.id, pickup.requested_date
    );
    Ok(PickupDto::from(&pickup))
}

/// Requests owned by the calling account, newest first.
pub async fn my_pickups<R: FullRepository>(
    repo: &R,
    account_id: AccountId,
) -> ApiResult<Vec<PickupDto>> {
    let pickups = repo.pickups_for_account(account_id).await?;
    Ok(pickups.iter().map(PickupDto::from).collect())
}

/// All requests joined with the requester's public identity (admin queue).
pub async fn all_pickups<R: FullRepository>(repo: &R) -> ApiResult<Vec<AdminPickupDto>> {
    let joined = repo.all_pickups().await?;

    Ok(joined
        .iter()
        .map(|(pickup, account)| AdminPickupDto {
            pickup: PickupDto::from(pickup),
            requester_name: account.display_name.clone(),
            requester_phone: account.identity.clone(),
            requester_village: account.village.clone(),
        })
        .collect())
}

/// Transition a pickup request's status (admin operation).
///
/// The legality check happens inside the store guard; an illegal move —
/// backward, out of a terminal state, or any other combination the machine
/// forbids — fails `InvalidInput` and changes nothing. A successful
/// transition notifies the requesting account with the new status.
pub async fn update_status<R: FullRepository>(
    repo: &R,
    pickup_id: PickupId,
    new_status: PickupStatus,
) -> ApiResult<PickupDto> {
    let pickup = match repo.transition_pickup(pickup_id, new_status).await? {
        TransitionOutcome::Transitioned(pickup) => pickup,
        TransitionOutcome::Rejected { current } => {
            return Err(ApiError::InvalidInput(format!(
                "cannot move pickup {} from {} to {}",
                pickup_id, current, new_status
            )))
        }
    };

    repo.insert_notification(NewNotification {
        account_id: pickup.account_id,
        message: format!(
            "Your pickup for {} is now {}.",
            pickup.requested_date, pickup.status
        ),
        link: Some("/dashboard/pickups".to_string()),
    })
    .await?;

    info!("pickup {} moved to {}", pickup.id, pickup.status);
    Ok(PickupDto::from(&pickup))
}
