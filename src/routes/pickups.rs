//! Pickup scheduling and administration routes.

use std::collections::BTreeSet;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{AdminPickupDto, PickupDto, SchedulePickupRequest, UpdatePickupStatusRequest};
use crate::api::validation::{parse_enum, require_non_empty};
use crate::db::repository::FullRepository;
use crate::models::{NewPickupRequest, PickupId, PickupStatus, QuantityBand, WasteType};
use crate::services::auth::require_admin;
use crate::services::pickups as services;

use super::AppContext;

/// `POST /pickups` — schedule a doorstep collection for the caller.
pub async fn schedule_pickup<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    request: SchedulePickupRequest,
) -> ApiResult<PickupDto> {
    let claims = ctx.authenticate(token)?;

    if request.waste_types.is_empty() {
        return Err(ApiError::InvalidInput(
            "'waste_types' must contain at least one category".to_string(),
        ));
    }
    let mut waste_types: BTreeSet<WasteType> = BTreeSet::new();
    for raw in &request.waste_types {
        waste_types.insert(parse_enum("waste_types", raw)?);
    }
    let quantity: QuantityBand = parse_enum("quantity", &request.quantity)?;
    require_non_empty("address", &request.address)?;
    require_non_empty("time_slot", &request.time_slot)?;

    services::schedule_pickup(
        ctx.repo.as_ref(),
        NewPickupRequest {
            account_id: claims.account_id(),
            waste_types,
            quantity,
            address: request.address,
            requested_date: request.requested_date,
            time_slot: request.time_slot,
        },
    )
    .await
}

/// `GET /pickups/my-pickups` — the caller's requests, newest first.
pub async fn my_pickups<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
) -> ApiResult<Vec<PickupDto>> {
    let claims = ctx.authenticate(token)?;
    services::my_pickups(ctx.repo.as_ref(), claims.account_id()).await
}

/// `GET /pickups/all` [admin] — every request with requester identity.
pub async fn all_pickups<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
) -> ApiResult<Vec<AdminPickupDto>> {
    let claims = ctx.authenticate(token)?;
    require_admin(&claims)?;
    services::all_pickups(ctx.repo.as_ref()).await
}

/// `PUT /pickups/:id` [admin] — transition a request's status.
pub async fn update_pickup_status<R: FullRepository>(
    ctx: &AppContext<R>,
    token: &str,
    pickup_id: PickupId,
    request: UpdatePickupStatusRequest,
) -> ApiResult<PickupDto> {
    let claims = ctx.authenticate(token)?;
    require_admin(&claims)?;

    let new_status: PickupStatus = parse_enum("status", &request.status)?;
    services::update_status(ctx.repo.as_ref(), pickup_id, new_status).await
}
