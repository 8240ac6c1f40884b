use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::token::AuthUser;
use crate::error::ApiError;
use crate::models::{Donation, NewDonation};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DonationRequest {
    expiry: Option<DateTime<Utc>>,
    info: Option<String>,
    delivery: Option<String>,
}

/// Routes under /api/donations.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(by_owner).delete(remove))
        .with_state(state)
}

/// GET /api/donations - the full donation feed, no auth required.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Donation>>, ApiError> {
    Ok(Json(state.donations.find_all().await?))
}

/// GET /api/donations/:userId - listings for one owner. Unknown owners
/// yield an empty array, not an error.
async fn by_owner(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Donation>>, ApiError> {
    Ok(Json(state.donations.find_by_owner(&user_id).await?))
}

/// POST /api/donations - create a listing owned by the acting identity.
///
/// No field validation here. Coords are copied from the identity snapshot
/// at creation time and never re-synced afterward.
async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<DonationRequest>,
) -> Result<(StatusCode, Json<Donation>), ApiError> {
    let donation = state
        .donations
        .create(NewDonation {
            user_id: user.id.to_string(),
            expiry: body.expiry,
            info: body.info.unwrap_or_default(),
            delivery: body.delivery.unwrap_or_default(),
            coords: user.coords,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(donation)))
}

/// DELETE /api/donations/:id - remove a listing. Always terminates the
/// request with a response, including on store failure.
async fn remove(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("invalid donation id".to_string()))?;

    state.donations.delete_by_id(id).await?;
    tracing::info!(%id, "deleted donation");
    Ok(StatusCode::NO_CONTENT)
}
