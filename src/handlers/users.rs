use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::token::AuthUser;
use crate::error::ApiError;
use crate::models::{NewUser, PublicUser, UserPatch};
use crate::state::AppState;
use crate::validate::{validate_signup, ValidationFailure};

/// Routes under /api/users.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(signup))
        .route("/:id", get(profile).patch(update_profile))
        .with_state(state)
}

/// POST /api/users - create an identity after the ordered field checks.
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let signup = validate_signup(&body)?;

    // Racy by design: two concurrent signups can both pass this check. The
    // store's unique constraint rejects the loser, which surfaces as a
    // plain 500.
    if state.users.count_by_email(&signup.email).await? > 0 {
        return Err(ValidationFailure::new("email already has account", Some("email")).into());
    }

    let password_hash = hash_password(signup.password).await?;
    state
        .users
        .create(NewUser {
            email: signup.email,
            password_hash,
            address: signup.address.trim().to_string(),
            coords: signup.coords,
        })
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /api/users/:id - public profile lookup, no auth required.
async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("invalid user id".to_string()))?;

    let user = state.users.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(PublicUser::from(&user)))
}

/// PATCH /api/users/:id - partial profile update, owner only.
async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
    Json(patch): Json<UserPatch>,
) -> Result<StatusCode, ApiError> {
    if id != user.id.to_string() {
        return Err(ApiError::IdMismatch);
    }

    state.users.update(user.id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}
