use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::password::authenticate_with_password;
use crate::auth::token::{create_auth_token, AuthUser};
use crate::error::ApiError;
use crate::models::PublicUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Routes under /api/auth.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .with_state(state)
}

/// POST /api/auth/login - verify credentials and issue a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::BadRequest("email and password are required".to_string()));
    };

    let user = authenticate_with_password(state.users.as_ref(), &email, &password).await?;

    let auth_token = create_auth_token(&PublicUser::from(&user), &state.token_keys)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(json!({ "authToken": auth_token })))
}

/// POST /api/auth/refresh - re-issue a token for the acting identity.
///
/// The identity is the old token's embedded snapshot, so profile changes
/// made since issuance do not show up in the refreshed token.
async fn refresh(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let auth_token = create_auth_token(&user, &state.token_keys)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(json!({ "authToken": auth_token })))
}
