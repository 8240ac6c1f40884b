use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::PublicUser;
use crate::state::AppState;

/// Claims carried by an auth token: the serialized identity snapshot plus
/// the registered subject/expiry fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: PublicUser,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signing material and token lifetime, built once from configuration and
/// shared process-wide.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, expiry: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::from_std(expiry).unwrap_or_else(|_| Duration::days(3)),
        }
    }
}

/// Issue a token embedding `user`. Expiry is computed from now, so a token
/// refreshed before it lapses never comes back with a shorter lifetime.
pub fn create_auth_token(
    user: &PublicUser,
    keys: &TokenKeys,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        user: user.clone(),
        sub: user.email.clone(),
        exp: (now + keys.expiry).timestamp(),
        iat: now.timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
}

/// Verify a raw token and decode its claims. Bad signature, wrong
/// algorithm, and expired tokens all surface as a decode error.
pub fn decode_auth_token(
    token: &str,
    keys: &TokenKeys,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &keys.decoding, &validation).map(|data| data.claims)
}

/// The acting identity on an authenticated request, taken verbatim from the
/// token's embedded `user` claim. The store is not consulted, so profile
/// changes made after issuance are invisible until the client logs in again.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = decode_auth_token(token, &state.token_keys)
            .map_err(|_| ApiError::Unauthorized("invalid or expired token"))?;
        Ok(AuthUser(claims.user))
    }
}

/// Pull the token out of the Authorization header, Bearer scheme only.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("missing Authorization header"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid Authorization header"))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized("Authorization header must use Bearer scheme"))?;

    if token.trim().is_empty() {
        return Err(ApiError::Unauthorized("empty bearer token"));
    }
    Ok(token)
}
