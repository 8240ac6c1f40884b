#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use meal_revival_api::auth::token::TokenKeys;
use meal_revival_api::state::AppState;
use meal_revival_api::store::memory::{MemoryDonationStore, MemoryUserStore};

pub const TEST_SECRET: &str = "SECRETTESTINGKEY";
pub const TEST_PASSWORD: &str = "correct-horse";
pub const CLIENT_ORIGIN: &str = "http://localhost:3000";

/// A fully wired app over fresh in-memory stores.
pub fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryDonationStore::new()),
        test_keys(),
    );
    meal_revival_api::app(state, CLIENT_ORIGIN)
}

pub fn test_keys() -> TokenKeys {
    TokenKeys::new(TEST_SECRET, Duration::from_secs(3 * 24 * 60 * 60))
}

/// Drive one request through the router and collect the JSON body (Null for
/// empty bodies).
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub fn sample_signup(email: &str) -> Value {
    json!({
        "email": email,
        "password": TEST_PASSWORD,
        "address": "  12 Mushroom Lane  ",
        "coords": { "Latitude": 40.7128, "Longitude": -74.006 }
    })
}

pub async fn signup(app: &Router, email: &str) -> Result<()> {
    let (status, body) =
        send_json(app, "POST", "/api/users", None, Some(sample_signup(email))).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {status} {body}");
    Ok(())
}

pub async fn login(app: &Router, email: &str, password: &str) -> Result<(StatusCode, Value)> {
    send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Sign up is assumed done; log in with the shared test password and return
/// the issued token.
pub async fn login_token(app: &Router, email: &str) -> Result<String> {
    let (status, body) = login(app, email, TEST_PASSWORD).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {status} {body}");
    body["authToken"]
        .as_str()
        .map(str::to_string)
        .context("missing authToken")
}
