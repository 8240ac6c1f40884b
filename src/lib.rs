pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;
pub mod validate;

use axum::http::{HeaderValue, StatusCode};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Assemble the full application router from injected stores and token
/// keys. Each route group is a pure function of the shared state; there is
/// no module-level registration.
pub fn app(state: AppState, client_origin: &str) -> Router {
    let cors = match client_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!("invalid CLIENT_ORIGIN {client_origin:?}, allowing any origin");
            CorsLayer::permissive()
        }
    };

    Router::new()
        .nest("/api/users", handlers::users::router(state.clone()))
        .nest("/api/auth", handlers::auth::router(state.clone()))
        .nest("/api/donations", handlers::donations::router(state))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Catch-all for unknown routes.
async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
