use std::sync::Arc;

use meal_revival_api::auth::token::TokenKeys;
use meal_revival_api::config::AppConfig;
use meal_revival_api::state::AppState;
use meal_revival_api::store::postgres::{connect, PgDonationStore, PgUserStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and friends.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let pool = match connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgDonationStore::new(pool)),
        TokenKeys::new(&config.jwt_secret, config.jwt_expiry),
    );

    let app = meal_revival_api::app(state, &config.client_origin);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await.expect("server");
}
