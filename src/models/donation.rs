use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Coords;

/// A donation listing. `user_id` is a plain string reference to the owning
/// identity; it is not validated against the user store, so dangling
/// references are possible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub user_id: String,
    /// Advisory freshness deadline; never enforced by the server.
    pub expiry: Option<DateTime<Utc>>,
    pub info: String,
    pub delivery: String,
    pub coords: Coords,
}

/// Donation fields ready for persistence. The owner id and coords come from
/// the acting identity, not the request body.
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub user_id: String,
    pub expiry: Option<DateTime<Utc>>,
    pub info: String,
    pub delivery: String,
    pub coords: Coords,
}
