pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Donation, NewDonation, NewUser, User, UserPatch};

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-constraint violation. Reaches the client as a generic 500:
    /// the only writer that can hit it is a signup racing the uniqueness
    /// check, and that window is accepted rather than closed.
    #[error("unique constraint violated on {0}")]
    Conflict(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for user identities.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn count_by_email(&self, email: &str) -> Result<i64, StoreError>;

    /// Create an identity. Fails with [`StoreError::Conflict`] when the
    /// email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Apply a partial profile update. Updating an unknown id is a no-op.
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<(), StoreError>;
}

/// Persistence for donation listings.
#[async_trait]
pub trait DonationStore: Send + Sync {
    async fn create(&self, new_donation: NewDonation) -> Result<Donation, StoreError>;

    async fn find_all(&self) -> Result<Vec<Donation>, StoreError>;

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Donation>, StoreError>;

    /// Delete by id. Deleting an id that is already gone is a no-op.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}
