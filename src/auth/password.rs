use thiserror::Error;
use tokio::task;

use crate::models::User;
use crate::store::{StoreError, UserStore};

/// bcrypt work factor, matching the hashes already in production data.
const HASH_COST: u32 = 10;

pub const BAD_EMAIL: &str = "email or password not recognized";
pub const BAD_PASSWORD: &str = "incorrect password";

/// Failure from the blocking hash helpers.
#[derive(Debug, Error)]
pub enum HashError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task aborted: {0}")]
    Join(#[from] task::JoinError),
}

/// Why a login attempt did not produce an identity. Credential rejection
/// maps to 401; everything else is a system error and must not be conflated
/// with it.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    Rejected(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Verify an email/password pair against the store. Read-only; yields the
/// canonical identity on success.
///
/// The two rejection messages deliberately differ, matching the behavior
/// clients already observe.
pub async fn authenticate_with_password(
    store: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, LoginError> {
    let Some(user) = store.find_by_email(email).await? else {
        return Err(LoginError::Rejected(BAD_EMAIL));
    };

    let password = password.to_string();
    let hash = user.password_hash.clone();
    let is_valid = task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(HashError::from)?
        .map_err(HashError::from)?;

    if !is_valid {
        return Err(LoginError::Rejected(BAD_PASSWORD));
    }
    Ok(user)
}

/// Hash a plaintext password on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, HashError> {
    Ok(task::spawn_blocking(move || bcrypt::hash(password, HASH_COST)).await??)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coords, NewUser};
    use crate::store::memory::MemoryUserStore;

    async fn store_with_user(email: &str, password: &str) -> MemoryUserStore {
        let store = MemoryUserStore::new();
        let password_hash = hash_password(password.to_string()).await.unwrap();
        store
            .create(NewUser {
                email: email.to_string(),
                password_hash,
                address: "12 Mushroom Lane".to_string(),
                coords: Coords { latitude: 40.7, longitude: -74.0 },
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_without_revealing_which() {
        let store = store_with_user("known@example.com", "rightpassword").await;

        let err = authenticate_with_password(&store, "unknown@example.com", "whatever1")
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::Rejected(message) if message == BAD_EMAIL));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = store_with_user("known@example.com", "rightpassword").await;

        let err = authenticate_with_password(&store, "known@example.com", "wrongpassword")
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::Rejected(message) if message == BAD_PASSWORD));
    }

    #[tokio::test]
    async fn correct_credentials_yield_the_identity() {
        let store = store_with_user("known@example.com", "rightpassword").await;

        let user = authenticate_with_password(&store, "known@example.com", "rightpassword")
            .await
            .unwrap();
        assert_eq!(user.email, "known@example.com");
    }
}
