//! In-memory store adapters backing the integration test suite. They honor
//! the same contracts as the Postgres adapters, including the unique-email
//! constraint on create.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DonationStore, StoreError, UserStore};
use crate::models::{Donation, NewDonation, NewUser, User, UserPatch};

#[derive(Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn count_by_email(&self, email: &str) -> Result<i64, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|user| user.email == email).count() as i64)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(StoreError::Conflict("users.email"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            company_name: String::new(),
            contact_name: String::new(),
            coords: new_user.coords,
            address: new_user.address,
            phone: String::new(),
            about: String::new(),
            profile_complete: false,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            if let Some(address) = patch.address {
                user.address = address;
            }
            if let Some(about) = patch.about {
                user.about = about;
            }
            if let Some(phone) = patch.phone {
                user.phone = phone;
            }
            if let Some(coords) = patch.coords {
                user.coords = coords;
            }
            if let Some(profile_complete) = patch.profile_complete {
                user.profile_complete = profile_complete;
            }
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryDonationStore {
    donations: Arc<RwLock<HashMap<Uuid, Donation>>>,
}

impl MemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationStore for MemoryDonationStore {
    async fn create(&self, new_donation: NewDonation) -> Result<Donation, StoreError> {
        let donation = Donation {
            id: Uuid::new_v4(),
            user_id: new_donation.user_id,
            expiry: new_donation.expiry,
            info: new_donation.info,
            delivery: new_donation.delivery,
            coords: new_donation.coords,
        };
        let mut donations = self.donations.write().await;
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn find_all(&self) -> Result<Vec<Donation>, StoreError> {
        let donations = self.donations.read().await;
        Ok(donations.values().cloned().collect())
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Donation>, StoreError> {
        let donations = self.donations.read().await;
        Ok(donations
            .values()
            .filter(|donation| donation.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut donations = self.donations.write().await;
        donations.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coords;

    fn sample_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            address: "12 Mushroom Lane".to_string(),
            coords: Coords { latitude: 40.7, longitude: -74.0 },
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(sample_user("dup@example.com")).await.unwrap();

        let err = store.create(sample_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.count_by_email("dup@example.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let store = MemoryUserStore::new();
        let user = store.create(sample_user("patch@example.com")).await.unwrap();

        store
            .update(
                user.id,
                UserPatch {
                    about: Some("day-old bread".to_string()),
                    profile_complete: Some(true),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap();

        let updated = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(updated.about, "day-old bread");
        assert!(updated.profile_complete);
        assert_eq!(updated.address, "12 Mushroom Lane");
    }
}
