use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{DonationStore, StoreError, UserStore};
use crate::models::{Coords, Donation, NewDonation, NewUser, User, UserPatch};

/// Connect a pool and make sure both tables exist.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new().connect(database_url).await?;
    init_schema(&pool).await?;
    info!("connected to database");
    Ok(pool)
}

async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            company_name TEXT NOT NULL DEFAULT '',
            contact_name TEXT NOT NULL DEFAULT '',
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            about TEXT NOT NULL DEFAULT '',
            profile_complete BOOLEAN NOT NULL DEFAULT FALSE
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS donations (
            id UUID PRIMARY KEY,
            user_id TEXT NOT NULL,
            expiry TIMESTAMPTZ,
            info TEXT NOT NULL DEFAULT '',
            delivery TEXT NOT NULL DEFAULT '',
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

const USER_COLUMNS: &str = "id, email, password_hash, company_name, contact_name, \
     latitude, longitude, address, phone, about, profile_complete";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    company_name: String,
    contact_name: String,
    latitude: f64,
    longitude: f64,
    address: String,
    phone: String,
    about: String,
    profile_complete: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            company_name: row.company_name,
            contact_name: row.contact_name,
            coords: Coords { latitude: row.latitude, longitude: row.longitude },
            address: row.address,
            phone: row.phone,
            about: row.about,
            profile_complete: row.profile_complete,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn count_by_email(&self, email: &str) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, address, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.address)
        .bind(new_user.coords.latitude)
        .bind(new_user.coords.longitude)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.constraint().is_some()) {
                StoreError::Conflict("users.email")
            } else {
                StoreError::Sqlx(e)
            }
        })?;

        Ok(User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            company_name: String::new(),
            contact_name: String::new(),
            coords: new_user.coords,
            address: new_user.address,
            phone: String::new(),
            about: String::new(),
            profile_complete: false,
        })
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE users SET
                address = COALESCE($2, address),
                about = COALESCE($3, about),
                phone = COALESCE($4, phone),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                profile_complete = COALESCE($7, profile_complete)
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.address)
        .bind(patch.about)
        .bind(patch.phone)
        .bind(patch.coords.map(|c| c.latitude))
        .bind(patch.coords.map(|c| c.longitude))
        .bind(patch.profile_complete)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct DonationRow {
    id: Uuid,
    user_id: String,
    expiry: Option<DateTime<Utc>>,
    info: String,
    delivery: String,
    latitude: f64,
    longitude: f64,
}

impl From<DonationRow> for Donation {
    fn from(row: DonationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            expiry: row.expiry,
            info: row.info,
            delivery: row.delivery,
            coords: Coords { latitude: row.latitude, longitude: row.longitude },
        }
    }
}

const DONATION_COLUMNS: &str = "id, user_id, expiry, info, delivery, latitude, longitude";

#[derive(Clone)]
pub struct PgDonationStore {
    pool: PgPool,
}

impl PgDonationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for PgDonationStore {
    async fn create(&self, new_donation: NewDonation) -> Result<Donation, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO donations (id, user_id, expiry, info, delivery, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(&new_donation.user_id)
        .bind(new_donation.expiry)
        .bind(&new_donation.info)
        .bind(&new_donation.delivery)
        .bind(new_donation.coords.latitude)
        .bind(new_donation.coords.longitude)
        .execute(&self.pool)
        .await?;

        Ok(Donation {
            id,
            user_id: new_donation.user_id,
            expiry: new_donation.expiry,
            info: new_donation.info,
            delivery: new_donation.delivery,
            coords: new_donation.coords,
        })
    }

    async fn find_all(&self) -> Result<Vec<Donation>, StoreError> {
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Donation::from).collect())
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Donation>, StoreError> {
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Donation::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
