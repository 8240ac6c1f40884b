use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Latitude/longitude pair. The wire format uses capitalized keys, which
/// existing clients depend on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// A stored user identity. The password hash never leaves this type;
/// convert to [`PublicUser`] before serializing anywhere.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub company_name: String,
    pub contact_name: String,
    pub coords: Coords,
    pub address: String,
    pub phone: String,
    pub about: String,
    pub profile_complete: bool,
}

/// The serialized form of an identity: password hash stripped, internal id
/// exposed as a public `id`. This is the shape returned by profile lookups
/// and embedded verbatim in auth tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub company_name: String,
    pub contact_name: String,
    pub coords: Coords,
    pub address: String,
    pub about: String,
    pub phone: String,
    pub profile_complete: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            company_name: user.company_name.clone(),
            contact_name: user.contact_name.clone(),
            coords: user.coords,
            address: user.address.clone(),
            about: user.about.clone(),
            phone: user.phone.clone(),
            profile_complete: user.profile_complete,
        }
    }
}

/// Fields persisted on signup. Every other profile field starts at its
/// default and is filled in later via the profile patch.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub coords: Coords,
}

/// Partial profile update. Only these five fields are patchable; anything
/// else in the request body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub address: Option<String>,
    pub about: Option<String>,
    pub phone: Option<String>,
    pub coords: Option<Coords>,
    pub profile_complete: Option<bool>,
}
