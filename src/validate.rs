//! Field validation for identity signup.
//!
//! Checks run in a fixed order and short-circuit on the first failure, so a
//! request with several problems is reported one field at a time. Donation
//! creation deliberately performs no field validation.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::Coords;

const REQUIRED_FIELDS: [&str; 4] = ["email", "password", "address", "coords"];
const STRING_FIELDS: [&str; 3] = ["email", "password", "address"];
const WHITESPACE_FREE_FIELDS: [&str; 2] = ["email", "password"];

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 72;

/// A single failed check, addressed to the offending field. Serialized
/// verbatim as the 422 response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub code: u16,
    pub reason: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>, location: Option<&str>) -> Self {
        Self {
            code: 422,
            reason: "ValidationError",
            message: message.into(),
            location: location.map(str::to_string),
        }
    }
}

/// A signup request that passed every field check: everything needed to
/// create an identity except the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignup {
    pub email: String,
    pub password: String,
    pub address: String,
    pub coords: Coords,
}

/// Run the ordered signup checks against a raw JSON body.
///
/// The email uniqueness check is not here: it needs the store, and runs in
/// the handler after these pure checks pass.
pub fn validate_signup(body: &Value) -> Result<ValidSignup, ValidationFailure> {
    let empty = Map::new();
    let object = body.as_object().unwrap_or(&empty);

    if let Some(missing) = REQUIRED_FIELDS.into_iter().find(|field| !object.contains_key(*field)) {
        return Err(ValidationFailure::new("Missing field", Some(missing)));
    }

    if !object.get("coords").is_some_and(Value::is_object) {
        return Err(ValidationFailure::new("coords must be object", Some("coords")));
    }

    for field in STRING_FIELDS {
        if !object.get(field).is_some_and(Value::is_string) {
            return Err(ValidationFailure::new(
                "Incorrect typeof field: expect string",
                Some(field),
            ));
        }
    }

    for field in WHITESPACE_FREE_FIELDS {
        let value = object.get(field).and_then(Value::as_str).unwrap_or_default();
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationFailure::new("Cannot contain whitespace", Some(field)));
        }
    }

    let password = object.get("password").and_then(Value::as_str).unwrap_or_default();
    let trimmed_len = password.trim().chars().count();
    if trimmed_len < PASSWORD_MIN {
        return Err(ValidationFailure::new(
            format!("Must be at least {PASSWORD_MIN} characters long"),
            None,
        ));
    }
    if trimmed_len > PASSWORD_MAX {
        return Err(ValidationFailure::new(
            format!("Must be no more than {PASSWORD_MAX} characters"),
            None,
        ));
    }

    let coords: Coords = serde_json::from_value(object.get("coords").cloned().unwrap_or(Value::Null))
        .map_err(|_| ValidationFailure::new("coords must be object", Some("coords")))?;

    Ok(ValidSignup {
        email: object.get("email").and_then(Value::as_str).unwrap_or_default().to_string(),
        password: password.to_string(),
        address: object.get("address").and_then(Value::as_str).unwrap_or_default().to_string(),
        coords,
    })
}
