use std::sync::Arc;

use crate::auth::token::TokenKeys;
use crate::store::{DonationStore, UserStore};

/// Shared handles for request handlers: the two stores and the token
/// signing material. Cheap to clone; nothing in here is mutable, so
/// requests share no in-process state beyond it.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub donations: Arc<dyn DonationStore>,
    pub token_keys: TokenKeys,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        donations: Arc<dyn DonationStore>,
        token_keys: TokenKeys,
    ) -> Self {
        Self { users, donations, token_keys }
    }
}
