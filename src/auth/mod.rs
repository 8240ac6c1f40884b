pub mod password;
pub mod token;

pub use password::authenticate_with_password;
pub use token::{create_auth_token, decode_auth_token, AuthUser, Claims, TokenKeys};
