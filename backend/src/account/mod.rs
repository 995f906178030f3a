//! The account feature: registration, login, and the profile endpoints.

mod log_in_endpoint;
mod profile_endpoint;
mod register_endpoint;

pub use log_in_endpoint::post_log_in;
pub use profile_endpoint::{get_profile, put_profile};
pub use register_endpoint::post_register;

use common::AuthResponse;
use email_address::EmailAddress;

use crate::{Error, User};

/// Parse an email address from a request, mapping failures to a validation
/// error carrying the offending input.
fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    raw.parse()
        .map_err(|_| Error::InvalidEmail(raw.to_string()))
}

/// The registration/login response for `user` with a freshly issued token.
fn auth_response(user: &User, token: String) -> AuthResponse {
    AuthResponse {
        id: user.id(),
        username: user.username().to_string(),
        email: user.email().clone(),
        token,
    }
}
