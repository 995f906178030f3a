//! Encoding and decoding of session tokens.

use common::UserID;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// How long a session token stays valid after being issued.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(30);

/// The contents of a session token.
///
/// The payload carries only the account identifier; username and email are
/// re-resolved from the database on every request so that profile changes
/// and deleted accounts take effect immediately.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The ID of the account the token was issued to.
    pub id: UserID,
}

/// Sign a session token for `user_id` that expires after `duration`.
///
/// # Errors
///
/// Returns [Error::TokenCreation] if the token could not be signed.
pub fn encode_token(
    user_id: UserID,
    encoding_key: &EncodingKey,
    duration: Duration,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now + duration).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        id: user_id,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("could not sign a session token: {}", error);
        Error::TokenCreation
    })
}

/// Verify `token` and return its claims.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token is malformed, has a bad
/// signature, or has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| Error::InvalidToken)
}
