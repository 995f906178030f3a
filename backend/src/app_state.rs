//! Implements a struct that holds the state of the REST server.

use jsonwebtoken::{DecodingKey, EncodingKey};
use time::Duration;

use crate::{
    auth::DEFAULT_TOKEN_DURATION,
    stores::{ExpenseStore, UserStore},
};

/// The signing and verification keys for session tokens, derived from a
/// shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    /// The key used to sign new session tokens.
    pub encoding: EncodingKey,
    /// The key used to verify presented session tokens.
    pub decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive the token keys from a `secret` string.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState<U, E>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    /// The keys used for signing and verifying session tokens.
    pub token_keys: TokenKeys,
    /// The duration for which session tokens are valid.
    pub token_duration: Duration,
    /// The store for managing user accounts.
    pub user_store: U,
    /// The store for managing [expenses](common::Expense).
    pub expense_store: E,
}

impl<U, E> AppState<U, E>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(token_secret: &str, user_store: U, expense_store: E) -> Self {
        Self {
            token_keys: TokenKeys::from_secret(token_secret),
            token_duration: DEFAULT_TOKEN_DURATION,
            user_store,
            expense_store,
        }
    }
}
