//! This file defines a user account of the application.

use common::{AccountSummary, PasswordHash, UserID};
use email_address::EmailAddress;
use time::OffsetDateTime;

/// A registered account.
///
/// Instances are created and retrieved through a
/// [UserStore](crate::stores::UserStore).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    username: String,
    email: EmailAddress,
    password_hash: PasswordHash,
    created_at: OffsetDateTime,
}

impl User {
    /// Create a user from its stored parts.
    pub fn new(
        id: UserID,
        username: String,
        email: EmailAddress,
        password_hash: PasswordHash,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The unique display name chosen at registration.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The email address associated with the user.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// When the account was created.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// The account as reported to the client, password excluded.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}
