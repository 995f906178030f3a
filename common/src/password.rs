//! Password hashing for user accounts.
//!
//! `PasswordHash` wraps a bcrypt hash string. Passwords are only ever
//! stored in this form.

use std::fmt::Display;

use bcrypt::{hash, verify, BcryptError};
use serde::{Deserialize, Serialize};

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The bcrypt cost used for new accounts.
    pub const COST: u32 = 10;

    /// Hash `raw_password` with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. Pass [PasswordHash::COST] outside of tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying hashing library fails.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, BcryptError> {
        hash(raw_password, cost).map(Self)
    }

    /// Create a `PasswordHash` from a string that is already a bcrypt hash.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid hash,
    /// e.g. a value previously produced by [PasswordHash::new] and read back
    /// from the database.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a valid bcrypt hash.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_hash_tests {
    use super::PasswordHash;

    // The minimum bcrypt cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn verify_accepts_the_original_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).unwrap();

        assert!(hash.verify("hunter2").unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).unwrap();

        assert!(!hash.verify("hunter3").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = PasswordHash::new("hunter2", TEST_COST).unwrap();
        let second = PasswordHash::new("hunter2", TEST_COST).unwrap();

        assert_ne!(first.to_string(), second.to_string());
    }

    #[test]
    fn display_does_not_leak_the_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).unwrap();

        assert!(!hash.to_string().contains("hunter2"));
    }
}
