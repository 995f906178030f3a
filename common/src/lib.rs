//! Types shared between the expense tracker's REST backend and its web
//! client: the expense category set, the wire DTOs for accounts and
//! expenses, and password hashing.

use serde::{Deserialize, Serialize};

mod account;
mod category;
mod expense;
mod password;

pub use account::{
    AccountSummary, AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserID,
};
pub use category::{Category, ParseCategoryError};
pub use expense::{CategorySummary, Expense, ExpenseSummary, NewExpenseRequest};
pub use password::PasswordHash;

/// A newtype wrapper for integer database row IDs.
///
/// Disambiguates expense IDs from other integer IDs at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseID(i64);

impl ExpenseID {
    /// Wrap a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ExpenseID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
