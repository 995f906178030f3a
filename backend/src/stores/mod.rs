//! Defines the store traits the route handlers are written against and the
//! SQLite implementations used in production.

use common::{Expense, ExpenseID, ExpenseSummary, PasswordHash, UserID};
use email_address::EmailAddress;

use crate::{expense::NewExpense, Error, User};

mod sqlite;

pub use sqlite::{SQLiteExpenseStore, SQLiteUserStore};

/// Handles the creation and retrieval of user accounts.
pub trait UserStore {
    /// Create a new user account.
    ///
    /// # Errors
    /// Returns [Error::DuplicateUser] if the username or email is already
    /// taken.
    fn create(
        &self,
        username: &str,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user whose username *or* email matches `username_or_email`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if neither field matches.
    fn get_by_username_or_email(&self, username_or_email: &str) -> Result<User, Error>;

    /// Change a user's username and email.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no user with the given ID exists and
    /// [Error::DuplicateUser] if the new username or email collides with
    /// another account.
    fn update_profile(
        &self,
        id: UserID,
        username: &str,
        email: EmailAddress,
    ) -> Result<User, Error>;
}

/// Handles the creation and retrieval of expense records.
pub trait ExpenseStore {
    /// Create a new expense.
    fn create(&self, new_expense: NewExpense) -> Result<Expense, Error>;

    /// All expenses owned by `user_id`, newest first.
    ///
    /// Each returned record carries the owner's current username, resolved
    /// at read time.
    fn list_for_user(&self, user_id: UserID) -> Result<Vec<Expense>, Error>;

    /// Per-category totals and counts plus the grand total and count over
    /// the expenses owned by `user_id`. Categories with no records are
    /// omitted.
    fn summarize_for_user(&self, user_id: UserID) -> Result<ExpenseSummary, Error>;

    /// Delete the expense with `id` if it is owned by `owner`.
    ///
    /// # Errors
    /// Returns [Error::ExpenseNotFound] if the expense does not exist or is
    /// owned by another account; the two cases are indistinguishable.
    fn delete(&self, id: ExpenseID, owner: UserID) -> Result<(), Error>;
}
