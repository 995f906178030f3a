//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use common::{PasswordHash, UserID};
use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{db::MapRow, stores::UserStore, Error, User};

/// Handles the creation and retrieval of user accounts.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const USER_COLUMNS: &str = "id, username, email, password, created_at";

impl UserStore for SQLiteUserStore {
    fn create(
        &self,
        username: &str,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        let created_at = OffsetDateTime::now_utc();

        connection.execute(
            "INSERT INTO user (username, email, password, created_at) VALUES (?1, ?2, ?3, ?4)",
            (
                username,
                email.to_string(),
                password_hash.to_string(),
                created_at,
            ),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            username.to_string(),
            email,
            password_hash,
            created_at,
        ))
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = :id"))?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    fn get_by_username_or_email(&self, username_or_email: &str) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&format!(
                "SELECT {USER_COLUMNS} FROM user WHERE username = :needle OR email = :needle"
            ))?
            .query_row(
                &[(":needle", &username_or_email)],
                SQLiteUserStore::map_row,
            )
            .map_err(|error| error.into())
    }

    fn update_profile(
        &self,
        id: UserID,
        username: &str,
        email: EmailAddress,
    ) -> Result<User, Error> {
        {
            let connection = self
                .connection
                .lock()
                .map_err(|_| Error::DatabaseLockError)?;

            let rows_changed = connection.execute(
                "UPDATE user SET username = ?1, email = ?2 WHERE id = ?3",
                (username, email.to_string(), id.as_i64()),
            )?;

            if rows_changed == 0 {
                return Err(Error::NotFound);
            }
        }

        self.get(id)
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let username: String = row.get(offset + 1)?;
        let raw_email: String = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;
        let created_at: OffsetDateTime = row.get(offset + 4)?;

        Ok(User::new(
            UserID::new(raw_id),
            username,
            EmailAddress::new_unchecked(raw_email),
            PasswordHash::new_unchecked(&raw_password_hash),
            created_at,
        ))
    }
}
