//! Versioned schema migrations for the application's SQLite database, plus
//! the row-mapping helper trait shared by the store implementations.
//!
//! The schema version lives in `PRAGMA user_version`. Migrations run at
//! process start (and from the `migrate` binary); they never run on the
//! request-serving path.

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::Error;

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type each row is converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// mapped columns in the order they appear in the query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from column `offset`.
    ///
    /// The `offset` is useful when tables have been joined and two types are
    /// constructed from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// A migration that was applied by [migrate].
#[derive(Debug, PartialEq)]
pub struct AppliedMigration {
    /// The schema version this migration brought the database to.
    pub version: i64,
    /// A short human-readable description of the migration.
    pub name: &'static str,
    /// How many existing rows the migration rewrote.
    pub rows_changed: usize,
}

struct Migration {
    name: &'static str,
    apply: fn(&Connection) -> Result<usize, Error>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create the user and expense tables",
        apply: create_initial_schema,
    },
    Migration {
        name: "replace the denormalized expense owner with the owner's ID",
        apply: replace_owner_with_user_id,
    },
];

/// The schema version the database at `connection` is currently at.
///
/// # Errors
/// Returns an error if the pragma cannot be read.
pub fn schema_version(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Apply every migration the database at `connection` has not seen yet.
///
/// Each migration runs in an exclusive transaction; the schema version is
/// bumped in the same transaction, so a failed migration leaves the
/// database untouched.
///
/// # Errors
/// Returns an error if a migration's SQL fails.
pub fn migrate(connection: &Connection) -> Result<Vec<AppliedMigration>, Error> {
    migrate_to(connection, MIGRATIONS.len())
}

/// Bring the database up to date, discarding the migration report.
///
/// # Errors
/// Returns an error if the database cannot be migrated.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    migrate(connection).map(|_| ())
}

fn migrate_to(connection: &Connection, target: usize) -> Result<Vec<AppliedMigration>, Error> {
    let current = schema_version(connection)?.max(0) as usize;
    let mut applied = Vec::new();

    for (index, migration) in MIGRATIONS.iter().enumerate().take(target).skip(current) {
        let version = index as i64 + 1;

        let transaction =
            SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;
        let rows_changed = (migration.apply)(&transaction)?;
        transaction.pragma_update(None, "user_version", version)?;
        transaction.commit()?;

        applied.push(AppliedMigration {
            version,
            name: migration.name,
            rows_changed,
        });
    }

    Ok(applied)
}

fn create_initial_schema(connection: &Connection) -> Result<usize, Error> {
    connection.execute(
        "CREATE TABLE user (
                id INTEGER PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // The initial schema stored the owner's username on each expense for
    // display. Superseded by the user_id column in the next migration.
    connection.execute(
        "CREATE TABLE expense (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                owner TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(0)
}

fn replace_owner_with_user_id(connection: &Connection) -> Result<usize, Error> {
    connection.execute(
        "ALTER TABLE expense ADD COLUMN user_id INTEGER REFERENCES user(id)",
        (),
    )?;

    let rows_changed = backfill_legacy_owners(connection)?;

    connection.execute("ALTER TABLE expense DROP COLUMN owner", ())?;

    Ok(rows_changed)
}

/// Rewrite expenses that still carry the deprecated `owner` username column
/// but lack the `user_id` owner reference, resolving the username against
/// the user table.
///
/// Idempotent: rows are only touched while both the deprecated column and
/// an unset `user_id` are present, so a second run reports zero updates.
///
/// # Errors
/// Returns an error if the update fails.
pub fn backfill_legacy_owners(connection: &Connection) -> Result<usize, Error> {
    if !has_column(connection, "expense", "owner")?
        || !has_column(connection, "expense", "user_id")?
    {
        return Ok(0);
    }

    let rows_changed = connection.execute(
        "UPDATE expense
            SET user_id = (SELECT id FROM user WHERE user.username = expense.owner)
            WHERE user_id IS NULL
                AND owner IN (SELECT username FROM user)",
        (),
    )?;

    Ok(rows_changed)
}

fn has_column(connection: &Connection, table: &str, column: &str) -> Result<bool, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        (table, column),
        |row| row.get(0),
    )?;

    Ok(count > 0)
}
