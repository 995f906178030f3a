//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex};

use common::{Category, CategorySummary, Expense, ExpenseID, ExpenseSummary, UserID};
use rusqlite::{Connection, Row};
use time::{Date, OffsetDateTime};

use crate::{db::MapRow, expense::NewExpense, stores::ExpenseStore, Error};

/// Handles the creation and retrieval of expense records.
///
/// The owner's username is not stored on the expense row; every read joins
/// the user table so listed records always carry the owner's current
/// username.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const EXPENSE_COLUMNS: &str = "expense.id, expense.amount, expense.description, \
     expense.category, expense.date, expense.user_id, user.username, expense.created_at";

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&self, new_expense: NewExpense) -> Result<Expense, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "INSERT INTO expense (amount, description, category, date, user_id, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                new_expense.amount,
                &new_expense.description,
                new_expense.category.to_string(),
                new_expense.date,
                new_expense.user_id.as_i64(),
                OffsetDateTime::now_utc(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        let result = connection
            .prepare(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expense
                    INNER JOIN user ON user.id = expense.user_id
                    WHERE expense.id = :id"
            ))?
            .query_row(&[(":id", &id)], SQLiteExpenseStore::map_row)
            .map_err(|error| error.into());
        result
    }

    fn list_for_user(&self, user_id: UserID) -> Result<Vec<Expense>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expense
                    INNER JOIN user ON user.id = expense.user_id
                    WHERE expense.user_id = :user_id
                    ORDER BY expense.created_at DESC, expense.id DESC"
            ))?
            .query_map(&[(":user_id", &user_id.as_i64())], SQLiteExpenseStore::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }

    fn summarize_for_user(&self, user_id: UserID) -> Result<ExpenseSummary, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let category_summary = connection
            .prepare(
                "SELECT category, SUM(amount), COUNT(*) FROM expense
                    WHERE user_id = :user_id
                    GROUP BY category
                    ORDER BY SUM(amount) DESC",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], |row| {
                let raw_category: String = row.get(0)?;

                Ok(CategorySummary {
                    category: raw_category.parse().unwrap_or(Category::Other),
                    total: row.get(1)?,
                    count: row.get::<_, i64>(2)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let (total, count) = connection.query_row(
            "SELECT COALESCE(SUM(amount), 0), COUNT(*) FROM expense WHERE user_id = :user_id",
            &[(":user_id", &user_id.as_i64())],
            |row| Ok((row.get(0)?, row.get::<_, i64>(1)?)),
        )?;

        Ok(ExpenseSummary {
            category_summary,
            total,
            count: count as u64,
        })
    }

    fn delete(&self, id: ExpenseID, owner: UserID) -> Result<(), Error> {
        let rows_changed = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .execute(
                "DELETE FROM expense WHERE id = ?1 AND user_id = ?2",
                (id.as_i64(), owner.as_i64()),
            )?;

        // Nonexistence and ownership mismatch both end up here, so callers
        // cannot tell another account's records from missing ones.
        if rows_changed == 0 {
            return Err(Error::ExpenseNotFound);
        }

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_category: String = row.get(offset + 3)?;
        let date: Date = row.get(offset + 4)?;
        let created_at: OffsetDateTime = row.get(offset + 7)?;

        Ok(Expense {
            id: ExpenseID::new(row.get(offset)?),
            amount: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            category: raw_category.parse().unwrap_or(Category::Other),
            date,
            user_id: UserID::new(row.get(offset + 5)?),
            username: row.get(offset + 6)?,
            created_at,
        })
    }
}
