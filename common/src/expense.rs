//! Wire types for expense records and spending summaries.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Category, ExpenseID, UserID};

/// An expense record as reported to the client.
///
/// `username` is the owner's *current* display name, resolved by the server
/// at read time; it is not stored on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseID,
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub date: Date,
    pub user_id: UserID,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The payload for `POST /api/expenses`.
///
/// Fields are optional so the server can answer missing fields with its own
/// validation error instead of a serde rejection. `date` is a calendar date
/// string (`YYYY-MM-DD`); when omitted the server dates the expense with the
/// current day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExpenseRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// One row of the per-category spending breakdown.
///
/// The grouping key is serialized as `_id`, the wire format the client's
/// summary view was written against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "_id")]
    pub category: Category,
    pub total: f64,
    pub count: u64,
}

/// The response to `GET /api/expenses/summary`.
///
/// Categories with no records are omitted from `category_summary`; `total`
/// and `count` cover every record regardless of category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub category_summary: Vec<CategorySummary>,
    pub total: f64,
    pub count: u64,
}
