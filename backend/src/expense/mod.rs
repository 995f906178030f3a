//! The expense feature: the create/list/delete endpoints and the spending
//! summary.

use common::{Category, UserID};
use time::Date;

mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod summary_endpoint;

pub use create_endpoint::post_expense;
pub use delete_endpoint::delete_expense;
pub use list_endpoint::get_expenses;
pub use summary_endpoint::get_summary;

/// The validated data for creating a new expense record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent. Always positive.
    pub amount: f64,
    /// What the money was spent on.
    pub description: String,
    /// The category the expense falls under.
    pub category: Category,
    /// The calendar date the expense is recorded against.
    pub date: Date,
    /// The account that owns the expense.
    pub user_id: UserID,
}
