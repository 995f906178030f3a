//! The endpoint for deleting one of the caller's expenses.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use common::ExpenseID;
use serde_json::{json, Value};

use crate::{
    auth::AuthContext,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for deleting the expense with the given ID, provided it
/// is owned by the caller.
///
/// # Errors
///
/// Returns [Error::InvalidExpenseId] when the path segment is not a valid
/// identifier, and [Error::ExpenseNotFound] when the expense does not exist
/// or belongs to another account — deliberately the same error, so callers
/// cannot probe for other accounts' records.
pub async fn delete_expense<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let id: i64 = raw_id
        .parse()
        .map_err(|_| Error::InvalidExpenseId(raw_id.clone()))?;

    state
        .expense_store
        .delete(ExpenseID::new(id), context.user_id)?;

    Ok(Json(json!({
        "message": "Expense deleted successfully",
    })))
}
