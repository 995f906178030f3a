//! The endpoint for listing the caller's expenses.

use axum::{extract::State, Extension, Json};
use common::Expense;

use crate::{
    auth::AuthContext,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for listing every expense owned by the caller, newest
/// first.
///
/// Each record's `username` is the owner's current username: it is resolved
/// from the account at read time, so renaming an account relabels its
/// historical records.
pub async fn get_expenses<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Vec<Expense>>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.list_for_user(context.user_id)?;

    Ok(Json(expenses))
}
