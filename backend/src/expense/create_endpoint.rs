//! The endpoint for recording a new expense.

use axum::{extract::State, http::StatusCode, Extension, Json};
use common::{Category, Expense, NewExpenseRequest, ParseCategoryError};
use time::{macros::format_description, Date, OffsetDateTime};

use crate::{
    auth::AuthContext,
    expense::NewExpense,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for creating a new expense owned by the caller.
///
/// # Errors
///
/// Returns [Error::MissingFields] when the amount, description or category
/// is absent (or the description is empty), [Error::InvalidAmount] for zero
/// or negative amounts, and [Error::InvalidCategory]/[Error::InvalidDate]
/// when those fields do not parse. An omitted date defaults to the current
/// day.
pub async fn post_expense<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
    Json(payload): Json<NewExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let (Some(amount), Some(description), Some(category)) =
        (payload.amount, payload.description, payload.category)
    else {
        return Err(Error::MissingFields);
    };

    if description.trim().is_empty() || category.is_empty() {
        return Err(Error::MissingFields);
    }

    // Expenses record money spent; rejecting non-positive amounts also
    // covers NaN.
    if !(amount > 0.0) {
        return Err(Error::InvalidAmount);
    }

    let category: Category = category
        .parse()
        .map_err(|ParseCategoryError(name)| Error::InvalidCategory(name))?;

    let date = match payload.date {
        Some(raw_date) => parse_calendar_date(&raw_date)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let expense = state.expense_store.create(NewExpense {
        amount,
        description,
        category,
        date,
        user_id: context.user_id,
    })?;

    tracing::debug!("created expense {} for {}", expense.id, context.username);

    Ok((StatusCode::CREATED, Json(expense)))
}

fn parse_calendar_date(raw_date: &str) -> Result<Date, Error> {
    Date::parse(raw_date, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(raw_date.to_string()))
}

#[cfg(test)]
mod create_expense_tests {
    use axum::http::StatusCode;
    use common::Expense;
    use serde_json::json;
    use time::macros::date;

    use crate::test_utils::{register_test_user, test_server};

    #[tokio::test]
    async fn create_returns_the_stored_expense() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let response = server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 12.50,
                "description": "Coffee",
                "category": "Food",
                "date": "2024-01-15",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let expense = response.json::<Expense>();
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.date, date!(2024 - 01 - 15));
        assert_eq!(expense.username, "alice");
        assert_eq!(expense.user_id, auth.id);
    }

    #[tokio::test]
    async fn create_defaults_the_date_to_today() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let response = server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 5.0,
                "description": "Bus fare",
                "category": "Travel",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let expense = response.json::<Expense>();
        assert_eq!(expense.date, time::OffsetDateTime::now_utc().date());
    }

    #[tokio::test]
    async fn create_fails_when_a_field_is_missing() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let response = server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 5.0,
                "category": "Travel",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "All fields are required"
        );
    }

    #[tokio::test]
    async fn create_fails_on_a_non_positive_amount() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        for amount in [0.0, -5.0] {
            let response = server
                .post("/api/expenses")
                .authorization_bearer(&auth.token)
                .json(&json!({
                    "amount": amount,
                    "description": "Coffee",
                    "category": "Food",
                }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn create_fails_on_an_unknown_category() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let response = server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 5.0,
                "description": "Coffee",
                "category": "Groceries",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_fails_on_a_malformed_date() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let response = server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 5.0,
                "description": "Coffee",
                "category": "Food",
                "date": "15/01/2024",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_fails_without_a_token() {
        let server = test_server();

        let response = server
            .post("/api/expenses")
            .json(&json!({
                "amount": 5.0,
                "description": "Coffee",
                "category": "Food",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
