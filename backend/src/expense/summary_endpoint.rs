//! The endpoint for the caller's spending summary.

use axum::{extract::State, Extension, Json};
use common::ExpenseSummary;

use crate::{
    auth::AuthContext,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for the caller's per-category spending breakdown and
/// grand total. Categories with no records are omitted.
pub async fn get_summary<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ExpenseSummary>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let summary = state.expense_store.summarize_for_user(context.user_id)?;

    Ok(Json(summary))
}

#[cfg(test)]
mod summary_tests {
    use axum::http::StatusCode;
    use common::{Expense, ExpenseSummary};

    use crate::test_utils::{create_test_expense, register_test_user, test_server};

    #[tokio::test]
    async fn summary_matches_the_worked_example() {
        let server = test_server();
        let alice = register_test_user(&server, "alice").await;

        create_test_expense(&server, &alice.token, 12.50, "Food").await;

        let response = server
            .get("/api/expenses/summary")
            .authorization_bearer(&alice.token)
            .await;

        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["categorySummary"][0]["_id"], "Food");
        assert_eq!(body["categorySummary"][0]["total"], 12.5);
        assert_eq!(body["categorySummary"][0]["count"], 1);
        assert_eq!(body["total"], 12.5);
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn summary_total_equals_the_sum_of_listed_amounts() {
        let server = test_server();
        let alice = register_test_user(&server, "alice").await;

        for (amount, category) in [(1.5, "Food"), (2.25, "Food"), (10.0, "Bills")] {
            create_test_expense(&server, &alice.token, amount, category).await;
        }

        let listed_total: f64 = server
            .get("/api/expenses")
            .authorization_bearer(&alice.token)
            .await
            .json::<Vec<Expense>>()
            .iter()
            .map(|expense| expense.amount)
            .sum();

        let summary = server
            .get("/api/expenses/summary")
            .authorization_bearer(&alice.token)
            .await
            .json::<ExpenseSummary>();

        assert!((summary.total - listed_total).abs() < 1e-9);

        let per_category_total: f64 = summary
            .category_summary
            .iter()
            .map(|entry| entry.total)
            .sum();
        assert!((per_category_total - summary.total).abs() < 1e-9);
    }

    #[tokio::test]
    async fn summary_only_covers_the_callers_expenses() {
        let server = test_server();
        let alice = register_test_user(&server, "alice").await;
        let bob = register_test_user(&server, "bob").await;

        create_test_expense(&server, &alice.token, 100.0, "Bills").await;

        let summary = server
            .get("/api/expenses/summary")
            .authorization_bearer(&bob.token)
            .await
            .json::<ExpenseSummary>();

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, 0.0);
        assert!(summary.category_summary.is_empty());
    }

    #[tokio::test]
    async fn summary_fails_without_a_token() {
        let server = test_server();

        server
            .get("/api/expenses/summary")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
