//! This module defines the REST API's routes and assembles the router.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    account::{get_profile, post_log_in, post_register, put_profile},
    auth::auth_guard,
    endpoints,
    expense::{delete_expense, get_expenses, get_summary, post_expense},
    stores::{ExpenseStore, UserStore},
    AppState,
};

/// Return a router with all the app's routes.
pub fn build_router<U, E>(state: AppState<U, E>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    E: ExpenseStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::REGISTER, post(post_register::<U, E>))
        .route(endpoints::LOG_IN, post(post_log_in::<U, E>));

    let protected_routes = Router::new()
        .route(endpoints::ME, get(get_profile::<U, E>))
        .route(endpoints::PROFILE, put(put_profile::<U, E>))
        .route(
            endpoints::EXPENSES,
            get(get_expenses::<U, E>).post(post_expense::<U, E>),
        )
        .route(endpoints::EXPENSES_SUMMARY, get(get_summary::<U, E>))
        .route(endpoints::EXPENSE, delete(delete_expense::<U, E>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_guard::<U, E>,
        ));

    unprotected_routes.merge(protected_routes).with_state(state)
}

async fn get_root() -> Json<Value> {
    Json(json!({
        "message": "Expense Tracker API is running!",
    }))
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use common::AuthResponse;
    use serde_json::json;

    use crate::test_utils::{register_test_user, test_server};

    #[tokio::test]
    async fn the_root_route_is_unprotected() {
        let server = test_server();

        server.get("/").await.assert_status_ok();
    }

    #[tokio::test]
    async fn a_tampered_token_is_rejected() {
        let server = test_server();
        let auth = register_test_user(&server, "alice").await;

        let mut token = auth.token.clone();
        token.pop();

        server
            .get("/api/expenses")
            .authorization_bearer(token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_token_for_a_deleted_account_is_rejected() {
        // Accounts cannot be deleted over the API; forge a token for an ID
        // that was never registered instead.
        use common::UserID;

        use crate::auth::encode_token;
        use crate::test_utils::{test_state, TEST_TOKEN_SECRET};

        let state = test_state();
        let server = crate::test_utils::test_server_with_state(state.clone());

        let keys = crate::TokenKeys::from_secret(TEST_TOKEN_SECRET);
        let token =
            encode_token(UserID::new(999), &keys.encoding, state.token_duration).unwrap();

        let response = server
            .get("/api/auth/me")
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Invalid token"
        );
    }

    #[tokio::test]
    async fn the_full_register_record_summarize_flow_works() {
        let server = test_server();

        let auth = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await
            .json::<AuthResponse>();

        server
            .post("/api/expenses")
            .authorization_bearer(&auth.token)
            .json(&json!({
                "amount": 12.50,
                "description": "Coffee",
                "category": "Food",
                "date": "2024-01-15",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let body = server
            .get("/api/expenses/summary")
            .authorization_bearer(&auth.token)
            .await
            .json::<serde_json::Value>();

        assert_eq!(body["categorySummary"][0]["_id"], "Food");
        assert_eq!(body["total"], 12.5);
        assert_eq!(body["count"], 1);
    }
}
