//! Helpers shared by the endpoint tests.

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use common::{AuthResponse, Expense};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    db::initialize,
    stores::{SQLiteExpenseStore, SQLiteUserStore},
    AppState,
};

/// The token signing secret used by every test server.
pub const TEST_TOKEN_SECRET: &str = "42";

/// The concrete state type the tests run against.
pub type TestState = AppState<SQLiteUserStore, SQLiteExpenseStore>;

/// App state over a fresh in-memory database.
pub fn test_state() -> TestState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&connection).expect("Could not initialize database.");
    let connection = Arc::new(Mutex::new(connection));

    AppState::new(
        TEST_TOKEN_SECRET,
        SQLiteUserStore::new(connection.clone()),
        SQLiteExpenseStore::new(connection),
    )
}

/// A test server over a fresh in-memory database.
pub fn test_server() -> TestServer {
    test_server_with_state(test_state())
}

/// A test server over the given state.
pub fn test_server_with_state(state: TestState) -> TestServer {
    TestServer::new(crate::build_router(state))
}

/// Register `username` with the password `hunter2` and an
/// `{username}@example.com` email.
pub async fn register_test_user(server: &TestServer, username: &str) -> AuthResponse {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2",
        }))
        .await;

    response.assert_status_success();

    response.json::<AuthResponse>()
}

/// Create an expense through the API and return the stored record.
pub async fn create_test_expense(
    server: &TestServer,
    token: &str,
    amount: f64,
    category: &str,
) -> Expense {
    let response = server
        .post("/api/expenses")
        .authorization_bearer(token)
        .json(&json!({
            "amount": amount,
            "description": "A thingymajig",
            "category": category,
            "date": "2024-01-15",
        }))
        .await;

    response.assert_status_success();

    response.json::<Expense>()
}
