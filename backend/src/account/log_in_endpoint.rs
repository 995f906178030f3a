//! The endpoint for logging in to an existing account.

use axum::{extract::State, Json};
use common::{AuthResponse, LoginRequest};

use crate::{
    account::auth_response,
    auth::encode_token,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for logging in with a username (or email) and password.
///
/// # Errors
///
/// Returns [Error::MissingCredentials] when either field is absent or empty
/// and [Error::InvalidCredentials] when no account matches or the password
/// is wrong. The two failure cases share one message so callers cannot tell
/// which part was incorrect.
pub async fn post_log_in<U, E>(
    State(state): State<AppState<U, E>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(Error::MissingCredentials);
    };

    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let user = state
        .user_store
        .get_by_username_or_email(&username)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            other => other,
        })?;

    let password_is_correct = user
        .password_hash()
        .verify(&password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id(), &state.token_keys.encoding, state.token_duration)?;

    Ok(Json(auth_response(&user, token)))
}

#[cfg(test)]
mod log_in_tests {
    use axum::http::StatusCode;
    use common::AuthResponse;
    use serde_json::json;

    use crate::test_utils::{register_test_user, test_server};

    #[tokio::test]
    async fn log_in_succeeds_with_a_username() {
        let server = test_server();
        register_test_user(&server, "alice").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "alice",
                "password": "hunter2",
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<AuthResponse>().username, "alice");
    }

    #[tokio::test]
    async fn log_in_succeeds_with_an_email() {
        let server = test_server();
        register_test_user(&server, "alice").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "alice@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn log_in_fails_with_a_wrong_password() {
        let server = test_server();
        register_test_user(&server, "alice").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "alice",
                "password": "hunter3",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Invalid credentials"
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_an_unknown_account() {
        let server = test_server();

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "nobody",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Invalid credentials"
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let server = test_server();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": "alice" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Username and password required"
        );
    }

    #[tokio::test]
    async fn a_log_in_token_is_accepted_by_protected_routes() {
        let server = test_server();
        register_test_user(&server, "alice").await;

        let token = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "alice",
                "password": "hunter2",
            }))
            .await
            .json::<AuthResponse>()
            .token;

        server
            .get("/api/auth/me")
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }
}
