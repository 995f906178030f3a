//! The endpoint for registering a new account.

use axum::{extract::State, http::StatusCode, Json};
use common::{AuthResponse, PasswordHash, RegisterRequest};

use crate::{
    account::{auth_response, parse_email},
    auth::encode_token,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for registering a new account.
///
/// The password is stored only as a salted bcrypt hash. On success the new
/// account is returned together with a session token, so registration also
/// logs the caller in.
///
/// # Errors
///
/// Returns [Error::MissingFields] when any field is absent or empty and
/// [Error::DuplicateUser] when the username or email is already taken.
pub async fn post_register<U, E>(
    State(state): State<AppState<U, E>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(Error::MissingFields);
    };

    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(Error::MissingFields);
    }

    let email = parse_email(&email)?;
    let password_hash = PasswordHash::new(&password, PasswordHash::COST)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    let user = state.user_store.create(&username, email, password_hash)?;
    let token = encode_token(user.id(), &state.token_keys.encoding, state.token_duration)?;

    tracing::info!("registered account {}", user.username());

    Ok((StatusCode::CREATED, Json(auth_response(&user, token))))
}

#[cfg(test)]
mod register_tests {
    use axum::http::StatusCode;
    use common::AuthResponse;
    use serde_json::json;

    use crate::test_utils::test_server;

    #[tokio::test]
    async fn register_returns_the_account_and_a_token() {
        let server = test_server();

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body = response.json::<AuthResponse>();
        assert_eq!(body.username, "alice");
        assert_eq!(body.email.as_str(), "alice@example.com");
        assert!(!body.token.is_empty());
    }

    #[tokio::test]
    async fn register_fails_when_a_field_is_missing() {
        let server = test_server();

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "All fields are required"
        );
    }

    #[tokio::test]
    async fn register_fails_when_a_field_is_empty() {
        let server = test_server();

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_on_a_duplicate_username() {
        let server = test_server();

        server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "User already exists"
        );
    }

    #[tokio::test]
    async fn register_fails_on_a_duplicate_email() {
        let server = test_server();

        server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alicia",
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_on_a_malformed_email() {
        let server = test_server();

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
