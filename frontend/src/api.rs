//! A thin typed client for the REST API.
//!
//! Every call decodes failures out of the server's `{"error": message}`
//! bodies so the UI can show the server's own message.

use common::{
    AccountSummary, AuthResponse, Expense, ExpenseID, ExpenseSummary, LoginRequest,
    NewExpenseRequest, RegisterRequest, UpdateProfileRequest,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;

/// Where the REST API is served during development.
pub const API_URL: &str = "http://localhost:3000/api";

/// A failed API call.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    /// The server answered with an error message.
    Server(String),
    /// The request never completed (server unreachable, CORS, …).
    Network(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Server(message) => f.write_str(message),
            ApiError::Network(message) => f.write_str(message),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

async fn read_error(response: Response) -> ApiError {
    match response.json::<ErrorBody>().await {
        Ok(body) => ApiError::Server(body.error),
        Err(_) => ApiError::Server(format!("Request failed with status {}", response.status())),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(read_error(response).await);
    }

    response.json::<T>().await.map_err(ApiError::from)
}

/// Register a new account.
pub async fn register(payload: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    let response = Request::post(&format!("{API_URL}/auth/register"))
        .json(payload)?
        .send()
        .await?;

    decode(response).await
}

/// Log in to an existing account.
pub async fn login(payload: &LoginRequest) -> Result<AuthResponse, ApiError> {
    let response = Request::post(&format!("{API_URL}/auth/login"))
        .json(payload)?
        .send()
        .await?;

    decode(response).await
}

/// Fetch the caller's account.
pub async fn fetch_profile(token: &str) -> Result<AccountSummary, ApiError> {
    let response = bearer(Request::get(&format!("{API_URL}/auth/me")), token)
        .send()
        .await?;

    decode(response).await
}

/// Change the caller's username and email.
pub async fn update_profile(
    token: &str,
    payload: &UpdateProfileRequest,
) -> Result<AccountSummary, ApiError> {
    let response = bearer(Request::put(&format!("{API_URL}/auth/profile")), token)
        .json(payload)?
        .send()
        .await?;

    decode(response).await
}

/// Fetch the caller's expenses, newest first.
pub async fn fetch_expenses(token: &str) -> Result<Vec<Expense>, ApiError> {
    let response = bearer(Request::get(&format!("{API_URL}/expenses")), token)
        .send()
        .await?;

    decode(response).await
}

/// Record a new expense.
pub async fn create_expense(
    token: &str,
    payload: &NewExpenseRequest,
) -> Result<Expense, ApiError> {
    let response = bearer(Request::post(&format!("{API_URL}/expenses")), token)
        .json(payload)?
        .send()
        .await?;

    decode(response).await
}

/// Delete one of the caller's expenses.
pub async fn delete_expense(token: &str, id: ExpenseID) -> Result<(), ApiError> {
    let response = bearer(
        Request::delete(&format!("{API_URL}/expenses/{id}")),
        token,
    )
    .send()
    .await?;

    if !response.ok() {
        return Err(read_error(response).await);
    }

    Ok(())
}

/// Fetch the caller's spending summary.
pub async fn fetch_summary(token: &str) -> Result<ExpenseSummary, ApiError> {
    let response = bearer(Request::get(&format!("{API_URL}/expenses/summary")), token)
        .send()
        .await?;

    decode(response).await
}
