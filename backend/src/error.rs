//! Defines the app level error type and its conversion to JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// The errors that may occur in the application.
///
/// Each variant's display string is the message sent to the client, except
/// for the internal variants which are logged server-side and replaced with
/// a generic message.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing or empty in the request body.
    #[error("All fields are required")]
    MissingFields,

    /// Username or password was missing from a login request.
    #[error("Username and password required")]
    MissingCredentials,

    /// The email address in the request could not be parsed.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The category in the request is not one of the known categories.
    #[error("{0} is not a valid expense category")]
    InvalidCategory(String),

    /// The date in the request is not a calendar date of the form
    /// `YYYY-MM-DD`.
    #[error("{0} is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Expense amounts record money spent, so zero and negative amounts are
    /// not allowed.
    #[error("Amount must be a positive number")]
    InvalidAmount,

    /// An account with the same username or email already exists.
    #[error("User already exists")]
    DuplicateUser,

    /// The username/password combination did not match an account.
    ///
    /// Deliberately does not reveal which of the two was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A protected route was called without a bearer token.
    #[error("No token provided")]
    MissingToken,

    /// The bearer token was malformed, expired, or refers to an account
    /// that no longer exists.
    #[error("Invalid token")]
    InvalidToken,

    /// The expense ID in the request path is not a valid identifier.
    #[error("Invalid id")]
    InvalidExpenseId(String),

    /// The expense does not exist or is owned by another account.
    ///
    /// The two cases are indistinguishable so that callers cannot probe
    /// for other accounts' records.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A session token could not be signed.
    #[error("could not create a session token")]
    TokenCreation,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed. The only
            // unique columns are user.username and user.email.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.") =>
            {
                Error::DuplicateUser
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields
            | Error::MissingCredentials
            | Error::InvalidEmail(_)
            | Error::InvalidCategory(_)
            | Error::InvalidDate(_)
            | Error::InvalidAmount
            | Error::DuplicateUser
            | Error::InvalidExpenseId(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Error::ExpenseNotFound | Error::NotFound => StatusCode::NOT_FOUND,
            Error::HashingError(_)
            | Error::TokenCreation
            | Error::DatabaseLockError
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details are not intended to be shown to the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn duplicate_user_maps_unique_constraint_violations() {
        let sql_error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(2067),
            Some("UNIQUE constraint failed: user.email".to_string()),
        );

        assert_eq!(Error::from(sql_error), Error::DuplicateUser);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn internal_errors_are_not_leaked() {
        let response = Error::TokenCreation.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_are_unauthorized() {
        for error in [
            Error::InvalidCredentials,
            Error::MissingToken,
            Error::InvalidToken,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }
}
