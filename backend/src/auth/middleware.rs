//! The bearer-token middleware that protects the expense and profile routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use common::UserID;
use email_address::EmailAddress;

use crate::{
    auth::decode_token,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// The authenticated caller, resolved from the bearer token.
///
/// Route handlers behind [auth_guard] receive this via
/// `Extension(context): Extension<AuthContext>`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    /// The ID of the calling account.
    pub user_id: UserID,
    /// The calling account's current username.
    pub username: String,
    /// The calling account's email address.
    pub email: EmailAddress,
}

/// Middleware function that checks for a valid bearer token.
///
/// The token's account is looked up so that tokens referring to accounts
/// that no longer exist are rejected, and so that the [AuthContext] always
/// carries the account's *current* username and email.
///
/// # Errors
///
/// Returns [Error::MissingToken] when the `Authorization` header is absent
/// and [Error::InvalidToken] when the token fails verification or its
/// account cannot be found.
pub async fn auth_guard<U, E>(
    State(state): State<AppState<U, E>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error>
where
    U: UserStore + Clone + Send + Sync + 'static,
    E: ExpenseStore + Clone + Send + Sync + 'static,
{
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(Error::MissingToken)?;

    let claims = decode_token(bearer.token(), &state.token_keys.decoding)?;

    let user = state.user_store.get(claims.id).map_err(|error| match error {
        Error::NotFound => Error::InvalidToken,
        other => other,
    })?;

    request.extensions_mut().insert(AuthContext {
        user_id: user.id(),
        username: user.username().to_string(),
        email: user.email().clone(),
    });

    Ok(next.run(request).await)
}
