//! The endpoints for reading and updating the caller's profile.

use axum::{extract::State, Extension, Json};
use common::{AccountSummary, UpdateProfileRequest};

use crate::{
    account::parse_email,
    auth::AuthContext,
    stores::{ExpenseStore, UserStore},
    AppState, Error,
};

/// A route handler for fetching the caller's account, password excluded.
pub async fn get_profile<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<AccountSummary>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let user = state.user_store.get(context.user_id)?;

    Ok(Json(user.summary()))
}

/// A route handler for changing the caller's username and email.
///
/// Historical expense records pick up the new username automatically
/// because the display name is resolved from the account at read time.
///
/// # Errors
///
/// Returns [Error::MissingFields] when either field is absent or empty and
/// [Error::DuplicateUser] when the new username or email belongs to another
/// account.
pub async fn put_profile<U, E>(
    State(state): State<AppState<U, E>>,
    Extension(context): Extension<AuthContext>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<AccountSummary>, Error>
where
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let (Some(username), Some(email)) = (payload.username, payload.email) else {
        return Err(Error::MissingFields);
    };

    if username.trim().is_empty() || email.trim().is_empty() {
        return Err(Error::MissingFields);
    }

    let email = parse_email(&email)?;
    let user = state
        .user_store
        .update_profile(context.user_id, &username, email)?;

    Ok(Json(user.summary()))
}
