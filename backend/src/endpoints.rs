//! The URIs for the REST API's routes.

/// The root path, a liveness message.
pub const ROOT: &str = "/";

/// The route for registering a new account.
pub const REGISTER: &str = "/api/auth/register";

/// The route for logging in to an existing account.
pub const LOG_IN: &str = "/api/auth/login";

/// The route for fetching the caller's account.
pub const ME: &str = "/api/auth/me";

/// The route for updating the caller's username and email.
pub const PROFILE: &str = "/api/auth/profile";

/// The route for listing and creating the caller's expenses.
pub const EXPENSES: &str = "/api/expenses";

/// The route for deleting a single expense by ID.
pub const EXPENSE: &str = "/api/expenses/{id}";

/// The route for the caller's spending summary.
pub const EXPENSES_SUMMARY: &str = "/api/expenses/summary";
