//! The REST API server for the expense tracker.
//!
//! Exposes JSON endpoints for registering and authenticating accounts and
//! for creating, listing, summarizing and deleting the expenses owned by
//! the authenticated account. Persistence is a SQLite database accessed
//! through the store traits in [stores].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod account;
mod app_state;
pub mod auth;
pub mod db;
pub mod endpoints;
mod error;
pub mod expense;
mod logging;
mod routing;
pub mod stores;
mod user;

pub use app_state::{AppState, TokenKeys};
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use user::User;

#[cfg(test)]
pub(crate) mod test_utils;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
