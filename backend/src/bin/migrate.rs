//! Offline schema migration runner.
//!
//! Brings an application database up to the latest schema version,
//! including the one-time rewrite of expenses that still carry the
//! deprecated denormalized owner username. The server runs the same
//! migrations at startup; this binary migrates a database without starting
//! the server.

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use backend::db;

/// Apply pending schema migrations to an expense tracker database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            ),
        )
        .init();

    let args = Args::parse();

    let connection =
        Connection::open(&args.db_path).expect("Could not open the application database.");

    let applied = db::migrate(&connection).expect("Could not migrate the application database.");

    if applied.is_empty() {
        tracing::info!("The database is already up to date.");
        return;
    }

    for migration in &applied {
        tracing::info!(
            "Applied migration {} ({}), rewrote {} rows",
            migration.version,
            migration.name,
            migration.rows_changed
        );
    }
}
