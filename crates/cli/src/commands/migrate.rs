//! Schema migration runner.
//!
//! Migrations live in the storefront crate; both binaries share one
//! database, so there is exactly one migration history.

use super::{CliError, connect};

/// Apply pending migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    println!("Migrations applied");

    Ok(())
}
