//! Sample appointment seed script
//!
//! Run with:
//! ```
//! cargo run -p clinic-seed --bin seed
//! ```

use clinic::database::Database;
use clinic_seed::config::SeedConfig;
use clinic_seed::console::TracingConsole;
use clinic_seed::db::{SeedOutcome, SeedRunner};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    let db = Database::new(pool);

    if config.run_migrations {
        db.migrate().await?;
        tracing::info!("Migrations applied");
    }

    let console = TracingConsole;

    match SeedRunner::new(&db, &console).run().await? {
        SeedOutcome::NoClinic => tracing::info!("Seed skipped"),
        SeedOutcome::Seeded { appointments, .. } => {
            tracing::info!("Seed completed!");
            tracing::info!("  Appointments: {}", appointments.len());
        }
    }

    Ok(())
}
