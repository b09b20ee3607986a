use anyhow::Context;
use coolbills_utils::error::CoolbillsResult;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn run(db_url: &str) -> CoolbillsResult<()> {
  // Migrations don't support async connections
  let mut conn = PgConnection::establish(db_url).context("Error connecting to database")?;

  info!("Running database migrations (this may take a while)...");
  conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| anyhow::anyhow!("Couldn't run DB migrations: {e}"))?;
  info!("Database migrations complete.");

  Ok(())
}
