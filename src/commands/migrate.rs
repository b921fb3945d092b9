//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    run(&db, args.action).await
}

/// Apply one migration action against an open database.
pub async fn run(db: &Database, action: MigrateAction) -> AppResult<()> {
    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            let pending = status.iter().filter(|(_, applied)| !applied).count();
            for (name, applied) in &status {
                println!("{}: {}", name, if *applied { "applied" } else { "pending" });
            }
            tracing::info!(total = status.len(), pending, "Migration status");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.fresh_migrations().await?;
        }
    }

    Ok(())
}
