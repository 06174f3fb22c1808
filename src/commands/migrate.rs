//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::{Config, Profile};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    guard_action(args.action, config.profile)?;

    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping the posts table and re-running all migrations...");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations completed successfully");
        }
    }

    Ok(())
}

/// `fresh` wipes every post, so it only runs against development databases.
fn guard_action(action: MigrateAction, profile: Profile) -> AppResult<()> {
    if action == MigrateAction::Fresh && profile == Profile::Prod {
        return Err(AppError::bad_request(
            "migrate fresh is disabled for the prod profile",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_refused_in_prod() {
        assert!(guard_action(MigrateAction::Fresh, Profile::Prod).is_err());
        assert!(guard_action(MigrateAction::Fresh, Profile::Dev).is_ok());
        assert!(guard_action(MigrateAction::Up, Profile::Prod).is_ok());
    }
}
