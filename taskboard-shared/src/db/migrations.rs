/// Database migration runners
///
/// Migrations live at the workspace root, one directory per store:
///
/// - `migrations/users/` — the users table and its unique constraints
/// - `migrations/tasks/` — the tasks table
///
/// Each store gets its own runner so the two tables can live in separate
/// databases. Each migration is a `{timestamp}_{name}.sql` file applied
/// through sqlx's migrator.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::migrations::{migrate_tasks_store, migrate_users_store};
/// use taskboard_shared::db::pool::{create_pool, StoreConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(StoreConfig::default()).await?;
/// migrate_users_store(&pool).await?;
/// migrate_tasks_store(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations for the users store
pub async fn migrate_users_store(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running users store migrations");

    match sqlx::migrate!("../migrations/users").run(pool).await {
        Ok(()) => {
            info!("Users store migrations completed");
            Ok(())
        }
        Err(e) => {
            warn!("Users store migration failed: {}", e);
            Err(e)
        }
    }
}

/// Applies all pending migrations for the tasks store
pub async fn migrate_tasks_store(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running tasks store migrations");

    match sqlx::migrate!("../migrations/tasks").run(pool).await {
        Ok(()) => {
            info!("Tasks store migrations completed");
            Ok(())
        }
        Err(e) => {
            warn!("Tasks store migration failed: {}", e);
            Err(e)
        }
    }
}
