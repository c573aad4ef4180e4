use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

pub type DbPool = PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum DbPoolError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migrate error: {0}")]
    Migrate(#[from] MigrateError),
}

/// No connection is opened until the first query, so a down database does
/// not stop the process from starting.
pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<DbPool, DbPoolError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(database_url)?;
    Ok(pool)
}

/// Creates the `comments` table on a fresh database; already applied
/// versions are skipped.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbPoolError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{connect_lazy, MIGRATOR};

    #[test]
    fn embeds_comments_table_migration() {
        let versions: Vec<(i64, String)> = MIGRATOR
            .iter()
            .map(|migration| (migration.version, migration.description.to_string()))
            .collect();
        assert_eq!(versions, vec![(1, "create comments".to_string())]);
    }

    #[test]
    fn rejects_malformed_database_url() {
        assert!(connect_lazy("not a url", 1).is_err());
    }
}
