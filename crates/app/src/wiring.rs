use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::cli::Storage;
use crate::config::AppConfig;
use crate::state::AppState;
use comments_core::{CommentRepository, CommentService};
use comments_infra::{connect_lazy, DbPoolError, InMemoryCommentRepository, PgCommentRepository};

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("postgres storage requires COMMENTS_DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("db pool error: {0}")]
    DbPool(#[from] DbPoolError),
}

pub fn build_state(config: AppConfig, storage: Storage) -> Result<AppState, WiringError> {
    let database_url = config.database_url.as_deref();
    let (repo, db) = if storage.use_postgres(database_url) {
        let url = database_url.ok_or(WiringError::MissingDatabaseUrl)?;
        let pool = connect_lazy(url, config.db_max_connections)?;
        let repo: Arc<dyn CommentRepository> = Arc::new(PgCommentRepository::new(pool.clone()));
        (repo, Some(pool))
    } else {
        let repo: Arc<dyn CommentRepository> = Arc::new(InMemoryCommentRepository::new());
        (repo, None)
    };
    info!(storage = repo.backend(), "comment storage selected");
    Ok(AppState {
        config: Arc::new(config),
        comments: CommentService::new(repo),
        db,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_state, WiringError};
    use crate::cli::Storage;
    use crate::config::AppConfig;

    fn config(database_url: Option<&str>) -> AppConfig {
        AppConfig {
            http_addr: "127.0.0.1:0".parse().unwrap(),
            database_url: database_url.map(str::to_string),
            db_max_connections: 5,
            cors_allow_origins: Vec::new(),
        }
    }

    #[test]
    fn auto_without_url_uses_memory() {
        let state = build_state(config(None), Storage::Auto).unwrap();
        assert_eq!(state.comments.backend(), "memory");
        assert!(state.db.is_none());
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        let err = build_state(config(None), Storage::Postgres).err().unwrap();
        assert!(matches!(err, WiringError::MissingDatabaseUrl));
    }
}
