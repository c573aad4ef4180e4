pub mod comments_repo;
pub mod pool;

pub use comments_repo::PgCommentRepository;
pub use pool::{connect_lazy, run_migrations, DbPool, DbPoolError};
