pub mod db;
pub mod memory;

pub use db::{connect_lazy, run_migrations, DbPool, DbPoolError, PgCommentRepository};
pub use memory::InMemoryCommentRepository;
