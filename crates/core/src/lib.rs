pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use error::{CommentServiceError, RepositoryError};
pub use repository::CommentRepository;
pub use service::CommentService;
