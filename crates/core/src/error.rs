use thiserror::Error;

use crate::domain::comments::CommentField;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("comment {0} vanished before it could be saved")]
    Missing(i64),
    #[error("storage error: {0}")]
    Backend(#[source] BoxError),
}

impl RepositoryError {
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

#[derive(Debug, Error)]
pub enum CommentServiceError {
    #[error("comment not found with id: {0}")]
    NotFound(i64),
    #[error("invalid comment data: {0}")]
    InvalidData(CommentField),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CommentServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Missing(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl From<CommentField> for CommentServiceError {
    fn from(field: CommentField) -> Self {
        Self::InvalidData(field)
    }
}
