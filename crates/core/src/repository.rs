use async_trait::async_trait;

use crate::domain::comments::{Comment, SaveComment};
use crate::error::RepositoryError;

/// Storage for comments keyed by a generated integer id.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepositoryError>;

    /// Newest first; equal timestamps fall back to the higher id first.
    async fn find_by_post_id_order_by_created_at_desc(
        &self,
        post_id: i64,
    ) -> Result<Vec<Comment>, RepositoryError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Inserts when `comment.id` is `None`, assigning the id and setting both
    /// timestamps to the same instant. Otherwise rewrites `name`, `email` and
    /// `comment` and bumps `updated_at`; `post_id` and `created_at` are left
    /// alone. Returns `RepositoryError::Missing` if the row is gone.
    async fn save(&self, comment: SaveComment) -> Result<Comment, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Returns the number of removed rows.
    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepositoryError>;

    fn backend(&self) -> &'static str;
}
