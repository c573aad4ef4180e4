use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::comments::{Comment, CommentField, CommentInput, SaveComment};
use crate::error::CommentServiceError;
use crate::repository::CommentRepository;

pub type ServiceResult<T> = Result<T, CommentServiceError>;

/// Validation and persistence for comments. All input checks live here.
#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn create_comment(&self, input: CommentInput) -> ServiceResult<Comment> {
        info!(post_id = ?input.post_id, "creating comment");
        let text = input.require_text().inspect_err(log_invalid)?;
        let post_id = input.require_post_id().inspect_err(log_invalid)?;
        let saved = self
            .repo
            .save(SaveComment {
                id: None,
                name: text.name,
                email: text.email,
                comment: text.comment,
                post_id,
            })
            .await?;
        debug!(comment_id = saved.id, post_id, "comment saved");
        Ok(saved)
    }

    pub async fn get_comment_by_id(&self, id: i64) -> ServiceResult<Comment> {
        debug!(comment_id = id, "fetching comment");
        match self.repo.find_by_id(id).await? {
            Some(comment) => Ok(comment),
            None => {
                warn!(comment_id = id, "comment not found");
                Err(CommentServiceError::NotFound(id))
            }
        }
    }

    pub async fn get_comments_by_post_id(&self, post_id: i64) -> ServiceResult<Vec<Comment>> {
        let comments = self
            .repo
            .find_by_post_id_order_by_created_at_desc(post_id)
            .await?;
        debug!(post_id, count = comments.len(), "fetched comments for post");
        Ok(comments)
    }

    /// `postId` cannot move a comment to another post: it may be omitted or
    /// repeat the stored value.
    pub async fn update_comment(&self, id: i64, input: CommentInput) -> ServiceResult<Comment> {
        info!(comment_id = id, "updating comment");
        let Some(existing) = self.repo.find_by_id(id).await? else {
            warn!(comment_id = id, "cannot update, comment not found");
            return Err(CommentServiceError::NotFound(id));
        };
        let text = input.require_text().inspect_err(log_invalid)?;
        if input.post_id.is_some_and(|post_id| post_id != existing.post_id) {
            warn!(
                comment_id = id,
                stored_post_id = existing.post_id,
                requested_post_id = ?input.post_id,
                "rejecting post change on update"
            );
            return Err(CommentServiceError::InvalidData(CommentField::PostId));
        }
        let updated = self
            .repo
            .save(SaveComment {
                id: Some(existing.id),
                name: text.name,
                email: text.email,
                comment: text.comment,
                post_id: existing.post_id,
            })
            .await?;
        debug!(comment_id = updated.id, "comment updated");
        Ok(updated)
    }

    pub async fn delete_comment(&self, id: i64) -> ServiceResult<()> {
        info!(comment_id = id, "deleting comment");
        if !self.repo.exists_by_id(id).await? {
            warn!(comment_id = id, "cannot delete, comment not found");
            return Err(CommentServiceError::NotFound(id));
        }
        self.repo.delete_by_id(id).await?;
        Ok(())
    }

    pub async fn delete_comments_by_post_id(&self, post_id: i64) -> ServiceResult<u64> {
        info!(post_id, "deleting all comments for post");
        let removed = self.repo.delete_by_post_id(post_id).await?;
        debug!(post_id, removed, "deleted comments for post");
        Ok(removed)
    }
}

fn log_invalid(field: &CommentField) {
    warn!(field = %field, "invalid comment data");
}
