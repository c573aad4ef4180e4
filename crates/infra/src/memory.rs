use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use comments_core::domain::comments::{Comment, SaveComment};
use comments_core::{CommentRepository, RepositoryError};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Process-local comment store, used when no database is configured and in
/// tests. Contents are lost on restart.
pub struct InMemoryCommentRepository {
    inner: RwLock<Store>,
    clock: Clock,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    comments: BTreeMap<i64, Comment>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: RwLock::new(Store::default()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.comments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.inner.read().await.comments.get(&id).cloned())
    }

    async fn find_by_post_id_order_by_created_at_desc(
        &self,
        post_id: i64,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let store = self.inner.read().await;
        let mut comments: Vec<Comment> = store
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(comments)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.inner.read().await.comments.contains_key(&id))
    }

    async fn save(&self, comment: SaveComment) -> Result<Comment, RepositoryError> {
        let now = (self.clock)();
        let mut store = self.inner.write().await;
        match comment.id {
            None => {
                store.next_id += 1;
                let saved = Comment {
                    id: store.next_id,
                    name: comment.name,
                    email: comment.email,
                    comment: comment.comment,
                    post_id: comment.post_id,
                    created_at: now,
                    updated_at: now,
                };
                store.comments.insert(saved.id, saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let existing = store
                    .comments
                    .get_mut(&id)
                    .ok_or(RepositoryError::Missing(id))?;
                existing.name = comment.name;
                existing.email = comment.email;
                existing.comment = comment.comment;
                existing.updated_at = now.max(existing.created_at);
                Ok(existing.clone())
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner.write().await.comments.remove(&id);
        Ok(())
    }

    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepositoryError> {
        let mut store = self.inner.write().await;
        let before = store.comments.len();
        store.comments.retain(|_, comment| comment.post_id != post_id);
        Ok((before - store.comments.len()) as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
