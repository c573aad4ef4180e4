use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use thiserror::Error;

use comments_core::domain::comments::{Comment, SaveComment};
use comments_core::{CommentRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum CommentsRepoError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepositoryError> {
        find_comment(&self.pool, id)
            .await
            .map_err(RepositoryError::backend)
    }

    async fn find_by_post_id_order_by_created_at_desc(
        &self,
        post_id: i64,
    ) -> Result<Vec<Comment>, RepositoryError> {
        list_comments_for_post(&self.pool, post_id)
            .await
            .map_err(RepositoryError::backend)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        comment_exists(&self.pool, id)
            .await
            .map_err(RepositoryError::backend)
    }

    async fn save(&self, comment: SaveComment) -> Result<Comment, RepositoryError> {
        match comment.id {
            None => insert_comment(&self.pool, &comment)
                .await
                .map_err(RepositoryError::backend),
            Some(id) => update_comment(&self.pool, id, &comment)
                .await
                .map_err(RepositoryError::backend)?
                .ok_or(RepositoryError::Missing(id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        delete_comment(&self.pool, id)
            .await
            .map_err(RepositoryError::backend)
    }

    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepositoryError> {
        delete_comments_for_post(&self.pool, post_id)
            .await
            .map_err(RepositoryError::backend)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

async fn find_comment(pool: &PgPool, id: i64) -> Result<Option<Comment>, CommentsRepoError> {
    let row = sqlx::query(
        r#"
        SELECT id, name, email, comment, post_id, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|row| map_comment(&row)).transpose()?)
}

async fn list_comments_for_post(
    pool: &PgPool,
    post_id: i64,
) -> Result<Vec<Comment>, CommentsRepoError> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, email, comment, post_id, created_at, updated_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;
    let mut comments = Vec::with_capacity(rows.len());
    for row in rows {
        comments.push(map_comment(&row)?);
    }
    Ok(comments)
}

async fn comment_exists(pool: &PgPool, id: i64) -> Result<bool, CommentsRepoError> {
    let row = sqlx::query(
        r#"
        SELECT 1
        FROM comments
        WHERE id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

// now() is fixed for the statement, so both timestamps come out equal.
async fn insert_comment(pool: &PgPool, comment: &SaveComment) -> Result<Comment, CommentsRepoError> {
    let row = sqlx::query(
        r#"
        INSERT INTO comments (name, email, comment, post_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, now(), now())
        RETURNING id, name, email, comment, post_id, created_at, updated_at
        "#,
    )
    .bind(&comment.name)
    .bind(&comment.email)
    .bind(&comment.comment)
    .bind(comment.post_id)
    .fetch_one(pool)
    .await?;
    Ok(map_comment(&row)?)
}

async fn update_comment(
    pool: &PgPool,
    id: i64,
    comment: &SaveComment,
) -> Result<Option<Comment>, CommentsRepoError> {
    let row = sqlx::query(
        r#"
        UPDATE comments
        SET name = $2,
            email = $3,
            comment = $4,
            updated_at = GREATEST(now(), created_at)
        WHERE id = $1
        RETURNING id, name, email, comment, post_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&comment.name)
    .bind(&comment.email)
    .bind(&comment.comment)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|row| map_comment(&row)).transpose()?)
}

async fn delete_comment(pool: &PgPool, id: i64) -> Result<(), CommentsRepoError> {
    sqlx::query(
        r#"
        DELETE FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

async fn delete_comments_for_post(pool: &PgPool, post_id: i64) -> Result<u64, CommentsRepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

fn map_comment(row: &PgRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        comment: row.try_get("comment")?,
        post_id: row.try_get("post_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
