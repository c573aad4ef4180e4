use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::state::AppState;
use comments_core::domain::comments::{Comment, CommentInput};
use comments_core::CommentServiceError;

#[derive(Debug, Error)]
pub enum CommentsApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),
    #[error(transparent)]
    Service(#[from] CommentServiceError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), CommentsApiError> {
    let Json(input) = payload?;
    let created = state.comments.create_comment(input).await?;
    info!(comment_id = created.id, post_id = created.post_id, "comment created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Comment>, CommentsApiError> {
    let Path(id) = id?;
    Ok(Json(state.comments.get_comment_by_id(id).await?))
}

pub async fn list_post_comments(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Comment>>, CommentsApiError> {
    let Path(post_id) = post_id?;
    Ok(Json(state.comments.get_comments_by_post_id(post_id).await?))
}

pub async fn update_comment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CommentInput>, JsonRejection>,
) -> Result<Json<Comment>, CommentsApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.comments.update_comment(id, input).await?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, CommentsApiError> {
    let Path(id) = id?;
    state.comments.delete_comment(id).await?;
    warn!(comment_id = id, "comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_post_comments(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, CommentsApiError> {
    let Path(post_id) = post_id?;
    let removed = state.comments.delete_comments_by_post_id(post_id).await?;
    warn!(post_id, removed, "comments deleted for post");
    Ok(StatusCode::NO_CONTENT)
}

impl CommentsApiError {
    fn status(&self) -> StatusCode {
        match self {
            CommentsApiError::InvalidBody(_) | CommentsApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            CommentsApiError::Service(CommentServiceError::InvalidData(_)) => {
                StatusCode::BAD_REQUEST
            }
            CommentsApiError::Service(CommentServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            CommentsApiError::Service(CommentServiceError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CommentsApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "comments api error");
        } else {
            warn!(error = %self, status = status.as_u16(), "comments api request rejected");
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
