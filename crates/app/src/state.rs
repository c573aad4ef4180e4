use std::sync::Arc;

use crate::config::AppConfig;
use comments_core::CommentService;
use comments_infra::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub comments: CommentService,
    pub db: Option<DbPool>,
}
