use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::routes::{comments, health};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors_allow_origins);
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route(
            "/comments/post/{post_id}",
            get(comments::list_post_comments).delete(comments::delete_post_comments),
        )
        .with_state(state);
    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    router.layer(TraceLayer::new_for_http())
}

fn build_cors(allowed: &[String]) -> Option<CorsLayer> {
    let mut origins = Vec::new();
    let mut allow_any = false;
    for origin in allowed {
        if is_wildcard_origin(origin) {
            allow_any = true;
            break;
        }
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => origins.push(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "invalid CORS origin ignored");
            }
        }
    }

    if !should_enable_cors(allow_any, &origins) {
        return None;
    }

    let cors = CorsLayer::new().allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]);
    if allow_any {
        Some(cors.allow_origin(Any).allow_headers(Any))
    } else {
        Some(
            cors.allow_origin(AllowOrigin::list(origins))
                .allow_headers([CONTENT_TYPE]),
        )
    }
}

fn is_wildcard_origin(origin: &str) -> bool {
    origin.trim() == "*"
}

fn should_enable_cors(allow_any: bool, origins: &[HeaderValue]) -> bool {
    allow_any || !origins.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{build_cors, is_wildcard_origin, should_enable_cors};
    use axum::http::HeaderValue;

    #[test]
    fn wildcard_origin_matches_trimmed_star() {
        assert!(is_wildcard_origin(" * "));
        assert!(!is_wildcard_origin("https://blog.example"));
    }

    #[test]
    fn cors_disabled_without_origins() {
        assert!(!should_enable_cors(false, &[]));
        assert!(should_enable_cors(false, &[HeaderValue::from_static("https://blog.example")]));
        assert!(build_cors(&[]).is_none());
        assert!(build_cors(&["*".to_string()]).is_some());
    }
}
