use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::html::{self, RECENT_POST_COUNT};
use crate::renderer::render_body;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(blog_post))
        .route("/api/posts", get(api_posts))
        .route("/api/posts/{slug}", get(api_post))
        .fallback(fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn homepage(State(state): State<Arc<AppState>>) -> Html<String> {
    // One extra post tells whether the full list has more to show.
    let mut recent = state.blog.list_recent(RECENT_POST_COUNT + 1).await;
    let has_more = recent.len() > RECENT_POST_COUNT;
    recent.truncate(RECENT_POST_COUNT);
    Html(html::home_page(&recent, has_more))
}

async fn blog_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let posts = state.blog.list_all().await;
    Html(html::blog_index_page(&posts))
}

async fn blog_post(Path(slug): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    match state.blog.get_by_slug(&slug).await {
        Some(post) => {
            let body = render_body(&post.body);
            Html(html::article_page(&post, &body)).into_response()
        }
        None => {
            debug!("No post for slug {}", slug);
            (StatusCode::NOT_FOUND, Html(html::not_found_page(&slug))).into_response()
        }
    }
}

async fn api_posts(State(state): State<Arc<AppState>>) -> Response {
    Json(state.blog.list_all().await).into_response()
}

async fn api_post(Path(slug): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    match state.blog.get_by_slug(&slug).await {
        Some(post) => Json(post).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Post with slug {slug} was not found.") })),
        )
            .into_response(),
    }
}

async fn fallback(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(html::not_found_page(uri.path())))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::content_loader::{ConfiguredProvider, StaticProvider};
    use crate::mock_posts::fallback_posts;
    use crate::repository::PostRepository;

    fn app() -> Router {
        let provider = ConfiguredProvider::Static(StaticProvider::default());
        router(Arc::new(AppState::new(PostRepository::new(provider))))
    }

    async fn get_path(path: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn homepage_shows_three_recent_posts() {
        let (status, body) = get_path("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("class=\"post-card\"").count(), 3);
        assert!(body.contains("View All Posts"));
        assert!(body.contains("Migrating Legacy Systems to Next.js"));
    }

    #[tokio::test]
    async fn homepage_with_few_posts_has_no_view_all_link() {
        let provider =
            ConfiguredProvider::Static(StaticProvider::with_sources(vec![fallback_posts]));
        let app = router(Arc::new(AppState::new(PostRepository::new(provider))));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert_eq!(body.matches("class=\"post-card\"").count(), 3);
        assert!(!body.contains("View All Posts"));
    }

    #[tokio::test]
    async fn article_page_renders_body() {
        let (status, body) = get_path("/blog/nextjs-14-app-router-deep-dive").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Why the App Router Changes Everything</h2>"));
        assert!(body.contains("<figcaption>app/dashboard/layout.tsx</figcaption>"));
    }

    #[tokio::test]
    async fn unknown_slug_is_a_404_page() {
        let (status, body) = get_path("/blog/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn api_lists_posts_newest_first() {
        let (status, body) = get_path("/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        let posts: Vec<Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(posts[0]["slug"]["current"], "migrating-legacy-systems-to-nextjs");
        let dates: Vec<&str> = posts.iter().map(|p| p["publishedAt"].as_str().unwrap()).collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn api_missing_post_is_json_404() {
        let (status, body) = get_path("/api/posts/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_404() {
        let (status, _) = get_path("/admin").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
