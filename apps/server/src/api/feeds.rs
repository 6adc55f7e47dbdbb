use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use brokerdeck_core::feeds::{json_feed, robots_txt, rss_feed, sitemap, JsonFeed};

use crate::main_lib::AppState;

async fn feed_xml(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state.post_service.get_all_posts();
    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        rss_feed(&state.site, &posts),
    )
}

async fn feed_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state.post_service.get_all_posts();
    let feed: JsonFeed = json_feed(&state.site, &posts);
    (
        [(header::CONTENT_TYPE, "application/feed+json; charset=utf-8")],
        Json(feed),
    )
}

async fn sitemap_xml(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state.post_service.get_all_posts();
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap(&state.site, &posts),
    )
}

async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.site),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feed.xml", get(feed_xml))
        .route("/feed.json", get(feed_json))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots))
}
