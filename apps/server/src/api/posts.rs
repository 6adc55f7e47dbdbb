use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use brokerdeck_core::{
    markdown::{render_blocks, render_html, Block},
    posts::{slugify, Post, PostSummary},
};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const RELATED_POSTS_LIMIT: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostDetail {
    post: Post,
    blocks: Vec<Block>,
    html: String,
    related: Vec<PostSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Term {
    name: String,
    slug: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TermPosts {
    name: String,
    slug: String,
    posts: Vec<PostSummary>,
}

fn summaries(posts: Vec<Post>) -> Vec<PostSummary> {
    posts.iter().map(Post::summary).collect()
}

fn terms(names: Vec<String>) -> Vec<Term> {
    names
        .into_iter()
        .map(|name| Term {
            slug: slugify(&name),
            name,
        })
        .collect()
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Json<Vec<PostSummary>> {
    Json(summaries(state.post_service.get_all_posts()))
}

async fn featured_posts(State(state): State<Arc<AppState>>) -> Json<Vec<PostSummary>> {
    Json(summaries(state.post_service.get_featured_posts()))
}

async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Term>> {
    Json(terms(state.post_service.get_categories()))
}

async fn list_tags(State(state): State<Arc<AppState>>) -> Json<Vec<Term>> {
    Json(terms(state.post_service.get_tags()))
}

async fn posts_by_category(
    Path(category): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TermPosts>> {
    let posts = state.post_service.get_posts_by_category(&category);
    let Some(first) = posts.first() else {
        return Err(ApiError::NotFound);
    };
    Ok(Json(TermPosts {
        name: first.category.clone(),
        slug: slugify(&first.category),
        posts: summaries(posts),
    }))
}

async fn posts_by_tag(
    Path(tag): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TermPosts>> {
    let posts = state.post_service.get_posts_by_tag(&tag);
    if posts.is_empty() {
        return Err(ApiError::NotFound);
    }
    let wanted = slugify(&tag);
    let name = posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .find(|t| slugify(t) == wanted || t.eq_ignore_ascii_case(&tag))
        .cloned()
        .unwrap_or(tag);
    Ok(Json(TermPosts {
        slug: slugify(&name),
        name,
        posts: summaries(posts),
    }))
}

async fn get_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PostDetail>> {
    let post = state
        .post_service
        .get_post_by_slug(&slug)
        .ok_or(ApiError::NotFound)?;
    let blocks = render_blocks(&post.content);
    let html = render_html(&blocks);
    let related = summaries(
        state
            .post_service
            .get_related_posts(&post.slug, RELATED_POSTS_LIMIT),
    );
    Ok(Json(PostDetail {
        post,
        blocks,
        html,
        related,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/featured", get(featured_posts))
        .route("/posts/categories", get(list_categories))
        .route("/posts/tags", get(list_tags))
        .route("/posts/category/{category}", get(posts_by_category))
        .route("/posts/tag/{tag}", get(posts_by_tag))
        .route("/posts/{slug}", get(get_post))
}
