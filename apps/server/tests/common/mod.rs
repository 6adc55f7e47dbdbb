#![allow(dead_code)]

use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use brokerdeck_ai::{
    AiError, ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse,
    LlmProviderTrait,
};
use brokerdeck_server::{api::app_router, build_state_with_provider, config::Config};
use brokerdeck_storage_sqlite::{create_pool, get_connection};
use diesel::connection::SimpleConnection;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

pub fn test_config(dir: &Path) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.join("db").join("app.db").to_string_lossy().to_string(),
        content_dir: dir.join("content"),
        site_url: "https://brokerdeck.example".to_string(),
        site_title: "BrokerDeck".to_string(),
        site_description: "Broker comparisons".to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        llm_api_base: "http://127.0.0.1:9/v1".to_string(),
        llm_api_key: None,
        shuffle_seed: Some(7),
    }
}

/// Provider double: echoes the last chat message, fails embeddings.
pub struct EchoProvider;

#[async_trait]
impl LlmProviderTrait for EchoProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AiError> {
        let last = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(ChatResponse {
            model: request.model.clone(),
            message: ChatMessage {
                role: "assistant".to_string(),
                content: format!("echo: {}", last),
            },
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }

    async fn embed(&self, _request: &EmbeddingRequest) -> Result<EmbeddingResponse, AiError> {
        Err(AiError::provider("HTTP 429 Too Many Requests: rate limited"))
    }
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(&config.content_dir).unwrap();
    let state = build_state_with_provider(&config, Arc::new(EchoProvider))
        .await
        .unwrap();
    let router = app_router(state, &config);
    TestApp { router, dir }
}

impl TestApp {
    pub fn db_path(&self) -> String {
        self.dir
            .path()
            .join("db")
            .join("app.db")
            .to_string_lossy()
            .to_string()
    }

    pub fn content_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("content")
    }

    pub fn execute_sql(&self, sql: &str) {
        let pool = create_pool(&self.db_path()).unwrap();
        let mut conn = get_connection(&pool).unwrap();
        conn.batch_execute(sql).unwrap();
    }

    pub fn write_post(&self, slug: &str, contents: &str) {
        std::fs::write(self.content_dir().join(format!("{}.md", slug)), contents).unwrap();
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
