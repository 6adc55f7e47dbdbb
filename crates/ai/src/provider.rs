//! Outbound language-model providers.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AiError;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse, Usage,
};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const PROVIDER_ID: &str = "openai-compatible";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A chat/embedding backend the proxy can forward to.
#[async_trait]
pub trait LlmProviderTrait: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AiError>;
    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse, AiError>;
}

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingListResponse {
    model: String,
    data: Vec<EmbeddingData>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

fn chat_response(body: ChatCompletionResponse) -> Result<ChatResponse, AiError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::provider("Response contained no choices"))?;
    Ok(ChatResponse {
        model: body.model,
        message: choice.message,
        finish_reason: choice.finish_reason,
        usage: body.usage,
    })
}

fn embedding_response(body: EmbeddingListResponse) -> EmbeddingResponse {
    let mut data = body.data;
    data.sort_by_key(|d| d.index);
    EmbeddingResponse {
        model: body.model,
        embeddings: data.into_iter().map(|d| d.embedding).collect(),
        usage: body.usage,
    }
}

/// Turns a non-success status and body into a provider error, preferring
/// the provider's own message.
fn status_error(status: reqwest::StatusCode, body: &str) -> AiError {
    let message = serde_json::from_str::<ProviderErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    AiError::provider(format!("HTTP {}: {}", status, message))
}

// ============================================================================
// Client
// ============================================================================

/// Client for any API speaking the OpenAI `/chat/completions` and
/// `/embeddings` dialect.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl OpenAiCompatibleClient {
    /// `api_key` may be absent; calls then fail with
    /// [`AiError::MissingApiKey`] instead of reaching the network.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, AiError> {
        let auth_header = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| {
                HeaderValue::from_str(&format!("Bearer {}", k))
                    .map_err(|e| AiError::invalid_input(format!("Invalid API key format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| AiError::internal(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.auth_header.is_some()
    }

    fn headers(&self) -> Result<HeaderMap, AiError> {
        let auth = self
            .auth_header
            .clone()
            .ok_or_else(|| AiError::MissingApiKey(PROVIDER_ID.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AiError> {
        let headers = self.headers()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("[LlmProxy] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::provider(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::provider(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("[LlmProxy] {} returned {}", path, status);
            return Err(status_error(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| AiError::provider(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LlmProviderTrait for OpenAiCompatibleClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AiError> {
        let body: ChatCompletionResponse = self.post("/chat/completions", request).await?;
        chat_response(body)
    }

    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse, AiError> {
        let body: EmbeddingListResponse = self.post("/embeddings", request).await?;
        Ok(embedding_response(body))
    }
}
