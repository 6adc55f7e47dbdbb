//! Request and response types for the proxy endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AiError;

pub const REQUEST_TYPE_CHAT: &str = "chat";
pub const REQUEST_TYPE_EMBEDDING: &str = "embedding";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Text to embed: a single string or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            EmbeddingInput::Single(text) => vec![text],
            EmbeddingInput::Batch(texts) => texts,
        }
    }
}

/// Body of `POST /api/v1/ai` as it arrives. Every field is optional so that
/// missing ones surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub model: Option<String>,
    pub messages: Option<Vec<ChatMessage>>,
    pub input: Option<EmbeddingInput>,
    pub temperature: Option<f32>,
    #[serde(alias = "max_tokens")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
}

/// A request that passed validation, ready for a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedRequest {
    Chat(ChatRequest),
    Embedding(EmbeddingRequest),
}

impl ProxyRequest {
    pub fn validate(self) -> Result<ValidatedRequest, AiError> {
        let request_type = non_blank(self.request_type)
            .ok_or_else(|| AiError::invalid_input("Missing required field: type"))?;
        let model = non_blank(self.model)
            .ok_or_else(|| AiError::invalid_input("Missing required field: model"))?;

        match request_type.as_str() {
            REQUEST_TYPE_CHAT => {
                let messages = self.messages.filter(|m| !m.is_empty()).ok_or_else(|| {
                    AiError::invalid_input("Chat requests require a non-empty messages array")
                })?;
                if let Some(t) = self.temperature {
                    if !(0.0..=2.0).contains(&t) {
                        return Err(AiError::invalid_input(
                            "temperature must be between 0 and 2",
                        ));
                    }
                }
                Ok(ValidatedRequest::Chat(ChatRequest {
                    model,
                    messages,
                    temperature: self.temperature,
                    max_tokens: self.max_tokens,
                }))
            }
            REQUEST_TYPE_EMBEDDING => {
                let input = self
                    .input
                    .map(EmbeddingInput::into_vec)
                    .filter(|texts| !texts.is_empty())
                    .ok_or_else(|| AiError::invalid_input("Embedding requests require input"))?;
                Ok(ValidatedRequest::Embedding(EmbeddingRequest { model, input }))
            }
            other => Err(AiError::invalid_input(format!(
                "Unsupported request type: {}",
                other
            ))),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(alias = "prompt_tokens")]
    pub prompt_tokens: u32,
    #[serde(default, alias = "completion_tokens")]
    pub completion_tokens: u32,
    #[serde(alias = "total_tokens")]
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub model: String,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingResponse {
    pub model: String,
    pub embeddings: Vec<Vec<f32>>,
    pub usage: Option<Usage>,
}

/// The `data` member of a successful proxy response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    Chat(ChatResponse),
    Embedding(EmbeddingResponse),
}
