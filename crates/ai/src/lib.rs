//! BrokerDeck AI - JSON-in/JSON-out proxy to an OpenAI-compatible provider.
//!
//! # Architecture
//!
//! - `types`: request/response DTOs and request validation
//! - `provider`: the `LlmProviderTrait` seam and its reqwest-backed client
//! - `proxy`: validates a raw request and dispatches it to a provider
//! - `error`: `AiError` and its stable codes

pub mod error;
pub mod provider;
pub mod proxy;
pub mod types;

pub use error::AiError;
pub use provider::{LlmProviderTrait, OpenAiCompatibleClient};
pub use proxy::handle_proxy_request;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, EmbeddingInput, EmbeddingRequest, EmbeddingResponse,
    ProxyRequest, ProxyResponse, Usage, ValidatedRequest,
};
