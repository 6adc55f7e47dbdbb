use log::{debug, error};

use crate::error::AiError;
use crate::provider::LlmProviderTrait;
use crate::types::{ProxyRequest, ProxyResponse, ValidatedRequest};

/// Validates `request` and forwards it to `provider`.
pub async fn handle_proxy_request(
    provider: &dyn LlmProviderTrait,
    request: ProxyRequest,
) -> Result<ProxyResponse, AiError> {
    let validated = request.validate()?;
    let result = match validated {
        ValidatedRequest::Chat(chat) => {
            debug!(
                "Forwarding chat request: model={}, messages={}",
                chat.model,
                chat.messages.len()
            );
            provider.chat(&chat).await.map(ProxyResponse::Chat)
        }
        ValidatedRequest::Embedding(embedding) => {
            debug!(
                "Forwarding embedding request: model={}, inputs={}",
                embedding.model,
                embedding.input.len()
            );
            provider.embed(&embedding).await.map(ProxyResponse::Embedding)
        }
    };
    if let Err(e) = &result {
        error!("LLM proxy request failed: {}", e);
    }
    result
}
