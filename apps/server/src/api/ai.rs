use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use brokerdeck_ai::{handle_proxy_request, AiError, ProxyRequest, ProxyResponse};
use serde::Serialize;

use crate::main_lib::AppState;

/// `{success, data}` on success, `{success: false, error}` otherwise.
#[derive(Serialize)]
struct Envelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ProxyResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

fn failure(status: StatusCode, error: String, code: &'static str) -> Response {
    let body = Envelope {
        success: false,
        data: None,
        error: Some(error),
        code: Some(code),
    };
    (status, Json(body)).into_response()
}

async fn proxy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let err = AiError::invalid_input(rejection.body_text());
            return failure(StatusCode::BAD_REQUEST, err.to_string(), err.code());
        }
    };

    match handle_proxy_request(state.llm_provider.as_ref(), request).await {
        Ok(data) => Json(Envelope {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        })
        .into_response(),
        Err(err) => {
            let status = if err.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            failure(status, err.to_string(), err.code())
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ai", post(proxy))
}
