use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use brokerdeck_storage_sqlite::get_connection;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn healthz() -> &'static str {
    "ok"
}

/// Ready once a pooled database connection can be checked out.
async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    get_connection(&state.pool).map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
