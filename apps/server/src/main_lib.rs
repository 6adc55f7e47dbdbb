use std::sync::Arc;

use brokerdeck_ai::{LlmProviderTrait, OpenAiCompatibleClient};
use brokerdeck_core::{
    feeds::SiteConfig,
    listings::{
        ListingService, ListingServiceTrait, SeededShuffle, ShuffleSource, ThreadRngShuffle,
    },
    posts::{FsPostStore, PostService, PostServiceTrait},
};
use brokerdeck_storage_sqlite::{db, listings::ListingRepository, DbPool};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub listing_service: Arc<dyn ListingServiceTrait + Send + Sync>,
    pub post_service: Arc<dyn PostServiceTrait + Send + Sync>,
    pub llm_provider: Arc<dyn LlmProviderTrait + Send + Sync>,
    pub site: SiteConfig,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = OpenAiCompatibleClient::new(
        &config.llm_api_base,
        config.llm_api_key.as_deref(),
        Some(config.request_timeout),
    )?;
    if !client.has_api_key() {
        tracing::warn!("BD_LLM_API_KEY is not set; /api/v1/ai requests will fail");
    }
    build_state_with_provider(config, Arc::new(client)).await
}

/// Wires every service, using `llm_provider` for the proxy endpoint.
pub async fn build_state_with_provider(
    config: &Config,
    llm_provider: Arc<dyn LlmProviderTrait + Send + Sync>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let shuffle: Arc<dyn ShuffleSource> = match config.shuffle_seed {
        Some(seed) => {
            tracing::info!("Using seeded shuffle ({})", seed);
            Arc::new(SeededShuffle::new(seed))
        }
        None => Arc::new(ThreadRngShuffle),
    };
    let listing_repository = Arc::new(ListingRepository::new(pool.clone()));
    let listing_service = Arc::new(ListingService::new(listing_repository, shuffle));

    tracing::info!("Blog content directory: {}", config.content_dir.display());
    let post_store = Arc::new(FsPostStore::new(config.content_dir.clone()));
    let post_service = Arc::new(PostService::new(post_store));

    Ok(Arc::new(AppState {
        listing_service,
        post_service,
        llm_provider,
        site: config.site(),
        pool,
    }))
}
