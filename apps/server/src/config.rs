use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use brokerdeck_core::feeds::SiteConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub content_dir: PathBuf,
    pub site_url: String,
    pub site_title: String,
    pub site_description: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub llm_api_base: String,
    pub llm_api_key: Option<String>,
    pub shuffle_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = parse_env("BD_LISTEN_ADDR", "0.0.0.0:8080")?;
        let db_path = env_or("BD_DB_PATH", "./db/app.db");
        let content_dir = PathBuf::from(env_or("BD_CONTENT_DIR", "./content/blog"));
        let site = SiteConfig::new(env_or("BD_SITE_URL", "http://localhost:8080"));
        let cors_allow = env_or("BD_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("BD_REQUEST_TIMEOUT_MS", "30000")?;
        let llm_api_key = std::env::var("BD_LLM_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let shuffle_seed = match std::env::var("BD_SHUFFLE_SEED") {
            Ok(raw) => Some(parse_value("BD_SHUFFLE_SEED", &raw)?),
            Err(_) => None,
        };
        Ok(Self {
            listen_addr,
            db_path,
            content_dir,
            site_title: env_or("BD_SITE_TITLE", &site.title),
            site_description: env_or("BD_SITE_DESCRIPTION", &site.description),
            site_url: site.site_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            llm_api_base: env_or("BD_LLM_API_BASE", brokerdeck_ai::provider::DEFAULT_API_BASE),
            llm_api_key,
            shuffle_seed,
        })
    }

    pub fn site(&self) -> SiteConfig {
        let mut site = SiteConfig::new(self.site_url.as_str());
        site.title = self.site_title.clone();
        site.description = self.site_description.clone();
        site
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, &env_or(key, default))
}

/// Parses a configuration value, failing with the variable name on bad input.
fn parse_value<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {}: {:?}", key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_well_formed_input() {
        let timeout: u64 = parse_value("BD_REQUEST_TIMEOUT_MS", " 1500 ").unwrap();
        assert_eq!(timeout, 1500);
        let addr: SocketAddr = parse_value("BD_LISTEN_ADDR", "127.0.0.1:9000").unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn test_malformed_values_fail_with_the_variable_name() {
        let err = parse_value::<u64>("BD_REQUEST_TIMEOUT_MS", "30s").unwrap_err();
        assert!(err.to_string().contains("BD_REQUEST_TIMEOUT_MS"));
        assert!(parse_value::<SocketAddr>("BD_LISTEN_ADDR", "localhost").is_err());
        assert!(parse_value::<u64>("BD_SHUFFLE_SEED", "-1").is_err());
    }
}
