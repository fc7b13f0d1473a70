use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub enrichment_enabled: bool,
    pub profile_base_url: String,
    pub profile_timeout_seconds: u64,
    pub schema_retry_attempts: u32,
    pub schema_retry_backoff_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3210".to_string(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "killfeed".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            enrichment_enabled: true,
            profile_base_url: "https://robertsspaceindustries.com".to_string(),
            profile_timeout_seconds: 5,
            schema_retry_attempts: 10,
            schema_retry_backoff_seconds: 2,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("KILLFEED_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(user) = &self.clickhouse_user {
            if user.trim().is_empty() {
                self.clickhouse_user = None;
            }
        }
        if let Some(password) = &self.clickhouse_password {
            if password.trim().is_empty() {
                self.clickhouse_password = None;
            }
        }
        while self.profile_base_url.ends_with('/') {
            self.profile_base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if !self.profile_base_url.starts_with("http") {
            return Err(anyhow!("profile_base_url must be an http(s) origin"));
        }
        if self.profile_timeout_seconds == 0 {
            return Err(anyhow!("profile_timeout_seconds must be greater than 0"));
        }
        if self.schema_retry_attempts == 0 {
            return Err(anyhow!("schema_retry_attempts must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            enrichment_enabled: self.enrichment_enabled,
            profile_base_url: self.profile_base_url.clone(),
            profile_timeout_seconds: self.profile_timeout_seconds,
            schema_retry_attempts: self.schema_retry_attempts,
            schema_retry_backoff_seconds: self.schema_retry_backoff_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("KILLFEED_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("KILLFEED_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("KILLFEED_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("KILLFEED_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("KILLFEED_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("KILLFEED_ENRICHMENT_ENABLED") {
            self.enrichment_enabled = value.parse().unwrap_or(self.enrichment_enabled);
        }
        if let Ok(value) = env::var("KILLFEED_PROFILE_BASE_URL") {
            self.profile_base_url = value;
        }
        if let Ok(value) = env::var("KILLFEED_PROFILE_TIMEOUT_SECONDS") {
            self.profile_timeout_seconds = value.parse().unwrap_or(self.profile_timeout_seconds);
        }
        if let Ok(value) = env::var("KILLFEED_SCHEMA_RETRY_ATTEMPTS") {
            self.schema_retry_attempts = value.parse().unwrap_or(self.schema_retry_attempts);
        }
        if let Ok(value) = env::var("KILLFEED_SCHEMA_RETRY_BACKOFF_SECONDS") {
            self.schema_retry_backoff_seconds =
                value.parse().unwrap_or(self.schema_retry_backoff_seconds);
        }
        if let Ok(value) = env::var("KILLFEED_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("KILLFEED_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}
