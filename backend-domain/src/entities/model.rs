#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub enrichment_enabled: bool,
    pub profile_base_url: String,
    pub profile_timeout_seconds: u64,
    pub schema_retry_attempts: u32,
    pub schema_retry_backoff_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}
