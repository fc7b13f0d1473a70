use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clickhouse::Client;

use backend_application::{AppState, Metrics};
use backend_domain::EventRepository;
use backend_infrastructure::{retry, AppConfig, ClickhouseRepo, RetryPolicy, RsiProfileService};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let mut clickhouse = Client::default()
            .with_url(&db_config.clickhouse_url)
            .with_database(&db_config.clickhouse_database);
        if let Some(user) = &db_config.clickhouse_user {
            clickhouse = clickhouse.with_user(user);
        }
        if let Some(password) = &db_config.clickhouse_password {
            clickhouse = clickhouse.with_password(password);
        }

        let repo = Arc::new(ClickhouseRepo::new(
            clickhouse,
            db_config.clickhouse_database.clone(),
        ));

        // The store may come up after this process in a multi-container
        // deployment; keep knocking until the schema is in place or the
        // budget runs out. Exhaustion is fatal, never a degraded start.
        let policy = RetryPolicy::new(
            runtime_config.schema_retry_attempts,
            Duration::from_secs(runtime_config.schema_retry_backoff_seconds),
        );
        retry(policy, "schema init", || {
            let repo = repo.clone();
            async move { repo.ensure_schema().await }
        })
        .await
        .context("database never became ready")?;

        let profiles = Arc::new(RsiProfileService::new(&runtime_config)?);

        let state = AppState {
            config: runtime_config,
            event_repo: repo.clone(),
            key_repo: repo,
            profiles,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
