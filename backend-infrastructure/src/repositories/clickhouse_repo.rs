use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use clickhouse::Client;

use backend_domain::ports::{ApiKeyRepository, EventRepository};
use backend_domain::{ApiKey, DeathRow, KillRow};

/// ClickHouse-backed store for the two append-only event tables and the
/// api_keys lookup table. Row ids are handed out from in-process counters
/// seeded with `max(id)` during schema init, since MergeTree tables have
/// no autoincrement.
pub struct ClickhouseRepo {
    client: Client,
    database: String,
    next_kill_id: AtomicU64,
    next_death_id: AtomicU64,
}

impl ClickhouseRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self {
            client,
            database,
            next_kill_id: AtomicU64::new(0),
            next_death_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl EventRepository for ClickhouseRepo {
    async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;

        let create_kills = r#"
CREATE TABLE IF NOT EXISTS kills (
    id UInt64,
    player String,
    victim String,
    time DateTime64(3),
    zone String,
    weapon String,
    damage_type String,
    rsi_profile String,
    game_mode String,
    mode String,
    client_ver String,
    killers_ship String,
    victim_ship Nullable(String),
    avatar_url Nullable(String),
    organization_name Nullable(String),
    organization_url Nullable(String)
) ENGINE = MergeTree
ORDER BY id
"#;

        self.client.query(create_kills).execute().await?;

        let create_deaths = r#"
CREATE TABLE IF NOT EXISTS deaths (
    id UInt64,
    killer String,
    victim String,
    time DateTime64(3),
    zone String,
    weapon String,
    damage_type String,
    rsi_profile String,
    game_mode String,
    killers_ship String,
    victim_ship Nullable(String),
    avatar_url Nullable(String),
    organization_name Nullable(String),
    organization_url Nullable(String)
) ENGINE = MergeTree
ORDER BY (time, id)
"#;

        self.client.query(create_deaths).execute().await?;

        let create_keys = r#"
CREATE TABLE IF NOT EXISTS api_keys (
    key String,
    discord_id String,
    created_at DateTime64(3)
) ENGINE = MergeTree
ORDER BY key
"#;

        self.client.query(create_keys).execute().await?;

        let max_kill: u64 = self
            .client
            .query("SELECT max(id) FROM kills")
            .fetch_one()
            .await?;
        self.next_kill_id.store(max_kill, Ordering::SeqCst);

        let max_death: u64 = self
            .client
            .query("SELECT max(id) FROM deaths")
            .fetch_one()
            .await?;
        self.next_death_id.store(max_death, Ordering::SeqCst);

        Ok(())
    }

    async fn insert_kill(&self, mut kill: KillRow) -> Result<u64> {
        let id = self.next_kill_id.fetch_add(1, Ordering::SeqCst) + 1;
        kill.id = id;
        let mut insert = self.client.insert("kills")?;
        insert.write(&kill).await?;
        insert.end().await?;
        Ok(id)
    }

    async fn insert_death(&self, mut death: DeathRow) -> Result<u64> {
        let id = self.next_death_id.fetch_add(1, Ordering::SeqCst) + 1;
        death.id = id;
        let mut insert = self.client.insert("deaths")?;
        insert.write(&death).await?;
        insert.end().await?;
        Ok(id)
    }

    async fn fetch_kills(&self) -> Result<Vec<KillRow>> {
        let query = "SELECT id, player, victim, time, zone, weapon, damage_type, rsi_profile, \
             game_mode, mode, client_ver, killers_ship, victim_ship, avatar_url, \
             organization_name, organization_url \
             FROM kills ORDER BY id";
        let rows = self.client.query(query).fetch_all::<KillRow>().await?;
        Ok(rows)
    }

    async fn fetch_deaths(&self) -> Result<Vec<DeathRow>> {
        let query = "SELECT id, killer, victim, time, zone, weapon, damage_type, rsi_profile, \
             game_mode, killers_ship, victim_ship, avatar_url, \
             organization_name, organization_url \
             FROM deaths ORDER BY time, id";
        let rows = self.client.query(query).fetch_all::<DeathRow>().await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyRepository for ClickhouseRepo {
    async fn insert_key(&self, key: ApiKey) -> Result<()> {
        let mut insert = self.client.insert("api_keys")?;
        insert.write(&key).await?;
        insert.end().await?;
        Ok(())
    }

    async fn find_key(&self, token: &str) -> Result<Option<ApiKey>> {
        let keys = self
            .client
            .query("SELECT key, discord_id, created_at FROM api_keys WHERE key = ? LIMIT 1")
            .bind(token)
            .fetch_all::<ApiKey>()
            .await?;
        Ok(keys.into_iter().next())
    }
}
