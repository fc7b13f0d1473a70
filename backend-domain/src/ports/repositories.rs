use async_trait::async_trait;

use crate::entities::{ApiKey, DeathRow, KillRow};

/// Append-only store for kill/death events. Inserts assign the row its
/// sequence id and return it; there are no updates or deletes.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    /// Persist a kill. Returns the assigned id; kills list in id order.
    async fn insert_kill(&self, kill: KillRow) -> anyhow::Result<u64>;
    /// Persist a death. Returns the assigned id; deaths list in time order.
    async fn insert_death(&self, death: DeathRow) -> anyhow::Result<u64>;
    async fn fetch_kills(&self) -> anyhow::Result<Vec<KillRow>>;
    async fn fetch_deaths(&self) -> anyhow::Result<Vec<DeathRow>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn insert_key(&self, key: ApiKey) -> anyhow::Result<()>;
    /// Exact-match lookup; `None` means the token was never issued.
    async fn find_key(&self, token: &str) -> anyhow::Result<Option<ApiKey>>;
}
