use async_trait::async_trait;

use crate::entities::ProfileMetadata;

/// Best-effort profile lookup for a player handle. Implementations must
/// swallow fetch/parse failures and return empty metadata instead --
/// enrichment is never allowed to fail a write.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, handle: &str) -> ProfileMetadata;
}
