use std::sync::Arc;

use backend_domain::ports::{ApiKeyRepository, EventRepository, ProfileSource};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub key_repo: Arc<dyn ApiKeyRepository>,
    pub profiles: Arc<dyn ProfileSource>,
    pub metrics: Arc<Metrics>,
}
