// In-memory port fakes shared by the command/query tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::macros::datetime;
use time::OffsetDateTime;

use backend_domain::ports::{ApiKeyRepository, EventRepository, ProfileSource};
use backend_domain::{
    ApiKey, DeathReport, DeathRow, KillReport, KillRow, ProfileMetadata, ReportMode, RuntimeConfig,
};

use crate::{AppState, Metrics};

#[derive(Default)]
pub struct InMemoryEventRepo {
    kills: Mutex<Vec<KillRow>>,
    deaths: Mutex<Vec<DeathRow>>,
    next_kill_id: AtomicU64,
    next_death_id: AtomicU64,
}

impl InMemoryEventRepo {
    pub fn kills(&self) -> Vec<KillRow> {
        self.kills.lock().expect("kills lock").clone()
    }

    pub fn deaths(&self) -> Vec<DeathRow> {
        self.deaths.lock().expect("deaths lock").clone()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn insert_kill(&self, mut kill: KillRow) -> anyhow::Result<u64> {
        let id = self.next_kill_id.fetch_add(1, Ordering::SeqCst) + 1;
        kill.id = id;
        self.kills.lock().expect("kills lock").push(kill);
        Ok(id)
    }

    async fn insert_death(&self, mut death: DeathRow) -> anyhow::Result<u64> {
        let id = self.next_death_id.fetch_add(1, Ordering::SeqCst) + 1;
        death.id = id;
        self.deaths.lock().expect("deaths lock").push(death);
        Ok(id)
    }

    async fn fetch_kills(&self) -> anyhow::Result<Vec<KillRow>> {
        let mut kills = self.kills();
        kills.sort_by_key(|kill| kill.id);
        Ok(kills)
    }

    async fn fetch_deaths(&self) -> anyhow::Result<Vec<DeathRow>> {
        let mut deaths = self.deaths();
        deaths.sort_by_key(|death| death.time);
        Ok(deaths)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryKeyRepo {
    keys: Mutex<Vec<ApiKey>>,
}

impl InMemoryKeyRepo {
    pub fn all(&self) -> Vec<ApiKey> {
        self.keys.lock().expect("keys lock").clone()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryKeyRepo {
    async fn insert_key(&self, key: ApiKey) -> anyhow::Result<()> {
        self.keys.lock().expect("keys lock").push(key);
        Ok(())
    }

    async fn find_key(&self, token: &str) -> anyhow::Result<Option<ApiKey>> {
        Ok(self
            .keys
            .lock()
            .expect("keys lock")
            .iter()
            .find(|key| key.key == token)
            .cloned())
    }
}

/// Stands in for an unreachable or markup-less upstream profile page.
pub struct EmptyProfiles;

#[async_trait]
impl ProfileSource for EmptyProfiles {
    async fn fetch_profile(&self, _handle: &str) -> ProfileMetadata {
        ProfileMetadata::default()
    }
}

#[derive(Default)]
pub struct MapProfiles {
    profiles: Mutex<HashMap<String, ProfileMetadata>>,
    fetched: Mutex<Vec<String>>,
}

impl MapProfiles {
    pub fn insert(&self, handle: &str, meta: ProfileMetadata) {
        self.profiles
            .lock()
            .expect("profiles lock")
            .insert(handle.to_string(), meta);
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched lock").clone()
    }
}

#[async_trait]
impl ProfileSource for MapProfiles {
    async fn fetch_profile(&self, handle: &str) -> ProfileMetadata {
        self.fetched
            .lock()
            .expect("fetched lock")
            .push(handle.to_string());
        self.profiles
            .lock()
            .expect("profiles lock")
            .get(handle)
            .cloned()
            .unwrap_or_default()
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        enrichment_enabled: true,
        profile_base_url: "https://robertsspaceindustries.com".to_string(),
        profile_timeout_seconds: 5,
        schema_retry_attempts: 10,
        schema_retry_backoff_seconds: 2,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 15,
    }
}

pub fn test_state(events: Arc<InMemoryEventRepo>, profiles: Arc<dyn ProfileSource>) -> AppState {
    AppState {
        config: runtime_config(),
        event_repo: events,
        key_repo: Arc::new(InMemoryKeyRepo::default()),
        profiles,
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn test_state_with_keys(keys: Arc<InMemoryKeyRepo>) -> AppState {
    AppState {
        config: runtime_config(),
        event_repo: Arc::new(InMemoryEventRepo::default()),
        key_repo: keys,
        profiles: Arc::new(EmptyProfiles),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn profile(avatar: &str, org: &str) -> ProfileMetadata {
    ProfileMetadata {
        avatar_url: Some(avatar.to_string()),
        organization_name: Some(org.to_string()),
        organization_url: Some(format!(
            "https://robertsspaceindustries.com/orgs/{}",
            org.replace(' ', "")
        )),
    }
}

pub fn kill_report(player: &str, victim: &str) -> KillReport {
    KillReport {
        player: player.to_string(),
        victim: victim.to_string(),
        time: datetime!(2024-01-01 00:00:00 UTC),
        zone: "Mos Eisley".to_string(),
        weapon: "blaster".to_string(),
        damage_type: "ballistic".to_string(),
        rsi_profile: format!("https://robertsspaceindustries.com/citizens/{}", player),
        game_mode: "SC_Default".to_string(),
        mode: ReportMode::PuKill,
        client_ver: "3.22".to_string(),
        killers_ship: "YT-1300".to_string(),
        victim_ship: None,
        avatar_url: None,
        organization_name: None,
        organization_url: None,
    }
}

pub fn death_report(killer: &str, victim: &str) -> DeathReport {
    DeathReport {
        killer: killer.to_string(),
        victim: victim.to_string(),
        time: datetime!(2024-01-01 00:00:00 UTC),
        zone: "Mos Eisley".to_string(),
        weapon: "blaster".to_string(),
        damage_type: "ballistic".to_string(),
        rsi_profile: format!("https://robertsspaceindustries.com/citizens/{}", killer),
        game_mode: "SC_Default".to_string(),
        killers_ship: "YT-1300".to_string(),
        victim_ship: None,
        avatar_url: None,
        organization_name: None,
        organization_url: None,
    }
}

pub fn kill_row(player: &str, victim: &str) -> KillRow {
    KillRow {
        id: 0,
        player: player.to_string(),
        victim: victim.to_string(),
        time: datetime!(2024-01-01 00:00:00 UTC),
        zone: "Mos Eisley".to_string(),
        weapon: "blaster".to_string(),
        damage_type: "ballistic".to_string(),
        rsi_profile: format!("https://robertsspaceindustries.com/citizens/{}", player),
        game_mode: "SC_Default".to_string(),
        mode: "pu-kill".to_string(),
        client_ver: "3.22".to_string(),
        killers_ship: "YT-1300".to_string(),
        victim_ship: None,
        avatar_url: None,
        organization_name: None,
        organization_url: None,
    }
}

pub fn death_row_at(killer: &str, victim: &str, time: OffsetDateTime) -> DeathRow {
    DeathRow {
        id: 0,
        killer: killer.to_string(),
        victim: victim.to_string(),
        time,
        zone: "Mos Eisley".to_string(),
        weapon: "blaster".to_string(),
        damage_type: "ballistic".to_string(),
        rsi_profile: format!("https://robertsspaceindustries.com/citizens/{}", killer),
        game_mode: "SC_Default".to_string(),
        killers_ship: "YT-1300".to_string(),
        victim_ship: None,
        avatar_url: None,
        organization_name: None,
        organization_url: None,
    }
}
