use tracing::warn;

use backend_domain::{DeathReport, DeathRow, KillReport, KillRow, ProfileMetadata};

use crate::{AppError, AppState};

pub async fn report_kill(state: &AppState, report: KillReport) -> Result<u64, AppError> {
    require_non_empty(&report.player, "player")?;
    require_non_empty(&report.victim, "victim")?;
    require_non_empty(&report.zone, "zone")?;
    require_non_empty(&report.weapon, "weapon")?;
    require_non_empty(&report.damage_type, "damage_type")?;

    // Avatar comes from the killer's profile, the organization from the
    // victim's. Body-supplied values only fill holes the scrape left.
    let player_meta = enrich(state, &report.player).await;
    let victim_meta = enrich(state, &report.victim).await;

    let row = KillRow {
        id: 0,
        player: report.player,
        victim: report.victim,
        time: report.time,
        zone: report.zone,
        weapon: report.weapon,
        damage_type: report.damage_type,
        rsi_profile: report.rsi_profile,
        game_mode: report.game_mode,
        mode: report.mode.as_str().to_string(),
        client_ver: report.client_ver,
        killers_ship: report.killers_ship,
        victim_ship: report.victim_ship,
        avatar_url: player_meta.avatar_url.or(report.avatar_url),
        organization_name: victim_meta.organization_name.or(report.organization_name),
        organization_url: victim_meta.organization_url.or(report.organization_url),
    };

    let id = state.event_repo.insert_kill(row).await.map_err(|err| {
        state.metrics.record_report_error();
        AppError::Internal(err)
    })?;
    state.metrics.record_kill_report();
    Ok(id)
}

pub async fn report_death(state: &AppState, report: DeathReport) -> Result<u64, AppError> {
    require_non_empty(&report.killer, "killer")?;
    require_non_empty(&report.victim, "victim")?;
    require_non_empty(&report.zone, "zone")?;
    require_non_empty(&report.weapon, "weapon")?;
    require_non_empty(&report.damage_type, "damage_type")?;

    let killer_meta = enrich(state, &report.killer).await;

    let row = DeathRow {
        id: 0,
        killer: report.killer,
        victim: report.victim,
        time: report.time,
        zone: report.zone,
        weapon: report.weapon,
        damage_type: report.damage_type,
        rsi_profile: report.rsi_profile,
        game_mode: report.game_mode,
        killers_ship: report.killers_ship,
        victim_ship: report.victim_ship,
        avatar_url: killer_meta.avatar_url.or(report.avatar_url),
        organization_name: killer_meta.organization_name.or(report.organization_name),
        organization_url: killer_meta.organization_url.or(report.organization_url),
    };

    let id = state.event_repo.insert_death(row).await.map_err(|err| {
        state.metrics.record_report_error();
        AppError::Internal(err)
    })?;
    state.metrics.record_death_report();
    Ok(id)
}

async fn enrich(state: &AppState, handle: &str) -> ProfileMetadata {
    if !state.config.enrichment_enabled {
        return ProfileMetadata::default();
    }
    let meta = state.profiles.fetch_profile(handle).await;
    if meta.is_empty() {
        warn!(handle, "profile enrichment returned nothing");
        state.metrics.record_enrichment_miss();
    }
    meta
}

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        death_report, kill_report, profile, test_state, EmptyProfiles, InMemoryEventRepo,
        MapProfiles,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn unreachable_profile_source_does_not_block_the_write() {
        let events = Arc::new(InMemoryEventRepo::default());
        let state = test_state(events.clone(), Arc::new(EmptyProfiles));

        let id = report_kill(&state, kill_report("Han", "Greedo"))
            .await
            .expect("kill persisted");
        assert_eq!(id, 1);

        let kills = events.kills();
        assert_eq!(kills.len(), 1);
        assert!(kills[0].avatar_url.is_none());
        assert!(kills[0].organization_name.is_none());
        assert!(kills[0].organization_url.is_none());
    }

    #[tokio::test]
    async fn kill_takes_avatar_from_player_and_organization_from_victim() {
        let events = Arc::new(InMemoryEventRepo::default());
        let profiles = Arc::new(MapProfiles::default());
        profiles.insert("Han", profile("han.png", "Smugglers"));
        profiles.insert("Greedo", profile("greedo.png", "Bounty Guild"));
        let state = test_state(events.clone(), profiles);

        report_kill(&state, kill_report("Han", "Greedo"))
            .await
            .expect("kill persisted");

        let kills = events.kills();
        assert_eq!(kills[0].avatar_url.as_deref(), Some("han.png"));
        assert_eq!(kills[0].organization_name.as_deref(), Some("Bounty Guild"));
    }

    #[tokio::test]
    async fn death_enriches_the_killer_handle_only() {
        let events = Arc::new(InMemoryEventRepo::default());
        let profiles = Arc::new(MapProfiles::default());
        profiles.insert("Han", profile("han.png", "Smugglers"));
        let state = test_state(events.clone(), profiles.clone());

        report_death(&state, death_report("Han", "Greedo"))
            .await
            .expect("death persisted");

        assert_eq!(profiles.fetched(), vec!["Han".to_string()]);
        let deaths = events.deaths();
        assert_eq!(deaths[0].avatar_url.as_deref(), Some("han.png"));
        assert_eq!(deaths[0].organization_name.as_deref(), Some("Smugglers"));
    }

    #[tokio::test]
    async fn empty_player_is_rejected_before_any_insert() {
        let events = Arc::new(InMemoryEventRepo::default());
        let state = test_state(events.clone(), Arc::new(EmptyProfiles));

        let err = report_kill(&state, kill_report("  ", "Greedo"))
            .await
            .expect_err("rejected");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("player")),
            _ => panic!("unexpected error type"),
        }
        assert!(events.kills().is_empty());
    }

    #[tokio::test]
    async fn body_metadata_survives_when_enrichment_is_disabled() {
        let events = Arc::new(InMemoryEventRepo::default());
        let mut state = test_state(events.clone(), Arc::new(EmptyProfiles));
        state.config.enrichment_enabled = false;

        let mut report = death_report("Han", "Greedo");
        report.avatar_url = Some("client.png".to_string());
        report_death(&state, report).await.expect("death persisted");

        assert_eq!(events.deaths()[0].avatar_url.as_deref(), Some("client.png"));
    }
}
