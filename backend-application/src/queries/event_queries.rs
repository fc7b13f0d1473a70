use backend_domain::{DeathRecord, KillRecord};

use crate::{AppError, AppState};

/// All kills, in insertion (id) order.
pub async fn list_kills(state: &AppState) -> Result<Vec<KillRecord>, AppError> {
    let rows = state.event_repo.fetch_kills().await?;
    Ok(rows.into_iter().map(KillRecord::from).collect())
}

/// All deaths, in timestamp order. The asymmetry with kills is part of
/// the published contract.
pub async fn list_deaths(state: &AppState) -> Result<Vec<DeathRecord>, AppError> {
    let rows = state.event_repo.fetch_deaths().await?;
    Ok(rows.into_iter().map(DeathRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        death_row_at, kill_row, test_state, EmptyProfiles, InMemoryEventRepo,
    };
    use backend_domain::ports::EventRepository;
    use std::sync::Arc;
    use time::macros::datetime;

    #[tokio::test]
    async fn kills_come_back_in_insertion_order() {
        let events = Arc::new(InMemoryEventRepo::default());
        let state = test_state(events.clone(), Arc::new(EmptyProfiles));

        for victim in ["A", "B", "C"] {
            events
                .insert_kill(kill_row("Han", victim))
                .await
                .expect("insert");
        }

        let kills = list_kills(&state).await.expect("list kills");
        let victims: Vec<&str> = kills.iter().map(|k| k.victim.as_str()).collect();
        assert_eq!(victims, vec!["A", "B", "C"]);
        let ids: Vec<u64> = kills.iter().map(|k| k.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn deaths_come_back_in_time_order() {
        let events = Arc::new(InMemoryEventRepo::default());
        let state = test_state(events.clone(), Arc::new(EmptyProfiles));

        let t1 = datetime!(2024-01-01 00:00:00 UTC);
        let t2 = datetime!(2024-01-02 00:00:00 UTC);
        let t3 = datetime!(2024-01-03 00:00:00 UTC);
        for (victim, time) in [("second", t2), ("first", t1), ("third", t3)] {
            events
                .insert_death(death_row_at("Han", victim, time))
                .await
                .expect("insert");
        }

        let deaths = list_deaths(&state).await.expect("list deaths");
        let victims: Vec<&str> = deaths.iter().map(|d| d.victim.as_str()).collect();
        assert_eq!(victims, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn listed_kill_preserves_inserted_fields() {
        let events = Arc::new(InMemoryEventRepo::default());
        let state = test_state(events.clone(), Arc::new(EmptyProfiles));

        events
            .insert_kill(kill_row("Han", "Greedo"))
            .await
            .expect("insert");

        let kills = list_kills(&state).await.expect("list kills");
        assert_eq!(kills.len(), 1);
        let kill = &kills[0];
        assert_eq!(kill.player, "Han");
        assert_eq!(kill.victim, "Greedo");
        assert_eq!(kill.zone, "Mos Eisley");
        assert_eq!(kill.weapon, "blaster");
        assert_eq!(kill.damage_type, "ballistic");
        assert_eq!(kill.time, datetime!(2024-01-01 00:00:00 UTC));
    }
}
