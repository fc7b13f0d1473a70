// Event entities
// Kill/death reports as received on the wire, their persisted rows,
// and the records handed back to list callers.

use clickhouse::Row;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::value_objects::ReportMode;

#[derive(Debug, Clone, Deserialize)]
pub struct KillReport {
    pub player: String,
    pub victim: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub mode: ReportMode,
    pub client_ver: String,
    pub killers_ship: String,
    #[serde(default)]
    pub victim_ship: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeathReport {
    pub killer: String,
    pub victim: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub killers_ship: String,
    #[serde(default)]
    pub victim_ship: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_url: Option<String>,
}

// Field order mirrors the column order of the `kills` table.
#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct KillRow {
    pub id: u64,
    pub player: String,
    pub victim: String,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub mode: String,
    pub client_ver: String,
    pub killers_ship: String,
    pub victim_ship: Option<String>,
    pub avatar_url: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
}

// Field order mirrors the column order of the `deaths` table.
#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct DeathRow {
    pub id: u64,
    pub killer: String,
    pub victim: String,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub killers_ship: String,
    pub victim_ship: Option<String>,
    pub avatar_url: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KillRecord {
    pub id: u64,
    pub player: String,
    pub victim: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub mode: String,
    pub client_ver: String,
    pub killers_ship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim_ship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeathRecord {
    pub id: u64,
    pub killer: String,
    pub victim: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub zone: String,
    pub weapon: String,
    pub damage_type: String,
    pub rsi_profile: String,
    pub game_mode: String,
    pub killers_ship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim_ship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
}

impl From<KillRow> for KillRecord {
    fn from(row: KillRow) -> Self {
        Self {
            id: row.id,
            player: row.player,
            victim: row.victim,
            time: row.time,
            zone: row.zone,
            weapon: row.weapon,
            damage_type: row.damage_type,
            rsi_profile: row.rsi_profile,
            game_mode: row.game_mode,
            mode: row.mode,
            client_ver: row.client_ver,
            killers_ship: row.killers_ship,
            victim_ship: row.victim_ship,
            avatar_url: row.avatar_url,
            organization_name: row.organization_name,
            organization_url: row.organization_url,
        }
    }
}

impl From<DeathRow> for DeathRecord {
    fn from(row: DeathRow) -> Self {
        Self {
            id: row.id,
            killer: row.killer,
            victim: row.victim,
            time: row.time,
            zone: row.zone,
            weapon: row.weapon,
            damage_type: row.damage_type,
            rsi_profile: row.rsi_profile,
            game_mode: row.game_mode,
            killers_ship: row.killers_ship,
            victim_ship: row.victim_ship,
            avatar_url: row.avatar_url,
            organization_name: row.organization_name,
            organization_url: row.organization_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn kill_report_parses_rfc3339_time() {
        let body = r#"{
            "player": "Han",
            "victim": "Greedo",
            "time": "2024-01-01T00:00:00Z",
            "zone": "Mos Eisley",
            "weapon": "blaster",
            "damage_type": "ballistic",
            "rsi_profile": "https://example.org/citizens/Han",
            "game_mode": "SC_Default",
            "mode": "pu-kill",
            "client_ver": "3.22",
            "killers_ship": "YT-1300"
        }"#;
        let report: KillReport = serde_json::from_str(body).expect("parse kill report");
        assert_eq!(report.time, datetime!(2024-01-01 00:00:00 UTC));
        assert_eq!(report.mode, ReportMode::PuKill);
        assert!(report.victim_ship.is_none());
        assert!(report.avatar_url.is_none());
    }

    #[test]
    fn kill_report_rejects_malformed_time() {
        let body = r#"{
            "player": "Han",
            "victim": "Greedo",
            "time": "yesterday",
            "zone": "Mos Eisley",
            "weapon": "blaster",
            "damage_type": "ballistic",
            "rsi_profile": "",
            "game_mode": "SC_Default",
            "mode": "pu-kill",
            "client_ver": "3.22",
            "killers_ship": "YT-1300"
        }"#;
        assert!(serde_json::from_str::<KillReport>(body).is_err());
    }

    #[test]
    fn kill_record_round_trips_row_fields() {
        let row = KillRow {
            id: 7,
            player: "Han".to_string(),
            victim: "Greedo".to_string(),
            time: datetime!(2024-01-01 00:00:00 UTC),
            zone: "Mos Eisley".to_string(),
            weapon: "blaster".to_string(),
            damage_type: "ballistic".to_string(),
            rsi_profile: "https://example.org/citizens/Han".to_string(),
            game_mode: "SC_Default".to_string(),
            mode: "pu-kill".to_string(),
            client_ver: "3.22".to_string(),
            killers_ship: "YT-1300".to_string(),
            victim_ship: None,
            avatar_url: Some("https://example.org/a.png".to_string()),
            organization_name: None,
            organization_url: None,
        };
        let record = KillRecord::from(row.clone());
        assert_eq!(record.id, row.id);
        assert_eq!(record.player, row.player);
        assert_eq!(record.victim, row.victim);
        assert_eq!(record.time, row.time);
        assert_eq!(record.avatar_url, row.avatar_url);

        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["time"], "2024-01-01T00:00:00Z");
        assert!(json.get("organization_name").is_none());
    }
}
