// Report mode value object

use serde::{Deserialize, Serialize};

/// The game-mode tag a kill report carries. Only the two values the
/// clients actually send are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    #[serde(rename = "pu-kill")]
    PuKill,
    #[serde(rename = "ac-kill")]
    AcKill,
}

impl ReportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::PuKill => "pu-kill",
            ReportMode::AcKill => "ac-kill",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_tags() {
        assert_eq!(
            serde_json::to_string(&ReportMode::PuKill).expect("serialize"),
            "\"pu-kill\""
        );
        assert_eq!(
            serde_json::to_string(&ReportMode::AcKill).expect("serialize"),
            "\"ac-kill\""
        );
    }

    #[test]
    fn rejects_unknown_tags() {
        assert!(serde_json::from_str::<ReportMode>("\"ship-kill\"").is_err());
    }
}
