use serde::{Deserialize, Serialize};

use crate::types::{PlayerIndex, RoleName};

/// Permanent record of one death. Graves are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grave {
    #[serde(alias = "player")]
    pub player_index: PlayerIndex,
    pub role: GraveRole,
    pub death_cause: DeathCause,
    #[serde(default)]
    pub will: String,
    pub died_phase: GravePhase,
    pub day_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraveRole {
    Cleaned,
    Stoned,
    Role(RoleName),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Lynching,
    Killers { killers: Vec<GraveKiller> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraveKiller {
    Mafia,
    Role(RoleName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravePhase {
    Day,
    Night,
}

impl GraveRole {
    pub fn label(&self) -> &str {
        match self {
            GraveRole::Cleaned => "Cleaned",
            GraveRole::Stoned => "Stoned",
            GraveRole::Role(role) => role.as_str(),
        }
    }
}

impl DeathCause {
    /// Killer names for display; empty for a lynching.
    pub fn killer_names(&self) -> Vec<&str> {
        match self {
            DeathCause::Lynching => vec![],
            DeathCause::Killers { killers } => killers
                .iter()
                .map(|killer| match killer {
                    GraveKiller::Mafia => "Mafia",
                    GraveKiller::Role(role) => role.as_str(),
                })
                .collect(),
        }
    }
}
