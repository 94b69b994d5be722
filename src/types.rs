use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type PlayerIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(alias = "morning")]
    Morning,
    #[serde(alias = "discussion")]
    Discussion,
    #[serde(alias = "voting")]
    Voting,
    #[serde(alias = "testimony")]
    Testimony,
    #[serde(alias = "judgement")]
    Judgement,
    #[serde(alias = "evening")]
    Evening,
    #[serde(alias = "night")]
    Night,
}

impl PhaseName {
    pub const ALL: [PhaseName; 7] = [
        PhaseName::Morning,
        PhaseName::Discussion,
        PhaseName::Voting,
        PhaseName::Testimony,
        PhaseName::Judgement,
        PhaseName::Evening,
        PhaseName::Night,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseName::Morning => "Morning",
            PhaseName::Discussion => "Discussion",
            PhaseName::Voting => "Voting",
            PhaseName::Testimony => "Testimony",
            PhaseName::Judgement => "Judgement",
            PhaseName::Evening => "Evening",
            PhaseName::Night => "Night",
        }
    }

    /// Case-insensitive lookup, used by the terminal front-end.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(text.trim()))
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seconds per phase. Backed by an array so every phase always has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimes([u64; 7]);

impl PhaseTimes {
    pub fn get(&self, phase: PhaseName) -> u64 {
        self.0[phase.position()]
    }

    pub fn set(&mut self, phase: PhaseName, secs: u64) {
        self.0[phase.position()] = secs;
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhaseName, u64)> + '_ {
        PhaseName::ALL.into_iter().map(|phase| (phase, self.get(phase)))
    }
}

impl Default for PhaseTimes {
    fn default() -> Self {
        Self([5, 45, 30, 20, 20, 10, 37])
    }
}

impl Serialize for PhaseTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(PhaseName::ALL.len()))?;
        for (phase, secs) in self.iter() {
            map.serialize_entry(&phase, &secs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PhaseTimes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = HashMap::<PhaseName, u64>::deserialize(deserializer)?;
        let mut times = PhaseTimes([0; 7]);
        for phase in PhaseName::ALL {
            let secs = entries
                .get(&phase)
                .ok_or_else(|| serde::de::Error::custom(format!("missing phase time for {phase}")))?;
            times.set(phase, *secs);
        }
        Ok(times)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Guilty,
    Abstain,
    Innocent,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Guilty => "Guilty",
            Verdict::Abstain => "Abstain",
            Verdict::Innocent => "Innocent",
        }
    }
}

impl TryFrom<i8> for Verdict {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Verdict::Guilty),
            0 => Ok(Verdict::Abstain),
            1 => Ok(Verdict::Innocent),
            other => Err(other),
        }
    }
}

impl TryFrom<i32> for Verdict {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        i8::try_from(value)
            .ok()
            .and_then(|v| Verdict::try_from(v).ok())
            .ok_or(value)
    }
}

/// Server-defined role identifier.
///
/// The server sends roles either as a bare name (`"Doctor"`) or as a role with
/// attached state (`{"Doctor": {...}}`); both decode to the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RoleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoleName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            WithState(HashMap<String, serde_json::Value>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => Ok(RoleName(name)),
            Repr::WithState(map) if map.len() == 1 => {
                let name = map.into_keys().next().unwrap_or_default();
                Ok(RoleName(name))
            }
            Repr::WithState(map) => Err(serde::de::Error::custom(format!(
                "role object must have exactly one key, got {}",
                map.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Mafia,
    Town,
    Neutral,
    Coven,
}

impl Faction {
    pub fn alignments(self) -> &'static [FactionAlignment] {
        use FactionAlignment::*;
        match self {
            Faction::Mafia => &[MafiaKilling, MafiaDeception, MafiaSupport],
            Faction::Town => &[TownInvestigative, TownProtective, TownKilling, TownSupport],
            Faction::Neutral => &[NeutralEvil, NeutralKilling, NeutralChaos, NeutralBenign],
            Faction::Coven => &[CovenEvil],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionAlignment {
    MafiaKilling,
    MafiaDeception,
    MafiaSupport,

    TownInvestigative,
    TownProtective,
    TownKilling,
    TownSupport,

    NeutralEvil,
    NeutralKilling,
    NeutralBenign,
    NeutralChaos,

    CovenEvil,
}

impl FactionAlignment {
    pub fn faction(self) -> Faction {
        use FactionAlignment::*;
        match self {
            MafiaKilling | MafiaDeception | MafiaSupport => Faction::Mafia,
            TownInvestigative | TownProtective | TownKilling | TownSupport => Faction::Town,
            NeutralEvil | NeutralKilling | NeutralBenign | NeutralChaos => Faction::Neutral,
            CovenEvil => Faction::Coven,
        }
    }
}

/// One lobby role slot, index-aligned with seat assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleListEntry {
    Any,
    Exact(RoleName),
    Faction(Faction),
    FactionAlignment(FactionAlignment),
}
