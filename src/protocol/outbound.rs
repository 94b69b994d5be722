//! Client → server commands.

use serde::Serialize;

use crate::types::{PhaseName, PhaseTimes, PlayerIndex, RoleListEntry, Verdict};

/// Duration as the server's serde encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WireDuration {
    pub secs: u64,
    pub nanos: u32,
}

impl WireDuration {
    pub fn from_secs(secs: u64) -> Self {
        Self { secs, nanos: 0 }
    }
}

/// Every phase's duration, keyed the way the server's settings struct is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTimeSettings {
    pub morning: WireDuration,
    pub discussion: WireDuration,
    pub voting: WireDuration,
    pub testimony: WireDuration,
    pub judgement: WireDuration,
    pub evening: WireDuration,
    pub night: WireDuration,
}

impl From<&PhaseTimes> for PhaseTimeSettings {
    fn from(times: &PhaseTimes) -> Self {
        let at = |phase| WireDuration::from_secs(times.get(phase));
        Self {
            morning: at(PhaseName::Morning),
            discussion: at(PhaseName::Discussion),
            voting: at(PhaseName::Voting),
            testimony: at(PhaseName::Testimony),
            judgement: at(PhaseName::Judgement),
            evening: at(PhaseName::Evening),
            night: at(PhaseName::Night),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleList {
    pub role_list: Vec<RoleListEntry>,
}

/// Unit variants go out as a bare string (`"Host"`), the rest as a
/// single-key object (`{"Vote": {"player_index": 3}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ToServerPacket {
    Host,
    Join { room_code: String },
    SetName { name: String },
    StartGame,
    SetPhaseTimes { phase_times: PhaseTimeSettings },
    SetRoleList { role_list: RoleList },

    Judgement { verdict: Verdict },
    Vote { player_index: Option<PlayerIndex> },
    Target { player_index_list: Vec<PlayerIndex> },
    DayTarget { player_index: PlayerIndex },

    SaveWill { will: String },
    SendMessage { text: String },
    SendWhisper { player_index: PlayerIndex, text: String },
}

impl ToServerPacket {
    pub fn set_phase_times(times: &PhaseTimes) -> Self {
        ToServerPacket::SetPhaseTimes { phase_times: times.into() }
    }

    pub fn set_role_list(entries: Vec<RoleListEntry>) -> Self {
        ToServerPacket::SetRoleList { role_list: RoleList { role_list: entries } }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
