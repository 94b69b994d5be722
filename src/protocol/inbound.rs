//! Server → client messages.
//!
//! A message is either a bare type name (`"Kicked"`) or an object with exactly
//! one key, the type name, mapping to that type's payload
//! (`{"Phase": {"phase": "Night", ...}}`).

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::state::{ChatMessage, GameOverReason, Grave, PlayerButtons};
use crate::types::{PhaseName, PhaseTimes, PlayerIndex, RoleListEntry, RoleName, Verdict};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message is neither a type name nor a tagged object")]
    NotAMessage,
    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// The message type, when it could be determined before decoding failed.
    pub fn kind(&self) -> Option<&str> {
        match self {
            DecodeError::Payload { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum RejectJoinReason {
    #[serde(alias = "INVALID_ROOM_CODE")]
    InvalidRoomCode,
    #[serde(alias = "GAME_ALREADY_STARTED")]
    GameAlreadyStarted,
    #[serde(alias = "ROOM_FULL")]
    RoomFull,
    #[serde(untagged)]
    Other(String),
}

impl RejectJoinReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectJoinReason::InvalidRoomCode => "No lobby has that room code!",
            RejectJoinReason::GameAlreadyStarted => "That game has already begun!",
            RejectJoinReason::RoomFull => "That lobby is full!",
            RejectJoinReason::Other(_) => "Couldn't join lobby for an unknown reason!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum RejectStartReason {
    GameEndsInstantly,
    ZeroTimeGame,
    #[serde(untagged)]
    Other(String),
}

impl RejectStartReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectStartReason::GameEndsInstantly => {
                "Game would end instantly! Make sure your role list is valid."
            }
            RejectStartReason::ZeroTimeGame => "Make sure your phase time settings are valid!",
            RejectStartReason::Other(_) => "Failed to start lobby. Try again later!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleListPayload {
    pub role_list: Vec<RoleListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvestigatorResultsPayload {
    pub results: Vec<Vec<RoleName>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ToClientPacket {
    AcceptJoin,
    AcceptHost {
        #[serde(deserialize_with = "room_code_text")]
        room_code: String,
    },
    RejectJoin { reason: RejectJoinReason },
    RejectStart { reason: RejectStartReason },

    YourName { name: String },
    YourPlayerIndex { player_index: PlayerIndex },
    Players { names: Vec<String> },
    Kicked,
    OpenGameMenu,

    RoleList { role_list: RoleListPayload },
    PhaseTime { phase: PhaseName, time: u64 },
    PhaseTimes { phase_times: PhaseTimes },
    InvestigatorResults { investigator_results: InvestigatorResultsPayload },

    Phase { phase: PhaseName, day_number: u8, seconds_left: u64 },
    PlayerOnTrial { player_index: PlayerIndex },
    PlayerButtons { buttons: Vec<PlayerButtons> },
    PlayerAlive { alive: Vec<bool> },
    PlayerVotes { voted_for_player: Vec<u8> },

    YourWill { will: String },
    YourRole { role: RoleName },
    YourTarget { player_indices: Vec<PlayerIndex> },
    YourVoting { player_index: Option<PlayerIndex> },
    YourJudgement { verdict: Verdict },

    AddChatMessages { chat_messages: Vec<ChatMessage> },
    AddGrave { grave: Grave },
    GameOver { reason: GameOverReason },
}

impl ToClientPacket {
    pub const KINDS: &'static [&'static str] = &[
        "AcceptJoin",
        "AcceptHost",
        "RejectJoin",
        "RejectStart",
        "YourName",
        "YourPlayerIndex",
        "Players",
        "Kicked",
        "OpenGameMenu",
        "RoleList",
        "PhaseTime",
        "PhaseTimes",
        "InvestigatorResults",
        "Phase",
        "PlayerOnTrial",
        "PlayerButtons",
        "PlayerAlive",
        "PlayerVotes",
        "YourWill",
        "YourRole",
        "YourTarget",
        "YourVoting",
        "YourJudgement",
        "AddChatMessages",
        "AddGrave",
        "GameOver",
    ];

    pub fn is_known(kind: &str) -> bool {
        Self::KINDS.contains(&kind)
    }
}

/// Room codes arrive as text or as a bare number depending on server version.
fn room_code_text<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    })
}

/// Type tag given to an object whose type can't be read because it doesn't
/// have exactly one key.
pub const UNRECOGNIZED_KIND: &str = "Unrecognized";

/// Result of decoding one wire message.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Packet { kind: String, packet: ToClientPacket },
    /// A message of a type this client does not know, or an object with zero
    /// or several keys (kind [`UNRECOGNIZED_KIND`], payload the whole object).
    Unrecognized { kind: String, payload: Option<Value> },
}

impl Inbound {
    pub fn kind(&self) -> &str {
        match self {
            Inbound::Packet { kind, .. } | Inbound::Unrecognized { kind, .. } => kind,
        }
    }
}

/// Parses one text frame into a typed packet.
pub fn decode(text: &str) -> Result<Inbound, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Inbound, DecodeError> {
    let (kind, payload) = match &value {
        Value::String(kind) => (kind.clone(), None),
        Value::Object(map) if map.len() == 1 => {
            let Some((kind, payload)) = map.iter().next() else {
                return Err(DecodeError::NotAMessage);
            };
            (kind.clone(), Some(payload.clone()))
        }
        Value::Object(map) => {
            // several keys could each be read as the type; trust none of them
            tracing::warn!("tagged message has {} keys, expected exactly one", map.len());
            return Ok(Inbound::Unrecognized {
                kind: UNRECOGNIZED_KIND.to_string(),
                payload: Some(value.clone()),
            });
        }
        _ => return Err(DecodeError::NotAMessage),
    };

    if !ToClientPacket::is_known(&kind) {
        return Ok(Inbound::Unrecognized { kind, payload });
    }

    match serde_json::from_value::<ToClientPacket>(value) {
        Ok(packet) => Ok(Inbound::Packet { kind, packet }),
        Err(source) => Err(DecodeError::Payload { kind, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn packet(text: &str) -> ToClientPacket {
        match decode(text).expect("should decode") {
            Inbound::Packet { packet, .. } => packet,
            other => panic!("expected packet, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_string_message() {
        assert_eq!(packet(r#""Kicked""#), ToClientPacket::Kicked);
        assert_eq!(packet(r#""OpenGameMenu""#), ToClientPacket::OpenGameMenu);
    }

    #[test]
    fn test_accept_host_payload() {
        assert_eq!(
            packet(r#"{"AcceptHost":{"room_code":"AB12"}}"#),
            ToClientPacket::AcceptHost { room_code: "AB12".into() }
        );
    }

    #[test]
    fn test_numeric_room_code() {
        assert_eq!(
            packet(r#"{"AcceptHost":{"room_code":1234}}"#),
            ToClientPacket::AcceptHost { room_code: "1234".into() }
        );
    }

    #[test]
    fn test_phase_payload() {
        assert_eq!(
            packet(r#"{"Phase":{"phase":"Night","day_number":2,"seconds_left":37}}"#),
            ToClientPacket::Phase { phase: PhaseName::Night, day_number: 2, seconds_left: 37 }
        );
    }

    #[test]
    fn test_reject_join_reasons() {
        assert_eq!(
            packet(r#"{"RejectJoin":{"reason":"RoomFull"}}"#),
            ToClientPacket::RejectJoin { reason: RejectJoinReason::RoomFull }
        );
        assert_eq!(
            packet(r#"{"RejectJoin":{"reason":"ROOM_FULL"}}"#),
            ToClientPacket::RejectJoin { reason: RejectJoinReason::RoomFull }
        );
        assert_eq!(
            packet(r#"{"RejectJoin":{"reason":"ServerBusy"}}"#),
            ToClientPacket::RejectJoin { reason: RejectJoinReason::Other("ServerBusy".into()) }
        );
    }

    #[test]
    fn test_your_role_with_state_object() {
        assert_eq!(
            packet(r#"{"YourRole":{"role":{"Jailor":{"executions_remaining":3}}}}"#),
            ToClientPacket::YourRole { role: RoleName::new("Jailor") }
        );
    }

    #[test]
    fn test_your_voting_null() {
        assert_eq!(
            packet(r#"{"YourVoting":{"player_index":null}}"#),
            ToClientPacket::YourVoting { player_index: None }
        );
    }

    #[test]
    fn test_nested_role_list_and_investigator_results() {
        let role_list = packet(r#"{"RoleList":{"role_list":{"role_list":["Any",{"Faction":"Town"}]}}}"#);
        assert!(matches!(role_list, ToClientPacket::RoleList { role_list } if role_list.role_list.len() == 2));

        let results = packet(
            r#"{"InvestigatorResults":{"investigator_results":{"results":[["Doctor","Sheriff"],["Mafioso"]]}}}"#,
        );
        let ToClientPacket::InvestigatorResults { investigator_results } = results else {
            panic!("expected investigator results");
        };
        assert_eq!(investigator_results.results[0][1], RoleName::new("Sheriff"));
    }

    #[test]
    fn test_unknown_type_is_unrecognized_not_error() {
        let inbound = decode(r#"{"YouAreJailed":{"by":3}}"#).unwrap();
        assert_eq!(
            inbound,
            Inbound::Unrecognized { kind: "YouAreJailed".into(), payload: Some(json!({"by": 3})) }
        );
        let bare = decode(r#""YouAreSilenced""#).unwrap();
        assert_eq!(bare.kind(), "YouAreSilenced");
    }

    #[test]
    fn test_multi_key_object_is_unrecognized() {
        let inbound = decode(r#"{"Phase":{},"Players":{}}"#).unwrap();
        assert_eq!(
            inbound,
            Inbound::Unrecognized {
                kind: UNRECOGNIZED_KIND.into(),
                payload: Some(json!({"Phase": {}, "Players": {}})),
            }
        );
        assert_eq!(decode("{}").unwrap().kind(), UNRECOGNIZED_KIND);
    }

    #[test]
    fn test_non_message_json_is_rejected() {
        assert!(matches!(decode("[1,2]").unwrap_err(), DecodeError::NotAMessage));
        assert!(matches!(decode("42").unwrap_err(), DecodeError::NotAMessage));
        assert!(matches!(decode("not json").unwrap_err(), DecodeError::Json(_)));
    }

    #[test]
    fn test_malformed_known_payload_reports_kind() {
        let err = decode(r#"{"Players":{"names":"Alice"}}"#).unwrap_err();
        assert_eq!(err.kind(), Some("Players"));

        let err = decode(r#"{"PhaseTime":{"phase":"Dusk","time":5}}"#).unwrap_err();
        assert_eq!(err.kind(), Some("PhaseTime"));
    }

    #[test]
    fn test_every_known_kind_is_a_variant_name() {
        // a kind missing from the enum would deserialize as "unknown variant"
        for kind in ToClientPacket::KINDS {
            let mut probe = serde_json::Map::new();
            probe.insert(kind.to_string(), json!({"__probe": 0}));
            if let Err(e) = serde_json::from_value::<ToClientPacket>(Value::Object(probe)) {
                assert!(!e.to_string().contains("unknown variant"), "{kind}: {e}");
            }
        }
    }
}
