use serde::{Deserialize, Serialize};

use crate::lang::Translate;
use crate::types::{PhaseName, PlayerIndex, RoleName, Verdict};

use super::game_state::{GameState, Player};
use super::grave::Grave;

/// A chat message plus the local time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    pub message: ChatMessage,
    pub received_at_ms: i64,
}

impl ChatEvent {
    pub fn received_now(message: ChatMessage) -> Self {
        Self {
            message,
            received_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSender {
    Player(PlayerIndex),
    Jailor,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatGroup {
    All,
    Mafia,
    Dead,
    Vampire,
    Coven,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NightInformation {
    RoleBlocked { immune: bool },
    SheriffResult { suspicious: bool },
    #[serde(untagged)]
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatMessage {
    Normal {
        message_sender: MessageSender,
        text: String,
        chat_group: ChatGroup,
    },
    Whisper {
        from_player_index: PlayerIndex,
        to_player_index: PlayerIndex,
        text: String,
    },
    /// What everyone except the two participants sees of a whisper.
    BroadcastWhisper {
        whisperer: PlayerIndex,
        whisperee: PlayerIndex,
    },
    RoleAssignment {
        role: RoleName,
    },
    PlayerDied {
        grave: Grave,
    },
    GameOver,
    PhaseChange {
        phase_type: PhaseName,
        day_number: u8,
    },
    TrialInformation {
        required_votes: usize,
        trials_left: u8,
    },
    Voted {
        voter: PlayerIndex,
        votee: Option<PlayerIndex>,
    },
    PlayerOnTrial {
        player_index: PlayerIndex,
    },
    JudgementVote {
        voter_player_index: PlayerIndex,
    },
    JudgementVerdict {
        voter_player_index: PlayerIndex,
        verdict: Verdict,
    },
    TrialVerdict {
        innocent: usize,
        guilty: usize,
    },
    NightInformation {
        night_information: NightInformation,
    },
    Targeted {
        targeter: PlayerIndex,
        target: Option<PlayerIndex>,
    },
    MayorRevealed {
        player_index: PlayerIndex,
    },
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl ChatMessage {
    /// Renders this message as one chat line.
    pub fn describe(&self, state: &GameState, lang: &impl Translate) -> String {
        let name = |index: PlayerIndex| -> String {
            state.player(index).unwrap_or(Player::unknown()).to_string()
        };

        match self {
            ChatMessage::Normal { message_sender, text, .. } => match message_sender {
                MessageSender::Player(index) => {
                    lang.translate("chatmessage.Normal", &[name(*index), text.clone()])
                }
                MessageSender::Jailor => {
                    lang.translate("chatmessage.Normal", &["Jailor".into(), text.clone()])
                }
                MessageSender::Medium => {
                    lang.translate("chatmessage.Normal", &["Medium".into(), text.clone()])
                }
            },
            ChatMessage::Whisper { from_player_index, to_player_index, text } => lang.translate(
                "chatmessage.Whisper",
                &[name(*from_player_index), name(*to_player_index), text.clone()],
            ),
            ChatMessage::BroadcastWhisper { whisperer, whisperee } => lang.translate(
                "chatmessage.BroadcastWhisper",
                &[name(*whisperer), name(*whisperee)],
            ),
            ChatMessage::RoleAssignment { role } => {
                let role_name = lang.translate(&format!("role.{role}.name"), &[]);
                let description = lang.translate(&format!("role.{role}.description"), &[]);
                lang.translate("chatmessage.RoleAssignment", &[role_name, description])
            }
            ChatMessage::PlayerDied { grave } => lang.translate(
                "chatmessage.PlayerDied",
                &[
                    name(grave.player_index),
                    grave.role.label().to_string(),
                    grave.death_cause.killer_names().join(", "),
                    grave.will.clone(),
                ],
            ),
            ChatMessage::GameOver => lang.translate("chatmessage.GameOver", &[]),
            ChatMessage::PhaseChange { phase_type, day_number } => {
                let phase = lang.translate(&format!("phase.{phase_type}"), &[]);
                lang.translate("chatmessage.PhaseChange", &[phase, day_number.to_string()])
            }
            ChatMessage::TrialInformation { required_votes, trials_left } => lang.translate(
                "chatmessage.TrialInformation",
                &[required_votes.to_string(), trials_left.to_string()],
            ),
            ChatMessage::Voted { voter, votee: Some(votee) } => {
                lang.translate("chatmessage.Voted", &[name(*voter), name(*votee)])
            }
            ChatMessage::Voted { voter, votee: None } => {
                lang.translate("chatmessage.Voted_null", &[name(*voter)])
            }
            ChatMessage::PlayerOnTrial { player_index } => {
                lang.translate("chatmessage.PlayerOnTrial", &[name(*player_index)])
            }
            ChatMessage::JudgementVote { voter_player_index } => {
                lang.translate("chatmessage.JudgementVote", &[name(*voter_player_index)])
            }
            ChatMessage::JudgementVerdict { voter_player_index, verdict } => {
                let verdict = lang.translate(&format!("verdict.{}", verdict.as_str()), &[]);
                lang.translate("chatmessage.JudgementVerdict", &[name(*voter_player_index), verdict])
            }
            ChatMessage::TrialVerdict { innocent, guilty } => {
                let outcome = if innocent >= guilty { Verdict::Innocent } else { Verdict::Guilty };
                let outcome = lang.translate(&format!("verdict.{}", outcome.as_str()), &[]);
                lang.translate(
                    "chatmessage.TrialVerdict",
                    &[outcome, innocent.to_string(), guilty.to_string()],
                )
            }
            ChatMessage::NightInformation { night_information } => match night_information {
                NightInformation::RoleBlocked { immune: true } => {
                    lang.translate("chatmessage.night.RoleBlocked_immune", &[])
                }
                NightInformation::RoleBlocked { immune: false } => {
                    lang.translate("chatmessage.night.RoleBlocked", &[])
                }
                NightInformation::SheriffResult { suspicious: true } => {
                    lang.translate("chatmessage.night.SheriffResult_suspicious", &[])
                }
                NightInformation::SheriffResult { suspicious: false } => {
                    lang.translate("chatmessage.night.SheriffResult_innocent", &[])
                }
                NightInformation::Other(value) => {
                    lang.translate(&format!("chatmessage.night.{}", variant_name(value)), &[])
                }
            },
            ChatMessage::Targeted { targeter, target: Some(target) } => {
                lang.translate("chatmessage.Targeted", &[name(*targeter), name(*target)])
            }
            ChatMessage::Targeted { targeter, target: None } => {
                lang.translate("chatmessage.Targeted_null", &[name(*targeter)])
            }
            ChatMessage::MayorRevealed { player_index } => {
                lang.translate("chatmessage.MayorRevealed", &[name(*player_index)])
            }
            ChatMessage::Other(value) => {
                lang.translate(&format!("chatmessage.{}", variant_name(value)), &[])
            }
        }
    }
}

/// Type name of an unmodelled message: the string itself, or the single key.
fn variant_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(name) => name.clone(),
        serde_json::Value::Object(map) if map.len() == 1 => {
            map.keys().next().cloned().unwrap_or_default()
        }
        other => other.to_string(),
    }
}
