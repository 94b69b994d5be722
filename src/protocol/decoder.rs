//! Applies decoded server packets to the mirrored [`GameState`].

use crate::state::{ChatEvent, GameState};
use crate::ui::Screen;

use super::inbound::{RejectJoinReason, RejectStartReason, ToClientPacket};

/// Side effects of a packet beyond the state mutation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Navigate(Screen),
    Hosted { room_code: String },
    JoinRejected(RejectJoinReason),
    StartRejected(RejectStartReason),
    /// The state has been replaced with a fresh one.
    Kicked,
}

/// Mutates `state` for one packet. The packet is fully decoded before this is
/// called, so every mutation here completes or none starts.
pub fn apply(state: &mut GameState, packet: ToClientPacket) -> Outcome {
    match packet {
        ToClientPacket::AcceptJoin => Outcome::Navigate(Screen::Lobby),
        ToClientPacket::AcceptHost { room_code } => Outcome::Hosted { room_code },
        ToClientPacket::RejectJoin { reason } => Outcome::JoinRejected(reason),
        ToClientPacket::RejectStart { reason } => Outcome::StartRejected(reason),

        ToClientPacket::YourName { name } => {
            state.my_name = Some(name);
            Outcome::Applied
        }
        ToClientPacket::YourPlayerIndex { player_index } => {
            state.my_index = Some(player_index);
            Outcome::Applied
        }
        ToClientPacket::Players { names } => {
            state.upsert_player_names(names);
            Outcome::Applied
        }
        ToClientPacket::Kicked => {
            *state = GameState::default();
            Outcome::Kicked
        }
        ToClientPacket::OpenGameMenu => Outcome::Navigate(Screen::Game),

        ToClientPacket::RoleList { role_list } => {
            state.role_list = role_list.role_list;
            Outcome::Applied
        }
        ToClientPacket::PhaseTime { phase, time } => {
            state.phase_times.set(phase, time);
            Outcome::Applied
        }
        ToClientPacket::PhaseTimes { phase_times } => {
            state.phase_times = phase_times;
            Outcome::Applied
        }
        ToClientPacket::InvestigatorResults { investigator_results } => {
            state.investigator_results = investigator_results.results;
            Outcome::Applied
        }

        ToClientPacket::Phase { phase, day_number, seconds_left } => {
            state.phase = Some(phase);
            state.day_number = day_number;
            state.seconds_left = seconds_left;
            Outcome::Applied
        }
        ToClientPacket::PlayerOnTrial { player_index } => {
            state.player_on_trial = Some(player_index);
            Outcome::Applied
        }
        ToClientPacket::PlayerButtons { buttons } => {
            state.update_each_player(buttons, |player, buttons| player.buttons = buttons);
            Outcome::Applied
        }
        ToClientPacket::PlayerAlive { alive } => {
            state.update_each_player(alive, |player, alive| player.alive = alive);
            Outcome::Applied
        }
        ToClientPacket::PlayerVotes { voted_for_player } => {
            state.update_each_player(voted_for_player, |player, votes| {
                player.num_voted = Some(votes)
            });
            Outcome::Applied
        }

        ToClientPacket::YourWill { will } => {
            state.will = will;
            Outcome::Applied
        }
        ToClientPacket::YourRole { role } => {
            state.role = Some(role);
            Outcome::Applied
        }
        ToClientPacket::YourTarget { player_indices } => {
            state.targets = player_indices;
            Outcome::Applied
        }
        ToClientPacket::YourVoting { player_index } => {
            state.voted = player_index;
            Outcome::Applied
        }
        ToClientPacket::YourJudgement { verdict } => {
            state.judgement = Some(verdict);
            Outcome::Applied
        }

        ToClientPacket::AddChatMessages { chat_messages } => {
            state
                .chat_messages
                .extend(chat_messages.into_iter().map(ChatEvent::received_now));
            Outcome::Applied
        }
        ToClientPacket::AddGrave { grave } => {
            state.graves.push(grave);
            Outcome::Applied
        }
        ToClientPacket::GameOver { reason } => {
            state.game_over = Some(reason);
            Outcome::Applied
        }
    }
}
