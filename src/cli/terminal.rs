use crate::connection::Connection;
use crate::error::ClientError;
use crate::lang::Translate;
use crate::manager::{GameManager, StateEvent};
use crate::state::GameState;
use crate::ui::{Presenter, Screen};

use super::parser::Command;

/// Presenter that writes screen changes and alerts to stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show(&mut self, screen: Screen) {
        let banner = match screen {
            Screen::Start => "start: `host` or `join <code>`",
            Screen::Lobby => "lobby: `name`, `phase`, `roles`, `start`",
            Screen::Game => "game started",
            Screen::Disconnected => "disconnected: `connect` to try again",
        };
        println!("== {banner} ==");
    }

    fn alert(&mut self, title: &str, body: &str) {
        println!("[{title}] {body}");
    }
}

/// Translator used when no language file is configured.
pub fn plain_translate(key: &str, args: &[String]) -> String {
    if args.is_empty() {
        key.to_string()
    } else {
        format!("{key}: {}", args.join(" | "))
    }
}

/// Listener that prints what changed: new chat lines, phase changes and the
/// player list. Countdown ticks are printed for the last few seconds only.
pub fn printing_listener<T: Translate + 'static>(
    lang: T,
) -> impl FnMut(StateEvent<'_>, &GameState) + 'static {
    let mut printed_chat = 0usize;
    move |event: StateEvent<'_>, state: &GameState| {
        // the state was replaced since the last call
        if state.chat_messages.len() < printed_chat {
            printed_chat = 0;
        }
        for chat in &state.chat_messages[printed_chat..] {
            println!("{}", chat.message.describe(state, &lang));
        }
        printed_chat = state.chat_messages.len();

        match event {
            StateEvent::Packet("Phase") => {
                if let Some(phase) = state.phase {
                    let phase = lang.translate(&format!("phase.{phase}"), &[]);
                    println!("-- day {} {phase} ({}s) --", state.day_number, state.seconds_left);
                }
            }
            StateEvent::Packet("Players") => print_players(state),
            StateEvent::Packet("YourRole") => {
                if let Some(role) = &state.role {
                    println!("your role: {}", lang.translate(&format!("role.{role}.name"), &[]));
                }
            }
            StateEvent::Packet("GameOver") => println!("-- game over --"),
            StateEvent::Tick if state.phase.is_some() && (1..=5).contains(&state.seconds_left) => {
                println!("{}...", state.seconds_left);
            }
            _ => {}
        }
    }
}

pub fn print_players(state: &GameState) {
    for player in state.players() {
        let mut line = player.to_string();
        if !player.alive {
            line.push_str(" (dead)");
        }
        if state.my_index == Some(player.index()) {
            line.push_str(" (you)");
        }
        if let Some(votes) = player.num_voted.filter(|votes| *votes > 0) {
            line.push_str(&format!(" [{votes} votes]"));
        }
        println!("  {line}");
    }
}

/// Runs one parsed command against the manager. Returns false on `quit`.
pub fn execute<C: Connection, P: Presenter>(
    manager: &mut GameManager<C, P>,
    command: Command,
) -> Result<bool, ClientError> {
    match command {
        Command::Host => manager.host(),
        Command::Join(room_code) => manager.join(room_code),
        Command::Name(name) => manager.set_name(name),
        Command::Start => manager.start_game(),
        Command::Phase(phase, secs) => {
            if !manager.set_phase_time(phase, secs) {
                println!("{secs}s is not an allowed {phase} time");
            }
        }
        Command::Roles(entries) => manager.set_role_list(entries),
        Command::Vote(player_index) => manager.vote(player_index),
        Command::Target(player_indices) => manager.target(player_indices),
        Command::DayTarget(player_index) => manager.day_target(player_index),
        Command::Judgement(verdict) => {
            manager.judgement(verdict);
        }
        Command::Will(will) => manager.save_will(will),
        Command::Say(text) => manager.send_message(text),
        Command::Whisper(player_index, text) => manager.send_whisper(player_index, text),
        Command::Players => print_players(manager.state()),
        Command::Connect => manager.connect()?,
        Command::Disconnect => manager.disconnect(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LobbyConfig;
    use crate::connection::{ConnectionEvent, MemoryConnection};
    use crate::types::Verdict;
    use crate::ui::RecordingPresenter;

    fn open_manager() -> GameManager<MemoryConnection, RecordingPresenter> {
        let connection = MemoryConnection { open: true, ..Default::default() };
        let mut manager =
            GameManager::new(connection, RecordingPresenter::default(), LobbyConfig::default());
        manager.connect().unwrap();
        manager.handle_event(ConnectionEvent::Opened);
        manager
    }

    #[test]
    fn test_execute_sends_commands() {
        let mut manager = open_manager();
        assert!(execute(&mut manager, Command::Host).unwrap());
        assert!(execute(&mut manager, Command::Judgement(Verdict::Guilty)).unwrap());
        assert!(execute(&mut manager, Command::Vote(None)).unwrap());
        assert_eq!(
            manager.connection().sent,
            vec![
                r#""Host""#.to_string(),
                r#"{"Judgement":{"verdict":"Guilty"}}"#.to_string(),
                r#"{"Vote":{"player_index":null}}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_execute_quit_and_disconnect() {
        let mut manager = open_manager();
        assert!(execute(&mut manager, Command::Disconnect).unwrap());
        assert_eq!(manager.screen(), Some(Screen::Disconnected));
        assert!(!execute(&mut manager, Command::Quit).unwrap());
    }

    #[test]
    fn test_plain_translate() {
        assert_eq!(plain_translate("chatmessage.GameOver", &[]), "chatmessage.GameOver");
        assert_eq!(
            plain_translate("chatmessage.Voted", &["1: Alice".into(), "2: Bob".into()]),
            "chatmessage.Voted: 1: Alice | 2: Bob"
        );
    }

    #[test]
    fn test_printing_listener_survives_state_reset() {
        let mut manager = open_manager();
        manager.add_listener(printing_listener(plain_translate));
        manager.handle_message(r#"{"AddChatMessages":{"chat_messages":["GameOver","GameOver"]}}"#);
        manager.handle_message(r#""Kicked""#);
        manager.handle_message(r#"{"AddChatMessages":{"chat_messages":["GameOver"]}}"#);
        assert_eq!(manager.state().chat_messages.len(), 1);
    }
}
