//! Session owner: routes transport events into [`GameState`] and user intents
//! out to the server.

pub mod listeners;
pub mod ticker;

use crate::config::LobbyConfig;
use crate::connection::{Connection, ConnectionEvent};
use crate::error::ClientError;
use crate::protocol::{apply, decode, Inbound, Outcome, RejectJoinReason, ToServerPacket};
use crate::state::{GameState, Player};
use crate::types::{PhaseName, PhaseTimes, PlayerIndex, RoleListEntry, Verdict};
use crate::ui::{Presenter, Screen};

pub use listeners::{ListenerId, ListenerRegistry, StateEvent};
pub use ticker::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Open,
    Closing,
}

pub struct GameManager<C: Connection, P: Presenter> {
    connection: C,
    presenter: P,
    lobby: LobbyConfig,
    state: GameState,
    listeners: ListenerRegistry,
    link: LinkState,
    /// `connect()` was called while the previous link was still closing.
    reconnect_pending: bool,
    room_code: Option<String>,
    screen: Option<Screen>,
}

impl<C: Connection, P: Presenter> GameManager<C, P> {
    pub fn new(connection: C, presenter: P, lobby: LobbyConfig) -> Self {
        Self {
            connection,
            presenter,
            lobby,
            state: GameState::default(),
            listeners: ListenerRegistry::default(),
            link: LinkState::Idle,
            reconnect_pending: false,
            room_code: None,
            screen: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn room_code(&self) -> Option<&str> {
        self.room_code.as_deref()
    }

    /// Last screen shown through the presenter.
    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    pub fn is_connected(&self) -> bool {
        self.link == LinkState::Open && self.connection.is_open()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Seat `index`, or the shared unknown player when there is no such seat.
    pub fn get_player(&self, index: PlayerIndex) -> &Player {
        self.state.player(index).unwrap_or(Player::unknown())
    }

    pub fn add_listener(
        &mut self,
        listener: impl FnMut(StateEvent<'_>, &GameState) + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // --- lifecycle ---

    /// Starts opening the connection. While a previous link is still closing
    /// the open is deferred until its `Closed` event has been handled, so no
    /// event from the old socket can be mistaken for one from the new.
    pub fn connect(&mut self) -> Result<(), ClientError> {
        match self.link {
            LinkState::Connecting | LinkState::Open => {
                tracing::debug!("connect ignored, link is {:?}", self.link);
                return Ok(());
            }
            LinkState::Closing => {
                tracing::debug!("connect deferred until the previous link has closed");
                self.reconnect_pending = true;
                return Ok(());
            }
            LinkState::Idle => {}
        }
        self.link = LinkState::Connecting;
        if let Err(e) = self.connection.open() {
            self.link = LinkState::Idle;
            return Err(e);
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.reconnect_pending = false;
        self.link = match self.link {
            LinkState::Idle => LinkState::Idle,
            _ => LinkState::Closing,
        };
        self.connection.close();
        self.reset_session();
        self.show(Screen::Disconnected);
        tracing::info!("disconnected from game server");
    }

    pub fn handle_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => {
                if self.link == LinkState::Closing {
                    tracing::debug!("connection opened after disconnect was requested");
                    return;
                }
                self.link = LinkState::Open;
                self.return_to_start();
                self.notify(StateEvent::Connected);
            }
            ConnectionEvent::Message(text) => self.handle_message(&text),
            ConnectionEvent::Closed { reason } => self.handle_closed(reason),
        }
    }

    fn handle_closed(&mut self, reason: Option<String>) {
        let previous = std::mem::replace(&mut self.link, LinkState::Idle);
        let title = match previous {
            LinkState::Idle => {
                tracing::debug!("connection closed");
                return;
            }
            LinkState::Closing => {
                tracing::debug!("connection closed");
                if std::mem::take(&mut self.reconnect_pending) {
                    if let Err(e) = self.connect() {
                        tracing::warn!("reconnect failed: {e}");
                        self.presenter.alert("Connection failed", &e.to_string());
                        self.return_to_start();
                    }
                }
                return;
            }
            LinkState::Connecting => "Connection failed",
            LinkState::Open => "Connection lost",
        };
        tracing::warn!("{title}: {}", reason.as_deref().unwrap_or("no reason given"));

        self.presenter.alert(
            title,
            reason
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or("The connection to the server was closed."),
        );
        self.return_to_start();
        self.notify(StateEvent::Disconnected);
    }

    /// Decodes and applies one inbound text frame, then notifies listeners
    /// with the message type.
    pub fn handle_message(&mut self, text: &str) {
        match decode(text) {
            Ok(Inbound::Packet { kind, packet }) => {
                tracing::debug!("received {kind}");
                let outcome = apply(&mut self.state, packet);
                self.follow(outcome);
                self.notify(StateEvent::Packet(&kind));
            }
            Ok(Inbound::Unrecognized { kind, .. }) => {
                tracing::warn!("unrecognized message type: {kind}");
                self.notify(StateEvent::Packet(&kind));
            }
            Err(e) => {
                tracing::warn!("ignoring message: {e}");
                if let Some(kind) = e.kind() {
                    self.notify(StateEvent::Packet(kind));
                }
            }
        }
    }

    fn follow(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Applied => {}
            Outcome::Navigate(screen) => self.show(screen),
            Outcome::Hosted { room_code } => {
                tracing::info!("hosting room {room_code}");
                self.room_code = Some(room_code);
                self.show(Screen::Lobby);
            }
            Outcome::JoinRejected(reason) => {
                if let RejectJoinReason::Other(code) = &reason {
                    tracing::warn!("unknown join rejection reason: {code}");
                }
                self.presenter.alert("Couldn't join", reason.message());
                self.return_to_start();
            }
            Outcome::StartRejected(reason) => {
                self.presenter.alert("Couldn't start", reason.message());
            }
            Outcome::Kicked => {
                tracing::info!("kicked from lobby");
                self.return_to_start();
            }
        }
    }

    // --- intents ---

    /// Serializes and sends one command. Dropped with a warning when the
    /// link is not open.
    pub fn send_command(&mut self, packet: &ToServerPacket) {
        if self.link != LinkState::Open {
            tracing::warn!("not connected, dropping {packet:?}");
            return;
        }
        let text = match packet.to_json_string() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to encode {packet:?}: {e}");
                return;
            }
        };
        if let Err(e) = self.connection.send(text) {
            tracing::warn!("send failed, dropping {packet:?}: {e}");
        }
    }

    pub fn host(&mut self) {
        self.send_command(&ToServerPacket::Host);
    }

    pub fn join(&mut self, room_code: impl Into<String>) {
        self.send_command(&ToServerPacket::Join { room_code: room_code.into() });
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.send_command(&ToServerPacket::SetName { name: name.into() });
    }

    pub fn start_game(&mut self) {
        self.send_command(&ToServerPacket::StartGame);
    }

    /// Sends every phase time, with `phase` replaced by `secs`. Local state is
    /// left alone until the server echoes the change.
    pub fn set_phase_time(&mut self, phase: PhaseName, secs: u64) -> bool {
        if !self.lobby.accepts_phase_time(secs) {
            tracing::debug!("phase time {secs}s for {phase} outside configured bounds");
            return false;
        }
        let mut times = self.state.phase_times;
        times.set(phase, secs);
        self.send_command(&ToServerPacket::set_phase_times(&times));
        true
    }

    pub fn set_phase_times(&mut self, times: &PhaseTimes) -> bool {
        if let Some((phase, secs)) = times.iter().find(|(_, secs)| !self.lobby.accepts_phase_time(*secs)) {
            tracing::debug!("phase time {secs}s for {phase} outside configured bounds");
            return false;
        }
        self.send_command(&ToServerPacket::set_phase_times(times));
        true
    }

    pub fn set_role_list(&mut self, entries: Vec<RoleListEntry>) {
        self.send_command(&ToServerPacket::set_role_list(entries));
    }

    /// `None` clears the vote.
    pub fn vote(&mut self, player_index: Option<PlayerIndex>) {
        self.send_command(&ToServerPacket::Vote { player_index });
    }

    /// An empty list clears all targets.
    pub fn target(&mut self, player_index_list: Vec<PlayerIndex>) {
        self.send_command(&ToServerPacket::Target { player_index_list });
    }

    pub fn day_target(&mut self, player_index: PlayerIndex) {
        self.send_command(&ToServerPacket::DayTarget { player_index });
    }

    /// Accepts a [`Verdict`] or its numeric form (-1 guilty, 0 abstain,
    /// 1 innocent). Anything else is dropped.
    pub fn judgement<V: TryInto<Verdict>>(&mut self, verdict: V) -> bool {
        match verdict.try_into() {
            Ok(verdict) => {
                self.send_command(&ToServerPacket::Judgement { verdict });
                true
            }
            Err(_) => {
                tracing::debug!("judgement outside -1..=1 dropped");
                false
            }
        }
    }

    pub fn save_will(&mut self, will: impl Into<String>) {
        self.send_command(&ToServerPacket::SaveWill { will: will.into() });
    }

    pub fn send_message(&mut self, text: impl Into<String>) {
        self.send_command(&ToServerPacket::SendMessage { text: text.into() });
    }

    pub fn send_whisper(&mut self, player_index: PlayerIndex, text: impl Into<String>) {
        self.send_command(&ToServerPacket::SendWhisper { player_index, text: text.into() });
    }

    // --- countdown ---

    pub fn tick(&mut self, elapsed_ms: u64) {
        ticker::advance(&mut self.state, elapsed_ms);
        self.notify(StateEvent::Tick);
    }

    // --- internals ---

    fn notify(&mut self, event: StateEvent<'_>) {
        self.listeners.notify(event, &self.state);
    }

    fn show(&mut self, screen: Screen) {
        self.screen = Some(screen);
        self.presenter.show(screen);
    }

    fn reset_session(&mut self) {
        self.state = GameState::default();
        self.room_code = None;
    }

    fn return_to_start(&mut self) {
        self.reset_session();
        self.show(Screen::Start);
    }
}
