use serde::{Deserialize, Serialize};

use crate::types::{PhaseName, PhaseTimes, PlayerIndex, RoleListEntry, RoleName, Verdict};

use super::chat::ChatEvent;
use super::grave::Grave;

/// Actions the server currently allows against one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerButtons {
    pub target: bool,
    pub vote: bool,
    pub day_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    index: PlayerIndex,
    pub alive: bool,
    pub num_voted: Option<u8>,
    pub buttons: PlayerButtons,
}

static UNKNOWN_PLAYER: Player = Player {
    name: String::new(),
    index: PlayerIndex::MAX,
    alive: false,
    num_voted: None,
    buttons: PlayerButtons { target: false, vote: false, day_target: false },
};

impl Player {
    pub fn new(name: impl Into<String>, index: PlayerIndex) -> Self {
        Self {
            name: name.into(),
            index,
            alive: true,
            num_voted: None,
            buttons: PlayerButtons::default(),
        }
    }

    /// Stand-in returned for seats the server has not declared yet.
    pub fn unknown() -> &'static Player {
        &UNKNOWN_PLAYER
    }

    pub fn index(&self) -> PlayerIndex {
        self.index
    }

    pub fn is_unknown(&self) -> bool {
        self.index == PlayerIndex::MAX
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            f.write_str("?")
        } else {
            write!(f, "{}: {}", self.index + 1, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    ReachedMaxDay,
    #[serde(untagged)]
    Other(String),
}

/// Everything the server has told this client about the current session.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub my_name: Option<String>,
    pub my_index: Option<PlayerIndex>,

    players: Vec<Player>,
    pub graves: Vec<Grave>,
    pub chat_messages: Vec<ChatEvent>,

    pub player_on_trial: Option<PlayerIndex>,
    pub phase: Option<PhaseName>,
    pub day_number: u8,
    pub seconds_left: u64,

    pub role: Option<RoleName>,
    pub will: String,
    pub targets: Vec<PlayerIndex>,
    pub voted: Option<PlayerIndex>,
    pub judgement: Option<Verdict>,

    pub role_list: Vec<RoleListEntry>,
    pub investigator_results: Vec<Vec<RoleName>>,
    pub phase_times: PhaseTimes,

    pub game_over: Option<GameOverReason>,
}

impl GameState {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: PlayerIndex) -> Option<&Player> {
        self.players.get(index)
    }

    /// Renames existing seats and appends any seat past the current end.
    /// Seats are never removed or reordered.
    pub fn upsert_player_names(&mut self, names: Vec<String>) {
        for (index, name) in names.into_iter().enumerate() {
            match self.players.get_mut(index) {
                Some(player) => player.name = name,
                None => self.players.push(Player::new(name, index)),
            }
        }
    }

    /// Applies `values[i]` to `players[i]` for every index present in both.
    pub fn update_each_player<T>(&mut self, values: Vec<T>, mut apply: impl FnMut(&mut Player, T)) {
        for (player, value) in self.players.iter_mut().zip(values) {
            apply(player, value);
        }
    }

    pub fn me(&self) -> Option<&Player> {
        self.my_index.and_then(|index| self.player(index))
    }
}
