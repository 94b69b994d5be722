pub mod chat;
pub mod game_state;
pub mod grave;

pub use chat::{ChatEvent, ChatMessage};
pub use game_state::{GameOverReason, GameState, Player, PlayerButtons};
pub use grave::{DeathCause, Grave, GraveKiller, GravePhase, GraveRole};
