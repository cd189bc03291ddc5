use serde::{Deserialize, Serialize};

use crate::domain::state::{PlayerId, RoundStatus};

/// One row of the public score table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

/// Participant as listed in a player's view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub has_guessed: bool,
}

/// Viewer-relative projection of the game.
///
/// `current_word` is the plaintext word only for the drawer; everyone else
/// gets the blank-preserving mask, and it is empty when no word is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub game_status: RoundStatus,
    pub round_number: u32,
    pub max_rounds: u32,
    pub current_drawer_id: Option<PlayerId>,
    pub players: Vec<PlayerSummary>,
    pub current_word: String,
    /// Whole seconds left in the round; 0 unless drawing.
    pub time_remaining: u64,
    pub round_duration: u64,
}
