//! Wire events exchanged with clients.
//!
//! Every frame is `{"type": <kind>, "payload": ...}`; kinds without a payload
//! omit the field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::state::PlayerId;
use crate::protocol::game_state::{PlayerView, ScoreEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMsg {
    StartGame,
    /// Opaque stroke data, relayed untouched.
    Draw(Value),
    Clear,
    Guess { message: String },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMsg {
    PlayerInfo {
        id: PlayerId,
    },

    GameState(PlayerView),

    PlayerJoin {
        id: PlayerId,
        name: String,
        score: u32,
    },

    PlayerLeave {
        player_id: PlayerId,
    },

    /// Drawer only.
    WordToDraw {
        word: String,
    },

    RoundStart {
        drawer_id: PlayerId,
        drawer_name: String,
        round_number: u32,
        max_rounds: u32,
        word_hint: String,
        duration: u64,
    },

    DrawingData(Value),

    Clear,

    CorrectGuess {
        player_id: PlayerId,
        player_name: String,
        score: u32,
        points: u32,
    },

    ChatMessage {
        player_id: PlayerId,
        player_name: String,
        message: String,
    },

    RoundEnd {
        word: String,
        drawer_id: Option<PlayerId>,
        round_number: u32,
        scores: Vec<ScoreEntry>,
    },

    GameOver {
        winners: Vec<ScoreEntry>,
        scores: Vec<ScoreEntry>,
    },

    TimeUpdate {
        time_remaining: u64,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMsg::PlayerInfo { .. } => "player_info",
            ServerMsg::GameState(_) => "game_state",
            ServerMsg::PlayerJoin { .. } => "player_join",
            ServerMsg::PlayerLeave { .. } => "player_leave",
            ServerMsg::WordToDraw { .. } => "word_to_draw",
            ServerMsg::RoundStart { .. } => "round_start",
            ServerMsg::DrawingData(_) => "drawing_data",
            ServerMsg::Clear => "clear",
            ServerMsg::CorrectGuess { .. } => "correct_guess",
            ServerMsg::ChatMessage { .. } => "chat_message",
            ServerMsg::RoundEnd { .. } => "round_end",
            ServerMsg::GameOver { .. } => "game_over",
            ServerMsg::TimeUpdate { .. } => "time_update",
            ServerMsg::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    UnsupportedFrame,
}
