pub mod events;
pub mod game_state;

pub use events::{ClientMsg, ErrorCode, ServerMsg};
pub use game_state::{PlayerSummary, PlayerView, ScoreEntry};
