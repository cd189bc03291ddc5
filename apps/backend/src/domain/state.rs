use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque participant identity, minted by the server when a socket connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// Round life-cycle phases.
///
/// `Waiting` is the initial phase and `GameOver` is terminal; every other
/// transition goes `Drawing -> RoundEnd -> (Drawing | GameOver)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// No round has been played yet.
    Waiting,
    /// A drawer is active and guesses are accepted.
    Drawing,
    /// Results of the last round are on display.
    RoundEnd,
    /// All rounds played.
    GameOver,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Waiting => "waiting",
            RoundStatus::Drawing => "drawing",
            RoundStatus::RoundEnd => "round_end",
            RoundStatus::GameOver => "game_over",
        }
    }
}

impl Display for RoundStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Authoritative round state. Created once and mutated in place for the
/// lifetime of the game.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub status: RoundStatus,
    /// Secret word; `Some` only while drawing or showing round results.
    pub current_word: Option<String>,
    pub current_drawer: Option<PlayerId>,
    pub round_started_at: Option<Instant>,
    pub round_duration: Duration,
    /// 1-based once the first round starts; 0 while waiting.
    pub round_number: u32,
    pub max_rounds: u32,
    /// Never contains the current drawer.
    pub players_who_guessed: HashSet<PlayerId>,
    /// Drawers picked since the last full-rotation reset.
    pub drawer_history: Vec<PlayerId>,
    /// Words picked since the word list was last exhausted.
    pub used_words: HashSet<String>,
}

impl RoundState {
    pub fn new(round_duration: Duration, max_rounds: u32) -> Self {
        Self {
            status: RoundStatus::Waiting,
            current_word: None,
            current_drawer: None,
            round_started_at: None,
            round_duration,
            round_number: 0,
            max_rounds,
            players_who_guessed: HashSet::new(),
            drawer_history: Vec::new(),
            used_words: HashSet::new(),
        }
    }

    pub fn is_drawer(&self, id: PlayerId) -> bool {
        self.current_drawer == Some(id)
    }

    pub fn is_final_round(&self) -> bool {
        self.round_number >= self.max_rounds
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.round_started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default()
    }

    /// Time left in the current round; zero unless drawing.
    pub fn remaining(&self, now: Instant) -> Duration {
        if self.status != RoundStatus::Drawing {
            return Duration::ZERO;
        }
        self.round_duration.saturating_sub(self.elapsed(now))
    }

    /// Remaining time rounded up to whole seconds, so a round only reads 0
    /// once it is actually over.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}
