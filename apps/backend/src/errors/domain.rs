//! Game-level error type used by the round controller and session registry.
//!
//! This error type is transport-agnostic. None of these conditions is fatal:
//! the router logs them and carries on, and HTTP handlers convert them
//! through `From<GameError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::{PlayerId, RoundStatus};

/// Minimum number of participants needed to play a round.
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Operation attempted outside the status where it is legal.
    InvalidTransition {
        operation: &'static str,
        status: RoundStatus,
    },
    /// Not enough participants to start a round.
    InsufficientPlayers { present: usize, required: usize },
    /// A participant with this id is already registered.
    DuplicateId(PlayerId),
    /// The participant's connection could not accept a message.
    DeliveryFailure(PlayerId),
    /// No participant with this id is registered.
    UnknownPlayer(PlayerId),
    /// The configured word list has no entries.
    EmptyWordList,
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::InvalidTransition { operation, status } => {
                write!(f, "{operation} is not allowed while {status}")
            }
            GameError::InsufficientPlayers { present, required } => {
                write!(f, "round not started: {present} of {required} players present")
            }
            GameError::DuplicateId(id) => write!(f, "player {id} is already registered"),
            GameError::DeliveryFailure(id) => write!(f, "delivery to player {id} failed"),
            GameError::UnknownPlayer(id) => write!(f, "player {id} is not registered"),
            GameError::EmptyWordList => write!(f, "word list is empty"),
        }
    }
}

impl Error for GameError {}

impl GameError {
    pub fn invalid_transition(operation: &'static str, status: RoundStatus) -> Self {
        Self::InvalidTransition { operation, status }
    }

    pub fn insufficient_players(present: usize) -> Self {
        Self::InsufficientPlayers {
            present,
            required: MIN_PLAYERS,
        }
    }
}
