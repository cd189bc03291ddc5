//! Connected participants and the fan-out primitive used to reach them.

use thiserror::Error;
use tracing::warn;

use crate::domain::state::PlayerId;
use crate::errors::domain::GameError;
use crate::protocol::events::ServerMsg;
use crate::protocol::game_state::{PlayerSummary, ScoreEntry};

/// The recipient side of a participant's connection has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("recipient mailbox closed")]
pub struct MailboxClosed;

/// Per-participant outbound handle.
///
/// Implementations must fail fast rather than wait on a slow recipient.
pub trait Outbox {
    fn deliver(&self, msg: ServerMsg) -> Result<(), MailboxClosed>;
}

#[derive(Debug)]
pub struct Participant<H> {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    /// Guessed the word correctly in the current round.
    pub has_guessed: bool,
    outbox: H,
}

impl<H> Participant<H> {
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id,
            name: self.name.clone(),
            score: self.score,
            has_guessed: self.has_guessed,
        }
    }

    pub fn score_entry(&self) -> ScoreEntry {
        ScoreEntry {
            id: self.id,
            name: self.name.clone(),
            score: self.score,
        }
    }
}

/// Participants in join order.
#[derive(Debug)]
pub struct SessionRegistry<H> {
    participants: Vec<Participant<H>>,
}

impl<H> Default for SessionRegistry<H> {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
        }
    }
}

impl<H: Outbox> SessionRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant with a zero score.
    pub fn add(&mut self, id: PlayerId, name: String, outbox: H) -> Result<(), GameError> {
        if self.contains(id) {
            return Err(GameError::DuplicateId(id));
        }
        self.participants.push(Participant {
            id,
            name,
            score: 0,
            has_guessed: false,
            outbox,
        });
        Ok(())
    }

    /// Remove a participant; absent ids are ignored.
    pub fn remove(&mut self, id: PlayerId) -> Option<Participant<H>> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Participant<H>> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Participant<H>> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant<H>> {
        self.participants.iter()
    }

    pub fn reset_guess_flags(&mut self) {
        for participant in &mut self.participants {
            participant.has_guessed = false;
        }
    }

    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.participants.iter().map(Participant::summary).collect()
    }

    pub fn score_table(&self) -> Vec<ScoreEntry> {
        self.participants
            .iter()
            .map(Participant::score_entry)
            .collect()
    }

    /// Deliver to a single participant. A failed delivery removes them.
    pub fn send_to(&mut self, id: PlayerId, msg: ServerMsg) -> Result<(), GameError> {
        let participant = self.get(id).ok_or(GameError::UnknownPlayer(id))?;
        if participant.outbox.deliver(msg).is_err() {
            warn!(player_id = %id, "Delivery failed, dropping participant");
            self.remove(id);
            return Err(GameError::DeliveryFailure(id));
        }
        Ok(())
    }

    /// Deliver `msg` to everyone except `exclude`.
    ///
    /// Recipients whose delivery fails are removed; their ids are returned so
    /// the caller can apply departure rules. Messages already handed to other
    /// recipients are not recalled.
    pub fn broadcast(&mut self, msg: &ServerMsg, exclude: Option<PlayerId>) -> Vec<PlayerId> {
        let mut failed = Vec::new();
        for participant in &self.participants {
            if Some(participant.id) == exclude {
                continue;
            }
            if participant.outbox.deliver(msg.clone()).is_err() {
                warn!(
                    player_id = %participant.id,
                    kind = msg.kind(),
                    "Broadcast delivery failed, dropping participant"
                );
                failed.push(participant.id);
            }
        }
        self.participants.retain(|p| !failed.contains(&p.id));
        failed
    }
}
