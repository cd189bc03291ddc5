use serde_json::Value;
use tracing::{debug, info};

use super::{Game, Scheduler};
use crate::domain::redaction::guess_matches;
use crate::domain::scoring::guess_points;
use crate::domain::state::{PlayerId, RoundStatus};
use crate::errors::domain::{GameError, MIN_PLAYERS};
use crate::protocol::events::ServerMsg;
use crate::services::registry::Outbox;

impl<H: Outbox> Game<H> {
    /// Register a new participant, send them their id and view, and tell
    /// everyone they arrived.
    pub fn join(
        &mut self,
        sched: &mut dyn Scheduler,
        id: PlayerId,
        name: String,
        outbox: H,
    ) -> Result<(), GameError> {
        self.registry.add(id, name.clone(), outbox)?;
        info!(
            player_id = %id,
            players = self.registry.len(),
            status = %self.round.status,
            "Participant joined"
        );

        self.send(id, ServerMsg::PlayerInfo { id });
        let view = self.view_for(id);
        self.send(id, ServerMsg::GameState(view));
        self.broadcast(ServerMsg::PlayerJoin { id, name, score: 0 }, None);

        if self.awaiting_players
            && self.round.status == RoundStatus::RoundEnd
            && self.registry.len() >= MIN_PLAYERS
        {
            self.awaiting_players = false;
            info!("Enough players again, scheduling next round");
            sched.schedule_next_round(self.config.inter_round_delay);
        }

        self.settle(sched);
        Ok(())
    }

    /// Remove a participant. Idempotent; removing the drawer ends the round.
    pub fn leave(&mut self, sched: &mut dyn Scheduler, id: PlayerId) -> bool {
        let removed = self.registry.remove(id).is_some();
        if removed {
            self.departures.push_back(id);
        }
        self.settle(sched);
        removed
    }

    /// Check a guess against the secret word.
    ///
    /// Returns `true` only for a first correct guess by a non-drawer while
    /// drawing. The guesser is awarded time-weighted points and the round
    /// ends early once every non-drawer has guessed.
    pub fn receive_guess(&mut self, sched: &mut dyn Scheduler, id: PlayerId, text: &str) -> bool {
        if self.round.status != RoundStatus::Drawing
            || self.round.is_drawer(id)
            || self.round.players_who_guessed.contains(&id)
        {
            return false;
        }
        let Some(word) = self.round.current_word.as_deref() else {
            return false;
        };
        if !guess_matches(word, text) {
            return false;
        }

        let elapsed = self.round.elapsed(self.clock.now());
        let points = guess_points(&self.config.scoring, self.round.round_duration, elapsed);
        let Some(guesser) = self.registry.get_mut(id) else {
            return false;
        };
        guesser.score = guesser.score.saturating_add(points);
        guesser.has_guessed = true;
        let player_name = guesser.name.clone();
        let score = guesser.score;
        self.round.players_who_guessed.insert(id);

        info!(
            player_id = %id,
            points,
            score,
            elapsed_ms = elapsed.as_millis() as u64,
            "Correct guess"
        );

        self.broadcast(
            ServerMsg::CorrectGuess {
                player_id: id,
                player_name,
                score,
                points,
            },
            None,
        );

        if self.everyone_guessed() {
            info!(
                round_number = self.round.round_number,
                "Everyone guessed, ending round early"
            );
            self.close_round(sched);
        }
        self.settle(sched);
        true
    }

    /// Relay a non-matching guess as chat.
    ///
    /// Blank messages are dropped, as is anything matching the secret word
    /// while drawing, so repeat or drawer guesses cannot leak it.
    pub fn post_chat(&mut self, sched: &mut dyn Scheduler, id: PlayerId, text: &str) -> bool {
        let message = text.trim();
        if message.is_empty() {
            return false;
        }
        if self.round.status == RoundStatus::Drawing {
            if let Some(word) = self.round.current_word.as_deref() {
                if guess_matches(word, message) {
                    debug!(player_id = %id, "Suppressed chat containing the secret word");
                    return false;
                }
            }
        }
        let Some(sender) = self.registry.get(id) else {
            return false;
        };

        let chat = ServerMsg::ChatMessage {
            player_id: id,
            player_name: sender.name.clone(),
            message: message.to_string(),
        };
        self.broadcast(chat, None);
        self.settle(sched);
        true
    }

    /// Fan drawer strokes out to everyone else.
    pub fn forward_drawing(
        &mut self,
        sched: &mut dyn Scheduler,
        id: PlayerId,
        payload: Value,
    ) -> bool {
        if !self.accepts_drawing_from(id) {
            return false;
        }
        self.broadcast(ServerMsg::DrawingData(payload), Some(id));
        self.settle(sched);
        true
    }

    pub fn clear_canvas(&mut self, sched: &mut dyn Scheduler, id: PlayerId) -> bool {
        if !self.accepts_drawing_from(id) {
            return false;
        }
        self.broadcast(ServerMsg::Clear, Some(id));
        self.settle(sched);
        true
    }

    fn accepts_drawing_from(&self, id: PlayerId) -> bool {
        self.round.status == RoundStatus::Drawing && self.round.is_drawer(id)
    }
}
