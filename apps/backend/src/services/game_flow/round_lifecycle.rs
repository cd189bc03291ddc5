use tracing::{debug, info};

use super::{Game, RoundStarted, Scheduler};
use crate::domain::redaction::mask_word;
use crate::domain::scoring::drawer_bonus;
use crate::domain::selector::{next_drawer, next_word};
use crate::domain::state::RoundStatus;
use crate::errors::domain::{GameError, MIN_PLAYERS};
use crate::protocol::events::ServerMsg;
use crate::services::registry::Outbox;

impl<H: Outbox> Game<H> {
    /// Start the next round: pick drawer and word, arm the round timer and
    /// announce the round.
    ///
    /// Legal from `Waiting` or `RoundEnd` with at least two participants.
    /// The drawer is the only recipient of the plaintext word.
    pub fn start_round(&mut self, sched: &mut dyn Scheduler) -> Result<RoundStarted, GameError> {
        let result = self.begin_round(sched);
        self.settle(sched);
        result
    }

    /// End the current round. Only acts while drawing, so repeated calls
    /// from the timer, the tick loop or early completion announce once.
    pub fn end_round(&mut self, sched: &mut dyn Scheduler) -> bool {
        let ended = self.close_round(sched);
        self.settle(sched);
        ended
    }

    /// Finish the game and announce the winners. Terminal.
    pub fn end_game(&mut self, sched: &mut dyn Scheduler) -> bool {
        let finished = self.finish_game(sched);
        self.settle(sched);
        finished
    }

    /// Round timer callback. Firings for an earlier round are ignored.
    pub fn on_round_timeout(&mut self, sched: &mut dyn Scheduler, round_number: u32) {
        if self.round.status != RoundStatus::Drawing || self.round.round_number != round_number {
            debug!(
                round_number,
                current_round = self.round.round_number,
                status = %self.round.status,
                "Stale round timer ignored"
            );
            return;
        }
        info!(round_number, "Round time elapsed");
        self.end_round(sched);
    }

    /// Inter-round delay callback.
    pub fn on_next_round_due(&mut self, sched: &mut dyn Scheduler) {
        match self.start_round(sched) {
            Ok(started) => debug!(
                round_number = started.round_number,
                "Automatic round start"
            ),
            Err(err @ GameError::InsufficientPlayers { .. }) => {
                self.awaiting_players = true;
                info!(error = %err, "Waiting for players before the next round");
            }
            Err(err) => debug!(error = %err, "Automatic round start skipped"),
        }
    }

    /// Periodic clock broadcast while drawing. Returns the seconds announced.
    pub fn tick(&mut self, sched: &mut dyn Scheduler) -> Option<u64> {
        if self.round.status != RoundStatus::Drawing {
            return None;
        }
        let time_remaining = self.remaining_secs();
        self.broadcast(ServerMsg::TimeUpdate { time_remaining }, None);
        if time_remaining == 0 {
            self.close_round(sched);
        }
        self.settle(sched);
        Some(time_remaining)
    }

    fn begin_round(&mut self, sched: &mut dyn Scheduler) -> Result<RoundStarted, GameError> {
        let status = self.round.status;
        if !matches!(status, RoundStatus::Waiting | RoundStatus::RoundEnd)
            || self.round.is_final_round()
        {
            return Err(GameError::invalid_transition("start_round", status));
        }
        let present = self.registry.len();
        if present < MIN_PLAYERS {
            return Err(GameError::insufficient_players(present));
        }

        sched.cancel_round_timer();
        sched.cancel_next_round();

        let word = next_word(&self.config.words, &mut self.round.used_words, &mut self.rng)
            .ok_or(GameError::EmptyWordList)?;
        let live = self.registry.ids();
        let drawer_id = next_drawer(&live, &mut self.round.drawer_history, &mut self.rng)
            .ok_or_else(|| GameError::insufficient_players(present))?;

        self.round.players_who_guessed.clear();
        self.registry.reset_guess_flags();
        self.round.status = RoundStatus::Drawing;
        self.round.current_word = Some(word.clone());
        self.round.current_drawer = Some(drawer_id);
        self.round.round_started_at = Some(self.clock.now());
        self.round.round_number += 1;
        self.awaiting_players = false;

        sched.arm_round_timer(self.round.round_number, self.round.round_duration);

        info!(
            round_number = self.round.round_number,
            max_rounds = self.round.max_rounds,
            drawer_id = %drawer_id,
            players = present,
            "Round started"
        );

        let started = RoundStarted {
            drawer_id,
            word,
            round_number: self.round.round_number,
        };
        self.announce_round(&started);
        Ok(started)
    }

    fn announce_round(&mut self, started: &RoundStarted) {
        let drawer_name = self
            .registry
            .get(started.drawer_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        self.broadcast(
            ServerMsg::RoundStart {
                drawer_id: started.drawer_id,
                drawer_name,
                round_number: started.round_number,
                max_rounds: self.round.max_rounds,
                word_hint: mask_word(&started.word),
                duration: self.round.round_duration.as_secs(),
            },
            None,
        );
        self.send(
            started.drawer_id,
            ServerMsg::WordToDraw {
                word: started.word.clone(),
            },
        );
        self.send_views();
    }

    pub(super) fn close_round(&mut self, sched: &mut dyn Scheduler) -> bool {
        if self.round.status != RoundStatus::Drawing {
            debug!(status = %self.round.status, "end_round ignored");
            return false;
        }
        sched.cancel_round_timer();

        let guessers = self.round.players_who_guessed.len();
        let bonus = drawer_bonus(&self.config.scoring, guessers);
        let drawer_id = self.round.current_drawer;
        if let Some(drawer) = drawer_id.and_then(|id| self.registry.get_mut(id)) {
            drawer.score = drawer.score.saturating_add(bonus);
        }
        self.round.status = RoundStatus::RoundEnd;

        info!(
            round_number = self.round.round_number,
            guessers,
            drawer_bonus = bonus,
            "Round ended"
        );

        let results = ServerMsg::RoundEnd {
            word: self.round.current_word.clone().unwrap_or_default(),
            drawer_id,
            round_number: self.round.round_number,
            scores: self.registry.score_table(),
        };
        self.broadcast(results, None);

        // A departed drawer stays attributed in the results only.
        if let Some(id) = drawer_id {
            if !self.registry.contains(id) {
                self.round.current_drawer = None;
            }
        }

        if self.round.is_final_round() {
            self.finish_game(sched);
        } else if self.registry.len() >= MIN_PLAYERS {
            sched.schedule_next_round(self.config.inter_round_delay);
        } else {
            self.awaiting_players = true;
            info!(
                players = self.registry.len(),
                "Not enough players to continue, waiting"
            );
        }
        true
    }

    fn finish_game(&mut self, sched: &mut dyn Scheduler) -> bool {
        if self.round.status == RoundStatus::GameOver {
            return false;
        }
        sched.cancel_round_timer();
        sched.cancel_next_round();

        self.round.status = RoundStatus::GameOver;
        self.round.current_word = None;
        self.round.current_drawer = None;
        self.awaiting_players = false;

        let scores = self.registry.score_table();
        let top = scores.iter().map(|entry| entry.score).max();
        let winners: Vec<_> = scores
            .iter()
            .filter(|entry| Some(entry.score) == top)
            .cloned()
            .collect();

        info!(
            rounds = self.round.round_number,
            winners = winners.len(),
            top_score = top.unwrap_or(0),
            "Game over"
        );

        self.broadcast(ServerMsg::GameOver { winners, scores }, None);
        true
    }
}
