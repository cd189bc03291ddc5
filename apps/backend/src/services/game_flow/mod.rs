//! Round controller: the single authoritative owner of round state and the
//! participant table.
//!
//! Every operation runs to completion on `&mut Game`, so transitions are
//! serialized by construction. Deferred work (round timer, inter-round
//! auto-start) is requested through a [`Scheduler`] and re-enters through
//! [`Game::on_round_timeout`] and [`Game::on_next_round_due`].
//!
//! Participants whose delivery fails are queued as departures and processed
//! at the end of the operation that observed the failure, after the
//! operation's own transition has completed.

mod clock;
mod player_actions;
mod round_lifecycle;
mod router;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests_props;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::config::game::GameConfig;
use crate::domain::redaction::mask_word;
use crate::domain::state::{PlayerId, RoundState, RoundStatus};
use crate::errors::domain::GameError;
use crate::protocol::events::ServerMsg;
use crate::protocol::game_state::PlayerView;
use crate::services::registry::{Outbox, SessionRegistry};

/// Deferred actions requested by the round controller.
///
/// Only one round timer may be armed at a time: arming replaces (and
/// cancels) any previous one.
pub trait Scheduler {
    /// Call [`Game::on_round_timeout`] with `round_number` after `after`.
    fn arm_round_timer(&mut self, round_number: u32, after: Duration);
    fn cancel_round_timer(&mut self);
    /// Call [`Game::on_next_round_due`] after `after`.
    fn schedule_next_round(&mut self, after: Duration);
    fn cancel_next_round(&mut self);
}

/// Assignment produced by a successful round start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStarted {
    pub drawer_id: PlayerId,
    pub word: String,
    pub round_number: u32,
}

pub struct Game<H> {
    config: GameConfig,
    registry: SessionRegistry<H>,
    round: RoundState,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    departures: VecDeque<PlayerId>,
    /// An automatic round start found too few players.
    awaiting_players: bool,
}

impl<H: Outbox> Game<H> {
    pub fn new(config: GameConfig, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let round = RoundState::new(config.round_duration, config.max_rounds);
        Self {
            config,
            registry: SessionRegistry::new(),
            round,
            clock,
            rng,
            departures: VecDeque::new(),
            awaiting_players: false,
        }
    }

    /// Game on the wall clock with an OS-seeded rng.
    pub fn with_system_clock(config: GameConfig) -> Self {
        Self::new(config, Arc::new(SystemClock), StdRng::from_os_rng())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn registry(&self) -> &SessionRegistry<H> {
        &self.registry
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.round.remaining_secs(self.clock.now())
    }

    /// Per-player projection; the word is masked for everyone but the drawer.
    pub fn view_for(&self, id: PlayerId) -> PlayerView {
        let current_word = match self.round.current_word.as_deref() {
            Some(word) if self.round.is_drawer(id) => word.to_string(),
            Some(word) => mask_word(word),
            None => String::new(),
        };

        PlayerView {
            game_status: self.round.status,
            round_number: self.round.round_number,
            max_rounds: self.round.max_rounds,
            current_drawer_id: self.round.current_drawer,
            players: self.registry.summaries(),
            current_word,
            time_remaining: self.remaining_secs(),
            round_duration: self.round.round_duration.as_secs(),
        }
    }

    fn send(&mut self, id: PlayerId, msg: ServerMsg) {
        if let Err(GameError::DeliveryFailure(id)) = self.registry.send_to(id, msg) {
            self.departures.push_back(id);
        }
    }

    fn broadcast(&mut self, msg: ServerMsg, exclude: Option<PlayerId>) {
        let failed = self.registry.broadcast(&msg, exclude);
        self.departures.extend(failed);
    }

    fn send_views(&mut self) {
        for id in self.registry.ids() {
            let view = self.view_for(id);
            self.send(id, ServerMsg::GameState(view));
        }
    }

    /// Every live non-drawer has guessed (vacuously true when none are left).
    fn everyone_guessed(&self) -> bool {
        self.registry
            .iter()
            .filter(|p| !self.round.is_drawer(p.id))
            .all(|p| self.round.players_who_guessed.contains(&p.id))
    }

    /// Apply departure rules for everyone removed since the last call.
    fn settle(&mut self, sched: &mut dyn Scheduler) {
        while let Some(id) = self.departures.pop_front() {
            self.round.players_who_guessed.remove(&id);
            info!(
                player_id = %id,
                players = self.registry.len(),
                "Participant departed"
            );
            self.broadcast(ServerMsg::PlayerLeave { player_id: id }, None);

            if self.round.status != RoundStatus::Drawing {
                if self.round.is_drawer(id) {
                    self.round.current_drawer = None;
                }
                continue;
            }
            if self.round.is_drawer(id) {
                info!(
                    player_id = %id,
                    round_number = self.round.round_number,
                    "Drawer left, ending round early"
                );
                self.close_round(sched);
            } else if self.everyone_guessed() {
                self.close_round(sched);
            }
        }
    }
}
