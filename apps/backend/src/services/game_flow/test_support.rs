//! In-memory doubles for driving a [`Game`] without actors or sockets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Game, ManualClock, RoundStarted, Scheduler};
use crate::config::game::GameConfig;
use crate::domain::state::PlayerId;
use crate::protocol::events::ServerMsg;
use crate::services::registry::{MailboxClosed, Outbox};

/// Outbox that records everything delivered to it until closed.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutbox {
    inbox: Arc<Mutex<Vec<ServerMsg>>>,
    closed: Arc<AtomicBool>,
}

impl RecordingOutbox {
    pub fn messages(&self) -> Vec<ServerMsg> {
        self.inbox.lock().clone()
    }

    pub fn take(&self) -> Vec<ServerMsg> {
        std::mem::take(&mut *self.inbox.lock())
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.inbox.lock().iter().map(ServerMsg::kind).collect()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl Outbox for RecordingOutbox {
    fn deliver(&self, msg: ServerMsg) -> Result<(), MailboxClosed> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MailboxClosed);
        }
        self.inbox.lock().push(msg);
        Ok(())
    }
}

/// Scheduler that records the latest directives instead of running them.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub round_timer: Option<(u32, Duration)>,
    pub next_round: Option<Duration>,
    pub round_timers_armed: usize,
}

impl Scheduler for RecordingScheduler {
    fn arm_round_timer(&mut self, round_number: u32, after: Duration) {
        self.round_timer = Some((round_number, after));
        self.round_timers_armed += 1;
    }

    fn cancel_round_timer(&mut self) {
        self.round_timer = None;
    }

    fn schedule_next_round(&mut self, after: Duration) {
        self.next_round = Some(after);
    }

    fn cancel_next_round(&mut self) {
        self.next_round = None;
    }
}

pub struct Seat {
    pub id: PlayerId,
    pub outbox: RecordingOutbox,
}

/// A game plus its doubles and the players seated so far.
pub struct Table {
    pub game: Game<RecordingOutbox>,
    pub sched: RecordingScheduler,
    pub clock: Arc<ManualClock>,
    pub seats: Vec<Seat>,
}

pub fn test_config() -> GameConfig {
    GameConfig {
        round_duration: Duration::from_secs(60),
        max_rounds: 3,
        inter_round_delay: Duration::from_secs(5),
        time_update_interval: Duration::from_secs(1),
        words: ["apple", "ice cream", "house"]
            .iter()
            .map(|w| w.to_string())
            .collect(),
        ..GameConfig::default()
    }
}

impl Table {
    pub fn new(config: GameConfig, players: usize) -> Self {
        Self::seeded(config, players, 42)
    }

    pub fn seeded(config: GameConfig, players: usize, seed: u64) -> Self {
        let clock = Arc::new(ManualClock::new());
        let game = Game::new(config, clock.clone(), StdRng::seed_from_u64(seed));
        let mut table = Self {
            game,
            sched: RecordingScheduler::default(),
            clock,
            seats: Vec::new(),
        };
        for _ in 0..players {
            table.join();
        }
        table
    }

    pub fn join(&mut self) -> PlayerId {
        let id = PlayerId::generate();
        let outbox = RecordingOutbox::default();
        let name = format!("player{}", self.seats.len() + 1);
        self.game
            .join(&mut self.sched, id, name, outbox.clone())
            .expect("fresh id should register");
        self.seats.push(Seat { id, outbox });
        id
    }

    pub fn outbox(&self, id: PlayerId) -> &RecordingOutbox {
        &self
            .seats
            .iter()
            .find(|seat| seat.id == id)
            .expect("seat should exist")
            .outbox
    }

    pub fn start(&mut self) -> RoundStarted {
        self.game
            .start_round(&mut self.sched)
            .expect("round should start")
    }

    /// Live participants other than the current drawer.
    pub fn guessers(&self) -> Vec<PlayerId> {
        let drawer = self.game.round().current_drawer;
        self.game
            .registry()
            .ids()
            .into_iter()
            .filter(|id| Some(*id) != drawer)
            .collect()
    }

    pub fn score(&self, id: PlayerId) -> u32 {
        self.game
            .registry()
            .get(id)
            .map(|p| p.score)
            .expect("participant should be live")
    }

    pub fn clear_inboxes(&self) {
        for seat in &self.seats {
            seat.outbox.take();
        }
    }

    pub fn guess(&mut self, id: PlayerId, text: &str) -> bool {
        self.game.receive_guess(&mut self.sched, id, text)
    }
}
