//! `GameServer` actor: the single serialization point for the game.
//!
//! Sessions talk to it through messages; the round controller's deferred
//! work is mapped onto actor timers via [`ActorScheduler`].

use std::time::Duration;

use actix::prelude::*;
use tracing::{debug, info, warn};

use crate::config::game::GameConfig;
use crate::domain::state::{PlayerId, RoundStatus};
use crate::errors::domain::GameError;
use crate::protocol::events::{ClientMsg, ServerMsg};
use crate::services::game_flow::{Game, Scheduler};
use crate::services::registry::{MailboxClosed, Outbox};

/// A server event addressed to one session.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

impl Outbox for Recipient<Outbound> {
    fn deliver(&self, msg: ServerMsg) -> Result<(), MailboxClosed> {
        if !self.connected() {
            return Err(MailboxClosed);
        }
        self.do_send(Outbound(msg));
        Ok(())
    }
}

#[derive(Message)]
#[rtype(result = "Result<(), GameError>")]
pub struct Connect {
    pub id: PlayerId,
    pub name: String,
    pub addr: Recipient<Outbound>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: PlayerId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Inbound {
    pub id: PlayerId,
    pub msg: ClientMsg,
}

/// Snapshot for the health endpoint.
#[derive(Message)]
#[rtype(result = "ServerSummary")]
pub struct GetSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub players: usize,
    pub status: RoundStatus,
    pub round_number: u32,
    pub max_rounds: u32,
}

#[derive(Default)]
struct TimerHandles {
    round_timer: Option<SpawnHandle>,
    next_round: Option<SpawnHandle>,
}

/// Borrowed view of the actor context that satisfies [`Scheduler`].
struct ActorScheduler<'a> {
    ctx: &'a mut Context<GameServer>,
    timers: &'a mut TimerHandles,
}

impl Scheduler for ActorScheduler<'_> {
    fn arm_round_timer(&mut self, round_number: u32, after: Duration) {
        self.cancel_round_timer();
        let handle = self.ctx.run_later(after, move |actor, ctx| {
            actor.timers.round_timer = None;
            actor.dispatch(ctx, |game, sched| game.on_round_timeout(sched, round_number));
        });
        self.timers.round_timer = Some(handle);
    }

    fn cancel_round_timer(&mut self) {
        if let Some(handle) = self.timers.round_timer.take() {
            self.ctx.cancel_future(handle);
        }
    }

    fn schedule_next_round(&mut self, after: Duration) {
        self.cancel_next_round();
        let handle = self.ctx.run_later(after, |actor, ctx| {
            actor.timers.next_round = None;
            actor.dispatch(ctx, |game, sched| game.on_next_round_due(sched));
        });
        self.timers.next_round = Some(handle);
    }

    fn cancel_next_round(&mut self) {
        if let Some(handle) = self.timers.next_round.take() {
            self.ctx.cancel_future(handle);
        }
    }
}

pub struct GameServer {
    game: Game<Recipient<Outbound>>,
    timers: TimerHandles,
}

impl GameServer {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::with_system_clock(config),
            timers: TimerHandles::default(),
        }
    }

    fn dispatch<R>(
        &mut self,
        ctx: &mut Context<Self>,
        op: impl FnOnce(&mut Game<Recipient<Outbound>>, &mut dyn Scheduler) -> R,
    ) -> R {
        let mut sched = ActorScheduler {
            ctx,
            timers: &mut self.timers,
        };
        op(&mut self.game, &mut sched)
    }
}

impl Actor for GameServer {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let config = self.game.config();
        info!(
            round_duration_secs = config.round_duration.as_secs(),
            max_rounds = config.max_rounds,
            words = config.words.len(),
            "[GAME SERVER] started"
        );

        ctx.run_interval(config.time_update_interval, |actor, ctx| {
            actor.dispatch(ctx, |game, sched| game.tick(sched));
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GAME SERVER] stopped");
    }
}

impl Handler<Connect> for GameServer {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        let Connect { id, name, addr } = msg;
        self.dispatch(ctx, |game, sched| game.join(sched, id, name, addr))
            .inspect_err(|err| warn!(player_id = %id, error = %err, "[GAME SERVER] connect rejected"))
    }
}

impl Handler<Disconnect> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        let removed = self.dispatch(ctx, |game, sched| game.leave(sched, msg.id));
        if !removed {
            debug!(player_id = %msg.id, "[GAME SERVER] disconnect for unknown participant");
        }
    }
}

impl Handler<Inbound> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: Inbound, ctx: &mut Self::Context) -> Self::Result {
        let Inbound { id, msg } = msg;
        if !self.game.registry().contains(id) {
            debug!(player_id = %id, "[GAME SERVER] message from departed participant dropped");
            return;
        }
        self.dispatch(ctx, |game, sched| game.handle_client_msg(sched, id, msg));
    }
}

impl Handler<GetSummary> for GameServer {
    type Result = MessageResult<GetSummary>;

    fn handle(&mut self, _msg: GetSummary, _ctx: &mut Self::Context) -> Self::Result {
        let round = self.game.round();
        MessageResult(ServerSummary {
            players: self.game.registry().len(),
            status: round.status,
            round_number: round.round_number,
            max_rounds: round.max_rounds,
        })
    }
}
