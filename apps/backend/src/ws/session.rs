use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};

use crate::domain::state::PlayerId;
use crate::protocol::events::{ClientMsg, ErrorCode, ServerMsg};
use crate::state::app_state::AppState;
use crate::ws::server::{Connect, Disconnect, GameServer, Inbound, Outbound};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Start a session for an already validated display name.
pub fn upgrade(
    req: &HttpRequest,
    stream: web::Payload,
    app_state: &AppState,
    name: String,
) -> Result<HttpResponse, Error> {
    let session = PlayerSession::new(PlayerId::generate(), name, app_state.game_server.clone());
    ws::start(session, req, stream)
}

/// One websocket connection. Owns nothing but its identity; all game state
/// lives in the [`GameServer`].
pub struct PlayerSession {
    id: PlayerId,
    name: String,
    server: Addr<GameServer>,
    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,
}

impl PlayerSession {
    fn new(id: PlayerId, name: String, server: Addr<GameServer>) -> Self {
        Self {
            id,
            name,
            server,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(player_id = %actor.id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::from_str::<ClientMsg>(text) {
            Ok(msg) => self.server.do_send(Inbound { id: self.id, msg }),
            Err(err) => {
                warn!(player_id = %self.id, error = %err, "[WS SESSION] malformed message");
                Self::send_error(ctx, ErrorCode::BadRequest, "Malformed message");
            }
        }
    }
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(player_id = %self.id, name = %self.name, "[WS SESSION] started");
        self.start_heartbeat(ctx);

        let connect = Connect {
            id: self.id,
            name: self.name.clone(),
            addr: ctx.address().recipient(),
        };
        // Hold inbound frames until the server has registered us.
        self.server
            .send(connect)
            .into_actor(self)
            .map(|res, actor, ctx| match res {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(player_id = %actor.id, error = %err, "[WS SESSION] join refused");
                    ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
                    ctx.stop();
                }
                Err(err) => {
                    warn!(player_id = %actor.id, error = %err, "[WS SESSION] game server unavailable");
                    ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                    ctx.stop();
                }
            })
            .wait(ctx);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        if let Some(handle) = self.heartbeat_handle.take() {
            ctx.cancel_future(handle);
        }
        self.server.do_send(Disconnect { id: self.id });
        info!(player_id = %self.id, "[WS SESSION] stopped");
    }
}

impl Handler<Outbound> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::UnsupportedFrame, "Binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(player_id = %self.id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
