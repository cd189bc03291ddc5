use std::sync::Arc;

use actix::{Actor, Addr};

use crate::config::game::GameConfig;
use crate::ws::server::GameServer;

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The one game this process hosts.
    pub game_server: Addr<GameServer>,
    pub config: Arc<GameConfig>,
}

impl AppState {
    pub fn new(game_server: Addr<GameServer>, config: GameConfig) -> Self {
        Self {
            game_server,
            config: Arc::new(config),
        }
    }

    /// Start the game server actor on the current arbiter.
    ///
    /// Must be called from within a running actix system.
    pub fn start(config: GameConfig) -> Self {
        let game_server = GameServer::new(config.clone()).start();
        Self::new(game_server, config)
    }
}
