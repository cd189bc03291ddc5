// WebSocket test utilities

use std::net::TcpListener;

use actix_web::{web, App, HttpServer};
use backend::config::GameConfig;
use backend::middleware::RequestLog;
use backend::routes;
use backend::state::AppState;

pub type TestServer = (
    actix_web::dev::ServerHandle,
    std::net::SocketAddr,
    tokio::task::JoinHandle<Result<(), std::io::Error>>,
);

/// Start a real HTTP server with the full route table on a random port.
///
/// The game server actor is started on the calling test's system, so each
/// test gets its own game.
pub async fn start_test_server(config: GameConfig) -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(AppState::start(config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(RequestLog)
            .configure(routes::configure)
    })
    .workers(1)
    .shutdown_timeout(0)
    .listen(listener)?
    .run();

    let server_handle = server.handle();
    let join = tokio::spawn(server);

    Ok((server_handle, addr, join))
}

pub fn ws_url(addr: std::net::SocketAddr, name: &str) -> String {
    format!("ws://{addr}/ws/{name}")
}
