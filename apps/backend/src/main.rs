use actix_web::{web, App, HttpServer};
use backend::config::{GameConfig, ServerConfig};
use backend::middleware::{cors_middleware, RequestLog};
use backend::routes;
use backend::state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };
    let game_config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };

    info!(
        host = %server_config.host,
        port = server_config.port,
        round_duration_secs = game_config.round_duration.as_secs(),
        max_rounds = game_config.max_rounds,
        "Starting Pictionary backend"
    );

    let data = web::Data::new(AppState::start(game_config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
