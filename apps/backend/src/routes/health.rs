use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::state::RoundStatus;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::server::GetSummary;

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("Pictionary backend is running"))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    time: String,
    players: usize,
    game_status: RoundStatus,
    round_number: u32,
    max_rounds: u32,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let summary = app_state.game_server.send(GetSummary).await?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        time,
        players: summary.players,
        game_status: summary.status,
        round_number: summary.round_number,
        max_rounds: summary.max_rounds,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
