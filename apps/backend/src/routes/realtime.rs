use actix_web::{web, Error, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::session;

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 32;

/// Trim a requested display name and cap its length.
pub fn normalize_player_name(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_PLAYER_NAME",
            "Player name must not be empty",
        ));
    }
    Ok(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

async fn connect(
    req: HttpRequest,
    stream: web::Payload,
    player_name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let name = normalize_player_name(&player_name)?;
    session::upgrade(&req, stream, &app_state, name)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws/{player_name}", web::get().to(connect));
}
