pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod middleware;
pub mod protocol;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

pub use error::AppError;
pub use errors::GameError;
pub use middleware::cors::cors_middleware;
pub use middleware::request_log::RequestLog;
pub use state::app_state::AppState;
pub use ws::server::GameServer;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
