use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every HTTP and websocket route.
///
/// `main.rs` wraps these with CORS and request logging; integration tests
/// mount them the same way.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.configure(health::configure_routes);
    cfg.configure(realtime::configure_routes);
}
