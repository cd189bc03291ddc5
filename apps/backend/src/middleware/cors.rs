use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Origins used when `CORS_ALLOWED_ORIGINS` yields nothing usable.
const DEV_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

/// Parse a comma-separated origin list, keeping only http(s) origins.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

/// CORS for the browser client: configured origins (or the local dev
/// servers), GET only.
pub fn cors_middleware() -> Cors {
    let configured = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    let origins = if configured.is_empty() {
        DEV_ORIGINS.iter().map(|o| o.to_string()).collect()
    } else {
        configured
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::HeaderName::from_static("x-trace-id"),
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
