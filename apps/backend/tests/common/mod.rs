#![allow(dead_code)]

// tests/common/mod.rs
use std::time::Duration;

use backend::config::GameConfig;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Long rounds so only the test drives transitions; short pause between
/// rounds.
pub fn test_game_config() -> GameConfig {
    GameConfig {
        round_duration: Duration::from_secs(60),
        max_rounds: 3,
        inter_round_delay: Duration::from_secs(1),
        time_update_interval: Duration::from_secs(1),
        words: vec!["giraffe".to_string()],
        ..GameConfig::default()
    }
}
