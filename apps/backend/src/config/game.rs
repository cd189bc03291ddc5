use std::collections::HashSet;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::scoring::ScoringRules;
use crate::error::AppError;

pub const DEFAULT_WORDS: &[&str] = &[
    "apple", "banana", "car", "dog", "house", "tree", "computer", "book",
];

/// Tunables for a single game instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub round_duration: Duration,
    pub max_rounds: u32,
    /// Pause between a round's results and the next automatic round.
    pub inter_round_delay: Duration,
    /// Cadence of `time_update` broadcasts while drawing.
    pub time_update_interval: Duration,
    pub scoring: ScoringRules,
    pub words: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration: Duration::from_secs(60),
            max_rounds: 5,
            inter_round_delay: Duration::from_secs(5),
            time_update_interval: Duration::from_secs(1),
            scoring: ScoringRules::default(),
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl GameConfig {
    /// Build a config from environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let words = match env::var("WORD_LIST") {
            Ok(raw) => parse_word_list(&raw),
            Err(_) => defaults.words,
        };

        let config = Self {
            round_duration: secs_var("ROUND_DURATION_SECS", defaults.round_duration)?,
            max_rounds: parsed_var("MAX_ROUNDS", defaults.max_rounds)?,
            inter_round_delay: secs_var("INTER_ROUND_DELAY_SECS", defaults.inter_round_delay)?,
            time_update_interval: secs_var(
                "TIME_UPDATE_INTERVAL_SECS",
                defaults.time_update_interval,
            )?,
            scoring: ScoringRules {
                base_points: parsed_var("BASE_POINTS", defaults.scoring.base_points)?,
                max_bonus: parsed_var("MAX_BONUS_POINTS", defaults.scoring.max_bonus)?,
                drawer_points_per_guesser: parsed_var(
                    "DRAWER_POINTS_PER_GUESSER",
                    defaults.scoring.drawer_points_per_guesser,
                )?,
            },
            words,
        };

        config.validate()
    }

    /// Normalize the word list and reject settings the round controller
    /// cannot run with.
    pub fn validate(mut self) -> Result<Self, AppError> {
        if self.round_duration.is_zero() {
            return Err(AppError::config("ROUND_DURATION_SECS must be greater than 0"));
        }
        if self.max_rounds == 0 {
            return Err(AppError::config("MAX_ROUNDS must be at least 1"));
        }
        if self.time_update_interval.is_zero() {
            return Err(AppError::config(
                "TIME_UPDATE_INTERVAL_SECS must be greater than 0",
            ));
        }

        self.words = dedupe_words(self.words);
        if self.words.is_empty() {
            return Err(AppError::config("WORD_LIST must contain at least one word"));
        }

        Ok(self)
    }
}

/// Split a comma-separated word list, dropping blanks.
pub fn parse_word_list(raw: &str) -> Vec<String> {
    dedupe_words(raw.split(',').map(|w| w.to_string()).collect())
}

fn dedupe_words(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .filter(|w| seen.insert(w.to_lowercase()))
        .collect()
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("{name} must be a non-negative integer, got '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}

fn secs_var(name: &str, default: Duration) -> Result<Duration, AppError> {
    parsed_var(name, default.as_secs()).map(Duration::from_secs)
}
