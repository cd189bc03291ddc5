//! Domain layer: pure round state, rotation, scoring and redaction rules.

pub mod redaction;
pub mod scoring;
pub mod selector;
pub mod state;

#[cfg(test)]
pub(crate) mod test_prelude;

// Re-exports for ergonomics
pub use redaction::{guess_matches, mask_word};
pub use scoring::{drawer_bonus, guess_points, ScoringRules};
pub use selector::{next_drawer, next_word};
pub use state::{PlayerId, RoundState, RoundStatus};
