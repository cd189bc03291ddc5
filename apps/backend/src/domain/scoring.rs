use std::time::Duration;

/// Point values awarded for guesses and drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// Flat award for any correct guess.
    pub base_points: u32,
    /// Bonus for a guess at the very start of the round; scales linearly to 0.
    pub max_bonus: u32,
    /// Drawer award per correct guesser when the round ends.
    pub drawer_points_per_guesser: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base_points: 50,
            max_bonus: 50,
            drawer_points_per_guesser: 10,
        }
    }
}

/// Points for a correct guess made `elapsed` into a round of `round_duration`.
///
/// `base + floor(remaining / duration * max_bonus)`, computed in whole
/// milliseconds.
pub fn guess_points(rules: &ScoringRules, round_duration: Duration, elapsed: Duration) -> u32 {
    let total_ms = round_duration.as_millis();
    if total_ms == 0 {
        return rules.base_points;
    }
    let remaining_ms = round_duration.saturating_sub(elapsed).as_millis();
    let bonus = remaining_ms * u128::from(rules.max_bonus) / total_ms;
    rules
        .base_points
        .saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX))
}

/// Drawer award at round end.
pub fn drawer_bonus(rules: &ScoringRules, correct_guessers: usize) -> u32 {
    let guessers = u32::try_from(correct_guessers).unwrap_or(u32::MAX);
    rules.drawer_points_per_guesser.saturating_mul(guessers)
}
