//! What non-drawers are allowed to see of the secret word.

/// Placeholder shown in place of each hidden character.
pub const MASK_CHAR: char = '_';

/// Replace every non-space character with [`MASK_CHAR`], keeping word
/// boundaries visible. The result has as many characters as `word`.
pub fn mask_word(word: &str) -> String {
    word.chars()
        .map(|c| if c == ' ' { ' ' } else { MASK_CHAR })
        .collect()
}

/// Case-insensitive, whitespace-trimmed exact match.
pub fn guess_matches(word: &str, guess: &str) -> bool {
    let guess = guess.trim();
    !guess.is_empty() && guess.to_lowercase() == word.trim().to_lowercase()
}
