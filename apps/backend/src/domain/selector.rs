//! Drawer and word rotation.
//!
//! Both pickers draw uniformly from the entries not yet used in the current
//! cycle and reset their history once every entry has been used, so the
//! history never outgrows the list it tracks.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::state::PlayerId;

/// Pick the next drawer among `live` participants.
///
/// History entries for participants that are no longer live are pruned.
/// Returns `None` when nobody is connected.
pub fn next_drawer<R: Rng + ?Sized>(
    live: &[PlayerId],
    history: &mut Vec<PlayerId>,
    rng: &mut R,
) -> Option<PlayerId> {
    if live.is_empty() {
        return None;
    }

    history.retain(|id| live.contains(id));

    let mut candidates: Vec<PlayerId> = live
        .iter()
        .copied()
        .filter(|id| !history.contains(id))
        .collect();
    if candidates.is_empty() {
        history.clear();
        candidates = live.to_vec();
    }

    let pick = *candidates.choose(rng)?;
    history.push(pick);
    Some(pick)
}

/// Pick the next secret word. Returns `None` only for an empty word list.
pub fn next_word<R: Rng + ?Sized>(
    words: &[String],
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Option<String> {
    if words.is_empty() {
        return None;
    }

    let mut candidates: Vec<&String> = words.iter().filter(|w| !used.contains(*w)).collect();
    if candidates.is_empty() {
        used.clear();
        candidates = words.iter().collect();
    }

    let pick = (*candidates.choose(rng)?).clone();
    used.insert(pick.clone());
    Some(pick)
}
