use std::time::Duration;

use proptest::prelude::*;

use super::test_support::{test_config, Table};
use crate::domain::state::{PlayerId, RoundStatus};
use crate::domain::test_prelude;
use crate::protocol::events::ServerMsg;

#[derive(Debug, Clone)]
enum Step {
    Join,
    Leave(usize),
    DropConnection(usize),
    GuessRight(usize),
    GuessWrong(usize),
    Start,
    EndRound,
    TimerFires,
    NextRoundDue,
    Advance(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Join),
        1 => (0usize..8).prop_map(Step::Leave),
        1 => (0usize..8).prop_map(Step::DropConnection),
        3 => (0usize..8).prop_map(Step::GuessRight),
        1 => (0usize..8).prop_map(Step::GuessWrong),
        2 => Just(Step::Start),
        1 => Just(Step::EndRound),
        1 => Just(Step::TimerFires),
        2 => Just(Step::NextRoundDue),
        2 => (1u64..40).prop_map(Step::Advance),
    ]
}

fn pick(table: &Table, i: usize) -> Option<PlayerId> {
    let ids = table.game.registry().ids();
    if ids.is_empty() {
        None
    } else {
        Some(ids[i % ids.len()])
    }
}

fn apply(table: &mut Table, step: &Step) {
    match *step {
        Step::Join => {
            table.join();
        }
        Step::Leave(i) => {
            if let Some(id) = pick(table, i) {
                table.game.leave(&mut table.sched, id);
            }
        }
        Step::DropConnection(i) => {
            // The dead mailbox is only noticed on the next delivery.
            if let Some(id) = pick(table, i) {
                table.outbox(id).close();
                if let Some(speaker) = pick(table, i + 1) {
                    table.game.post_chat(&mut table.sched, speaker, "anyone there?");
                }
            }
        }
        Step::GuessRight(i) => {
            if let (Some(id), Some(word)) = (pick(table, i), table.game.round().current_word.clone()) {
                table.guess(id, &word);
            }
        }
        Step::GuessWrong(i) => {
            if let Some(id) = pick(table, i) {
                table.guess(id, "zzz not a word");
            }
        }
        Step::Start => {
            let _ = table.game.start_round(&mut table.sched);
        }
        Step::EndRound => {
            table.game.end_round(&mut table.sched);
        }
        Step::TimerFires => {
            if let Some((round, _)) = table.sched.round_timer.take() {
                table.game.on_round_timeout(&mut table.sched, round);
            }
        }
        Step::NextRoundDue => {
            if table.sched.next_round.take().is_some() {
                table.game.on_next_round_due(&mut table.sched);
            }
        }
        Step::Advance(secs) => {
            table.clock.advance(Duration::from_secs(secs));
            table.game.tick(&mut table.sched);
        }
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Round bookkeeping stays consistent under any interleaving of joins,
    /// departures, guesses and timer callbacks.
    #[test]
    fn prop_round_state_stays_consistent(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..60),
    ) {
        let mut table = Table::seeded(test_config(), 3, seed);
        let max_rounds = table.game.round().max_rounds;
        let mut last_round = 0;

        for step in &steps {
            apply(&mut table, step);

            let round = table.game.round();
            let live = table.game.registry().ids();

            for id in &round.players_who_guessed {
                prop_assert!(live.contains(id), "guesser {id} is not live after {step:?}");
            }
            if let Some(drawer) = round.current_drawer {
                prop_assert!(!round.players_who_guessed.contains(&drawer));
            }
            if round.status != RoundStatus::Waiting {
                prop_assert!(
                    round.current_drawer.map_or(true, |d| live.contains(&d)),
                    "departed drawer still current in {:?} after {step:?}",
                    round.status
                );
            }
            if round.status == RoundStatus::Drawing {
                let drawer = round.current_drawer;
                prop_assert!(drawer.is_some_and(|d| live.contains(&d)), "drawer gone while drawing");
                prop_assert!(round.current_word.is_some());
                prop_assert!(table.sched.round_timer.is_some() || matches!(step, Step::TimerFires));
            }
            if round.status == RoundStatus::GameOver {
                prop_assert!(table.sched.next_round.is_none());
                prop_assert!(round.current_word.is_none());
            }
            prop_assert!(round.round_number <= max_rounds);
            prop_assert!(round.round_number >= last_round);
            last_round = round.round_number;
        }
    }

    /// A round never announces its results twice.
    #[test]
    fn prop_each_round_ends_once(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..60),
    ) {
        let mut table = Table::seeded(test_config(), 3, seed);
        let observer = table.seats[0].id;

        for step in &steps {
            apply(&mut table, step);
        }

        // The observer may have been dropped; what they received still counts.
        let ends: Vec<u32> = table
            .outbox(observer)
            .messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMsg::RoundEnd { round_number, .. } => Some(round_number),
                _ => None,
            })
            .collect();
        let mut deduped = ends.clone();
        deduped.dedup();
        prop_assert_eq!(ends, deduped);
    }
}
