//! Match logic for Showdown
//!
//! Core game logic for turn-based, best-of-N duels over a configurable
//! move-symbol set related by a "defeats" relation (rock/paper/scissors
//! and its 5-symbol lizard/spock extension). The crate owns the symbol
//! catalog, the round resolver, the two player variants, the append-only
//! match ledger, and the controlling state machine. It performs no I/O
//! and carries no message text; hosts plug in move sources, random
//! pickers, and a presenter.

mod catalog;
mod game;
mod history;
mod player;
mod random;

pub use catalog::{CatalogError, MoveCatalog, MoveId, MAX_SYMBOLS};
pub use game::{
    MatchConfig, MatchController, MatchPhase, MatchSummary, PlayerSlot, Presenter,
};
pub use history::{outcome_label, MatchHistory, MatchRecord};
pub use player::{Chooser, MovePicker, MoveSource, Player};
pub use random::SeededRng;

use serde::{Deserialize, Serialize};

/// Outcome of a single resolved round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    FirstWins,
    SecondWins,
    Tie,
}

/// Resolve one round from the two chosen moves
///
/// Pure and deterministic: tie iff the symbols are equal, otherwise the
/// catalog's defeats relation decides. Both ids must come from `catalog`.
pub fn resolve(first: MoveId, second: MoveId, catalog: &MoveCatalog) -> RoundOutcome {
    if first == second {
        RoundOutcome::Tie
    } else if catalog.defeats(first, second) {
        RoundOutcome::FirstWins
    } else {
        RoundOutcome::SecondWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_symbol_is_tie() {
        let catalog = MoveCatalog::lizard_spock();
        for id in catalog.ids() {
            assert_eq!(resolve(id, id, &catalog), RoundOutcome::Tie);
        }
    }

    #[test]
    fn test_classic_resolution_table() {
        let catalog = MoveCatalog::classic();
        let id = |s: &str| catalog.parse_symbol(s).unwrap();

        assert_eq!(
            resolve(id("rock"), id("scissors"), &catalog),
            RoundOutcome::FirstWins
        );
        assert_eq!(
            resolve(id("scissors"), id("paper"), &catalog),
            RoundOutcome::FirstWins
        );
        assert_eq!(
            resolve(id("paper"), id("rock"), &catalog),
            RoundOutcome::FirstWins
        );
        assert_eq!(
            resolve(id("scissors"), id("rock"), &catalog),
            RoundOutcome::SecondWins
        );
        assert_eq!(
            resolve(id("rock"), id("paper"), &catalog),
            RoundOutcome::SecondWins
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let catalog = MoveCatalog::classic();
        let rock = catalog.parse_symbol("rock").unwrap();
        let paper = catalog.parse_symbol("paper").unwrap();

        for _ in 0..10 {
            assert_eq!(resolve(rock, paper, &catalog), RoundOutcome::SecondWins);
        }
    }

    #[test]
    fn test_classic_outcome_census() {
        // 3 first-wins, 3 second-wins, 3 ties over the 9 combinations
        let catalog = MoveCatalog::classic();
        let mut first = 0;
        let mut second = 0;
        let mut ties = 0;

        for a in catalog.ids() {
            for b in catalog.ids() {
                match resolve(a, b, &catalog) {
                    RoundOutcome::FirstWins => first += 1,
                    RoundOutcome::SecondWins => second += 1,
                    RoundOutcome::Tie => ties += 1,
                }
            }
        }

        assert_eq!((first, second, ties), (3, 3, 3));
    }

    proptest! {
        #[test]
        fn prop_outcomes_are_strict_inverses(a in 0usize..5, b in 0usize..5) {
            let catalog = MoveCatalog::lizard_spock();
            let (a, b) = (catalog.id_at(a), catalog.id_at(b));

            match resolve(a, b, &catalog) {
                RoundOutcome::Tie => {
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(resolve(b, a, &catalog), RoundOutcome::Tie);
                }
                RoundOutcome::FirstWins => {
                    prop_assert_eq!(resolve(b, a, &catalog), RoundOutcome::SecondWins);
                }
                RoundOutcome::SecondWins => {
                    prop_assert_eq!(resolve(b, a, &catalog), RoundOutcome::FirstWins);
                }
            }
        }

        #[test]
        fn prop_distinct_symbols_never_tie(a in 0usize..3, b in 0usize..3) {
            let catalog = MoveCatalog::classic();
            prop_assume!(a != b);
            let outcome = resolve(catalog.id_at(a), catalog.id_at(b), &catalog);
            prop_assert_ne!(outcome, RoundOutcome::Tie);
        }
    }
}
