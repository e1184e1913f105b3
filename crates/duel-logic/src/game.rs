//! Match controller: the round-driving state machine
//!
//! One controller owns one match. It is the only writer of scores and
//! of the history ledger, and it only writes after both players' moves
//! for the round are in hand.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::MoveCatalog;
use crate::history::{MatchHistory, MatchRecord};
use crate::player::Player;
use crate::{resolve, RoundOutcome};

/// Lifecycle of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    RoundInProgress,
    RoundResolved,
    GameOver,
}

/// Which contestant a result refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    First,
    Second,
}

/// Fixed-at-start match parameters
///
/// The winning score is a `NonZeroU32`, so positivity holds by type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    winning_score: NonZeroU32,
}

impl MatchConfig {
    /// `None` if `winning_score` is zero
    pub fn new(winning_score: u32) -> Option<Self> {
        NonZeroU32::new(winning_score).map(|winning_score| Self { winning_score })
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score.get()
    }
}

impl Default for MatchConfig {
    /// First to 3 wins
    fn default() -> Self {
        Self {
            winning_score: NonZeroU32::new(3).expect("3 is non-zero"),
        }
    }
}

/// Presentation seam between the controller and the host
///
/// Carries structured round data and the rendered report, never message
/// text of its own. `welcome` and `await_continue` block until the
/// external actor is ready; they are pacing devices only. All methods
/// default to no-ops so tests implement only what they observe.
pub trait Presenter {
    /// One-time handshake before the first round
    fn welcome(&mut self) {}

    /// A round has been resolved and appended to the ledger
    fn round_resolved(&mut self, _record: &MatchRecord, _scores: (u32, u32)) {}

    /// Block until the external actor is ready for the next round
    fn await_continue(&mut self) {}

    /// The rendered end-of-game history table
    fn report(&mut self, _text: &str) {}
}

/// Headless presenter
impl Presenter for () {}

/// Final accounting for a finished match
#[derive(Debug)]
pub struct MatchSummary {
    pub winner: PlayerSlot,
    pub winner_name: String,
    /// (first player, second player)
    pub final_scores: (u32, u32),
    pub rounds_played: u32,
    pub history: MatchHistory,
}

/// Drives rounds, updates scores, appends history, detects termination
pub struct MatchController<'a> {
    catalog: &'a MoveCatalog,
    config: MatchConfig,
    first: Player,
    second: Player,
    history: MatchHistory,
    phase: MatchPhase,
}

impl<'a> MatchController<'a> {
    pub fn new(catalog: &'a MoveCatalog, config: MatchConfig, first: Player, second: Player) -> Self {
        Self {
            catalog,
            config,
            first,
            second,
            history: MatchHistory::new(),
            phase: MatchPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// (first player, second player)
    pub fn scores(&self) -> (u32, u32) {
        (self.first.score(), self.second.score())
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Play the match to completion
    ///
    /// Consumes the controller: `GameOver` is terminal, no further
    /// rounds can be requested on a finished match.
    pub fn run(mut self, presenter: &mut dyn Presenter) -> MatchSummary {
        presenter.welcome();

        let winner = loop {
            let record = self.play_round();
            presenter.round_resolved(&record, self.scores());

            // Checked strictly after the increment for the round that
            // just completed; scores move by at most 1, so the winner
            // lands exactly on the threshold.
            if let Some(slot) = self.reached_threshold() {
                self.phase = MatchPhase::GameOver;
                break slot;
            }

            presenter.await_continue();
        };

        let report = self
            .history
            .render(self.catalog, self.first.name(), self.second.name());
        presenter.report(&report);

        let winner_name = match winner {
            PlayerSlot::First => self.first.name().to_string(),
            PlayerSlot::Second => self.second.name().to_string(),
        };
        let summary = MatchSummary {
            winner,
            winner_name,
            final_scores: self.scores(),
            rounds_played: self.history.len() as u32,
            history: self.history,
        };
        info!(
            winner = %summary.winner_name,
            scores = ?summary.final_scores,
            rounds = summary.rounds_played,
            "match over"
        );
        summary
    }

    /// One full round: both moves, resolution, score update, ledger append
    fn play_round(&mut self) -> MatchRecord {
        self.phase = MatchPhase::RoundInProgress;

        let first_move = self.first.choose_move(self.catalog);
        let second_move = self.second.choose_move(self.catalog);
        let outcome = resolve(first_move, second_move, self.catalog);

        match outcome {
            RoundOutcome::FirstWins => self.first.increment_score(),
            RoundOutcome::SecondWins => self.second.increment_score(),
            RoundOutcome::Tie => {}
        }

        let record = self.history.record(first_move, second_move, outcome);
        self.phase = MatchPhase::RoundResolved;
        debug!(
            round = record.round,
            first = self.catalog.label(first_move),
            second = self.catalog.label(second_move),
            outcome = ?outcome,
            scores = ?self.scores(),
            "round resolved"
        );
        record
    }

    fn reached_threshold(&self) -> Option<PlayerSlot> {
        let target = self.config.winning_score();
        if self.first.score() == target {
            Some(PlayerSlot::First)
        } else if self.second.score() == target {
            Some(PlayerSlot::Second)
        } else {
            None
        }
    }
}
