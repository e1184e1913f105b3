//! Player variants and their move-choice capabilities
//!
//! A player is one type; the difference between the interactive and the
//! automated contestant is which capability it was constructed with.

use crate::catalog::{MoveCatalog, MoveId};
use tracing::debug;

/// External collaborator supplying candidate symbols for an interactive player
///
/// `request_symbol` is re-invoked until the returned string matches a
/// catalog symbol (trimmed, case-insensitive). Invalid candidates are
/// reported back through `reject_symbol` and retried, never escalated.
pub trait MoveSource {
    /// Ask for the next candidate symbol string
    fn request_symbol(&mut self) -> String;

    /// Retry signal: the previous candidate matched no catalog symbol
    fn reject_symbol(&mut self, _raw: &str) {}
}

/// Injected uniform-random-choice capability for an automated player
///
/// Must return an index in `[0, len)`; `len` is the catalog size and is
/// never zero. Swappable with a scripted implementation for tests.
pub trait MovePicker {
    fn pick_uniform(&mut self, len: usize) -> usize;
}

/// Move-choice strategy, selected once at construction
pub enum Chooser {
    Interactive(Box<dyn MoveSource>),
    Automated(Box<dyn MovePicker>),
}

/// A contestant: fixed name, monotone score, one move per round
pub struct Player {
    name: String,
    score: u32,
    chooser: Chooser,
}

impl Player {
    /// A player whose moves come from an external symbol source
    pub fn interactive(name: impl Into<String>, source: Box<dyn MoveSource>) -> Self {
        Self::with_chooser(name, Chooser::Interactive(source))
    }

    /// A player whose moves are sampled uniformly from the catalog
    pub fn automated(name: impl Into<String>, picker: Box<dyn MovePicker>) -> Self {
        Self::with_chooser(name, Chooser::Automated(picker))
    }

    fn with_chooser(name: impl Into<String>, chooser: Chooser) -> Self {
        let name = name.into().trim().to_string();
        debug_assert!(!name.is_empty(), "player name must be non-empty");
        Self {
            name,
            score: 0,
            chooser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Award one round win. The score only ever moves up by one.
    pub(crate) fn increment_score(&mut self) {
        self.score += 1;
    }

    /// Produce this round's move, validated against the catalog
    ///
    /// Interactive players loop over their source until a candidate
    /// parses; automated players delegate to the injected picker.
    pub fn choose_move(&mut self, catalog: &MoveCatalog) -> MoveId {
        match &mut self.chooser {
            Chooser::Interactive(source) => loop {
                let raw = source.request_symbol();
                match catalog.parse_symbol(&raw) {
                    Some(id) => break id,
                    None => {
                        debug!(player = %self.name, input = %raw.trim(), "rejected move symbol");
                        source.reject_symbol(&raw);
                    }
                }
            },
            Chooser::Automated(picker) => catalog.id_at(picker.pick_uniform(catalog.len())),
        }
    }
}
