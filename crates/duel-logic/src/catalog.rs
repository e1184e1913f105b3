//! Move catalog and defeats-relation validation
//!
//! The catalog is built exactly once, before any round. All relation
//! consistency checks happen here; after construction it is read-only
//! and may be shared freely.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on catalog size (one bitmask row per symbol)
pub const MAX_SYMBOLS: usize = 64;

/// Compact handle for a move symbol
///
/// Indexes the catalog's declaration order. Only valid for the catalog
/// that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveId(u8);

impl MoveId {
    /// Position of this symbol in the catalog's declaration order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors detected while building a catalog
///
/// All of these are fatal: the relation table is inconsistent or
/// incomplete and the game cannot start.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog declares no symbols")]
    Empty,
    #[error("catalog declares more than {MAX_SYMBOLS} symbols")]
    TooLarge,
    #[error("duplicate symbol `{0}`")]
    DuplicateSymbol(String),
    #[error("defeats pair references undeclared symbol `{0}`")]
    UnknownSymbol(String),
    #[error("symbol `{0}` declared to defeat itself")]
    SelfDefeat(String),
    #[error("`{0}` and `{1}` are declared to defeat each other")]
    ConflictingPair(String, String),
    #[error("neither `{0}` nor `{1}` is declared to defeat the other")]
    UnresolvedPair(String, String),
}

/// The legal move symbols and the defeats relation between them
#[derive(Clone, Debug)]
pub struct MoveCatalog {
    symbols: Vec<String>,
    /// `beats[a]` has bit `b` set iff symbol `a` defeats symbol `b`
    beats: Vec<u64>,
}

impl MoveCatalog {
    /// Build a catalog from an ordered symbol list and explicit defeats pairs
    ///
    /// Symbols are normalized (trimmed, lowercased) before any check.
    /// For every pair of distinct symbols exactly one direction must be
    /// declared; anything else is a `CatalogError`.
    pub fn new(symbols: &[&str], defeats_pairs: &[(&str, &str)]) -> Result<Self, CatalogError> {
        if symbols.is_empty() {
            return Err(CatalogError::Empty);
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(CatalogError::TooLarge);
        }

        let normalized: Vec<String> = symbols.iter().map(|s| normalize(s)).collect();
        for (i, symbol) in normalized.iter().enumerate() {
            if normalized[..i].contains(symbol) {
                return Err(CatalogError::DuplicateSymbol(symbol.clone()));
            }
        }

        let mut catalog = Self {
            beats: vec![0; normalized.len()],
            symbols: normalized,
        };

        for (winner, loser) in defeats_pairs {
            let w = catalog
                .parse_symbol(winner)
                .ok_or_else(|| CatalogError::UnknownSymbol(normalize(winner)))?;
            let l = catalog
                .parse_symbol(loser)
                .ok_or_else(|| CatalogError::UnknownSymbol(normalize(loser)))?;
            if w == l {
                return Err(CatalogError::SelfDefeat(catalog.label(w).to_string()));
            }
            if catalog.defeats(l, w) {
                return Err(CatalogError::ConflictingPair(
                    catalog.label(w).to_string(),
                    catalog.label(l).to_string(),
                ));
            }
            catalog.beats[w.index()] |= 1 << l.index();
        }

        // Every distinct pair must have exactly one direction. Both
        // directions was already rejected above, so only gaps remain.
        for a in 0..catalog.symbols.len() {
            for b in (a + 1)..catalog.symbols.len() {
                let (a, b) = (MoveId(a as u8), MoveId(b as u8));
                if !catalog.defeats(a, b) && !catalog.defeats(b, a) {
                    return Err(CatalogError::UnresolvedPair(
                        catalog.label(a).to_string(),
                        catalog.label(b).to_string(),
                    ));
                }
            }
        }

        Ok(catalog)
    }

    /// The classic 3-symbol game: rock, paper, scissors
    pub fn classic() -> Self {
        Self::new(
            &["rock", "paper", "scissors"],
            &[
                ("rock", "scissors"),
                ("scissors", "paper"),
                ("paper", "rock"),
            ],
        )
        .expect("classic catalog is consistent")
    }

    /// The 5-symbol extension: rock, paper, scissors, lizard, spock
    pub fn lizard_spock() -> Self {
        Self::new(
            &["rock", "paper", "scissors", "lizard", "spock"],
            &[
                ("scissors", "paper"),
                ("scissors", "lizard"),
                ("paper", "rock"),
                ("paper", "spock"),
                ("rock", "scissors"),
                ("rock", "lizard"),
                ("lizard", "spock"),
                ("lizard", "paper"),
                ("spock", "scissors"),
                ("spock", "rock"),
            ],
        )
        .expect("lizard-spock catalog is consistent")
    }

    /// True iff `a` defeats `b` per the relation table
    pub fn defeats(&self, a: MoveId, b: MoveId) -> bool {
        self.beats[a.index()] & (1 << b.index()) != 0
    }

    /// Look up a candidate symbol string (trimmed, case-insensitive)
    pub fn parse_symbol(&self, raw: &str) -> Option<MoveId> {
        let wanted = normalize(raw);
        self.symbols
            .iter()
            .position(|s| *s == wanted)
            .map(|i| MoveId(i as u8))
    }

    /// True iff the candidate string names a catalog symbol
    pub fn contains(&self, raw: &str) -> bool {
        self.parse_symbol(raw).is_some()
    }

    /// Display label for a symbol
    pub fn label(&self, id: MoveId) -> &str {
        &self.symbols[id.index()]
    }

    /// Symbol handle at a declaration-order position
    ///
    /// Panics if `index >= self.len()`.
    pub fn id_at(&self, index: usize) -> MoveId {
        assert!(index < self.symbols.len(), "symbol index out of range");
        MoveId(index as u8)
    }

    /// Number of symbols in the catalog
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbol handles, in declaration order
    pub fn ids(&self) -> impl Iterator<Item = MoveId> + '_ {
        (0..self.symbols.len()).map(|i| MoveId(i as u8))
    }

    /// All symbol labels, in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
