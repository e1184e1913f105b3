//! Append-only match ledger and its tabular report

use crate::catalog::{MoveCatalog, MoveId};
use crate::RoundOutcome;
use serde::{Deserialize, Serialize};

/// One resolved round: never mutated, never removed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based round number
    pub round: u32,
    pub first: MoveId,
    pub second: MoveId,
    pub outcome: RoundOutcome,
}

/// Ordered ledger of every round played so far
///
/// Records are numbered 1..N with no gaps; numbering is assigned at
/// append time so it cannot drift from the ledger length.
#[derive(Clone, Debug, Default)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Append the next round. The round number is the ledger's current
    /// length plus one.
    pub(crate) fn record(
        &mut self,
        first: MoveId,
        second: MoveId,
        outcome: RoundOutcome,
    ) -> MatchRecord {
        let record = MatchRecord {
            round: self.records.len() as u32 + 1,
            first,
            second,
            outcome,
        };
        self.records.push(record);
        record
    }

    /// Render the end-of-game table
    ///
    /// Pure formatting over the ledger: a centered title, a four-column
    /// header, one row per record, horizontal rules sized per column.
    /// Calling it twice on an unchanged ledger gives identical output.
    pub fn render(&self, catalog: &MoveCatalog, first_name: &str, second_name: &str) -> String {
        let headers = ["Round", first_name, second_name, "Outcome"];
        let rows: Vec<[String; 4]> = self
            .records
            .iter()
            .map(|r| {
                [
                    r.round.to_string(),
                    catalog.label(r.first).to_string(),
                    catalog.label(r.second).to_string(),
                    outcome_label(r.outcome).to_string(),
                ]
            })
            .collect();

        let mut widths: [usize; 4] = [0; 4];
        for (width, header) in widths.iter_mut().zip(headers) {
            *width = header.len();
        }
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let rule = widths
            .iter()
            .fold(String::from("+"), |acc, w| acc + &"-".repeat(w + 2) + "+");

        let format_row = |cells: [&str; 4]| {
            let mut line = String::from("|");
            for (cell, width) in cells.iter().zip(widths) {
                line.push_str(&format!(" {:<width$} |", cell, width = width));
            }
            line
        };

        let title = "Match History";
        let mut out = String::new();
        out.push_str(&format!("{:^width$}\n", title, width = rule.len()));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format_row(headers));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        for row in &rows {
            out.push_str(&format_row([&row[0], &row[1], &row[2], &row[3]]));
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

/// Fixed display label for a round outcome
pub fn outcome_label(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::FirstWins => "first wins",
        RoundOutcome::SecondWins => "second wins",
        RoundOutcome::Tie => "tie",
    }
}
