//! Aggregate statistics over a batch of simulation summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::summary::{RunOutcome, SimulationSummary};
use crate::heuristics::is_mana_card;

/// Earliest turn the combo can win on.
pub const MIN_WIN_TURN: u32 = 1;

/// Aggregate statistics of a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub games: usize,
    pub wins_by_turn: BTreeMap<u32, usize>,
    /// Wins by turn, split by interaction cards seen: `(turn, count) -> games`.
    pub interaction_by_turn: BTreeMap<(u32, u32), usize>,
    pub kept_at: BTreeMap<usize, usize>,
    /// Pseudo-mana cards in the kept opening hand of winning games.
    pub opening_mana: BTreeMap<usize, usize>,
    /// Games without a winning line (every hand size was hopeless).
    pub no_line: usize,
    pub truncated: usize,
    pub zero_cards_left: usize,
    pub scientific_wins: usize,
    pub lucky_wins: usize,
    pub lucky_by_turn: BTreeMap<u32, usize>,
    pub average_solving_ms: f64,
}

impl SimulationReport {
    /// Aggregate a batch.
    #[must_use]
    pub fn from_summaries(summaries: &[SimulationSummary]) -> Self {
        let mut report = Self {
            games: summaries.len(),
            ..Self::default()
        };
        let mut total_ms = 0.0;

        for summary in summaries {
            total_ms += summary.solving_time_ms;
            match summary.outcome {
                RunOutcome::NoLine => report.no_line += 1,
                RunOutcome::Truncated => report.truncated += 1,
                RunOutcome::Won => {}
            }
            let (Some(turn), Some(kept)) = (summary.winning_turn, summary.kept_at) else {
                continue;
            };
            *report.wins_by_turn.entry(turn).or_default() += 1;
            *report.interaction_by_turn.entry((turn, summary.interaction_count)).or_default() += 1;
            *report.kept_at.entry(kept).or_default() += 1;
            let mana = summary.initial_hand.iter().filter(|&&k| is_mana_card(k)).count();
            *report.opening_mana.entry(mana).or_default() += 1;
            if summary.cards_in_library == Some(0) {
                report.zero_cards_left += 1;
            }
            if summary.is_lucky() {
                report.lucky_wins += 1;
                *report.lucky_by_turn.entry(turn).or_default() += 1;
            } else {
                report.scientific_wins += 1;
            }
        }

        if report.games > 0 {
            report.average_solving_ms = total_ms / report.games as f64;
        }
        report
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.wins_by_turn.values().sum()
    }

    /// Wins on or before `turn`.
    #[must_use]
    pub fn wins_by(&self, turn: u32) -> usize {
        self.wins_by_turn.range(..=turn).map(|(_, n)| n).sum()
    }

    /// Share of all games, in percent.
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.games as f64
        }
    }

    fn last_turn(&self) -> u32 {
        self.wins_by_turn.keys().next_back().copied().unwrap_or(MIN_WIN_TURN)
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last = self.last_turn();
        for turn in MIN_WIN_TURN..=last {
            let won = self.wins_by_turn.get(&turn).copied().unwrap_or(0);
            writeln!(f, "Games won at turn {turn}: {won} ({:.2}%)", self.percent(won))?;
            let split: Vec<String> = self
                .interaction_by_turn
                .range((turn, 0)..=(turn, u32::MAX))
                .map(|(&(_, x), &n)| format!("x={x}: {n} ({:.2}%)", self.percent(n)))
                .collect();
            if !split.is_empty() {
                writeln!(f, " L with x interactions: {}", split.join(", "))?;
            }
        }
        for turn in MIN_WIN_TURN..=last {
            let won = self.wins_by(turn);
            writeln!(f, "Games won by turn <= {turn}: {won} ({:.2}%)", self.percent(won))?;
        }

        writeln!(f)?;
        for (size, n) in self.kept_at.iter().rev() {
            writeln!(f, "Hands kept at {size}: {n} ({:.2}%)", self.percent(*n))?;
        }
        for (mana, n) in &self.opening_mana {
            writeln!(f, "T1 (pseudo-)mana {mana}: {n} ({:.2}%)", self.percent(*n))?;
        }

        writeln!(f)?;
        let wins = self.wins();
        writeln!(f, "0 cards left in library: {} ({:.2}%)", self.zero_cards_left, self.percent(self.zero_cards_left))?;
        let some_left = wins - self.zero_cards_left;
        writeln!(f, "1+ cards left in library: {some_left} ({:.2}%)", self.percent(some_left))?;

        writeln!(f)?;
        writeln!(f, "Scientific wins: {} ({:.2}%)", self.scientific_wins, self.percent(self.scientific_wins))?;
        writeln!(f, "Lucky wins (1+ land in deck): {} ({:.2}%)", self.lucky_wins, self.percent(self.lucky_wins))?;
        for (turn, n) in &self.lucky_by_turn {
            writeln!(f, " L on turn {turn}: {n} ({:.2}%)", self.percent(*n))?;
        }
        writeln!(f, "No winning line: {} ({:.2}%)", self.no_line, self.percent(self.no_line))?;
        if self.truncated > 0 {
            writeln!(f, "Truncated: {} ({:.2}%)", self.truncated, self.percent(self.truncated))?;
        }

        writeln!(f)?;
        writeln!(f, "Average solving time: {:.2} ms", self.average_solving_ms)
    }
}

/// Win probability by turn when mulliganing whenever a hand size has no
/// winning line, from one report per fixed kept hand size.
///
/// For each turn, sums over hand sizes from largest to smallest the chance
/// of reaching that size times the chance of winning on that turn with it.
/// The last entry (`up_to_turn + 1`) holds the probability of winning later
/// or never.
#[must_use]
pub fn win_probability_by_turn(by_hand_size: &BTreeMap<usize, SimulationReport>, up_to_turn: u32) -> Vec<(u32, f64)> {
    let mut out = Vec::new();
    let mut remaining = 1.0;
    for turn in MIN_WIN_TURN..=up_to_turn {
        let mut p_reach = 1.0;
        let mut p_win = 0.0;
        for report in by_hand_size.values().rev() {
            if report.games == 0 {
                continue;
            }
            let won = report.wins_by_turn.get(&turn).copied().unwrap_or(0);
            p_win += p_reach * won as f64 / report.games as f64;
            let p_keep = (report.games - report.no_line) as f64 / report.games as f64;
            p_reach *= 1.0 - p_keep;
        }
        remaining -= p_win;
        out.push((turn, p_win));
    }
    out.push((up_to_turn + 1, remaining));
    out
}
