use lotofacil_data::models::{PICK_COUNT, POOL_SIZE};

use crate::config::ScoreWeights;
use crate::encoding::OccurrenceMatrix;
use crate::rules::AssociationRule;

/// One raw value per number, index `n - 1`.
pub type Signal = [f64; POOL_SIZE];

/// Appearance rate of each number over the whole history.
pub fn base_frequency(matrix: &OccurrenceMatrix) -> Signal {
    let mut signal = [0.0; POOL_SIZE];
    for (i, f) in matrix.column_frequencies().iter().enumerate() {
        signal[i] = *f;
    }
    signal
}

/// Sum of `confidence * support` over every rule mentioning the number, on
/// either side. The full contribution goes to each side.
pub fn rule_strength(rules: &[AssociationRule]) -> Signal {
    let mut signal = [0.0; POOL_SIZE];
    for rule in rules {
        let contribution = rule.confidence * rule.support;
        for n in rule.numbers() {
            signal[(n - 1) as usize] += contribution;
        }
    }
    signal
}

/// Appearance rate over the last `window` rows; shorter histories use every row.
pub fn recent_trend(matrix: &OccurrenceMatrix, window: usize) -> Signal {
    base_frequency(&matrix.tail(window))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredNumber {
    pub number: u8,
    /// Weighted contributions of each signal.
    pub frequency: f64,
    pub rules: f64,
    pub recent: f64,
}

impl ScoredNumber {
    pub fn total(&self) -> f64 {
        self.frequency + self.rules + self.recent
    }
}

/// Running per-number totals. Each signal is added once with its weight, then
/// `recommend` freezes the result.
#[derive(Debug, Clone)]
pub struct NumberScores {
    entries: Vec<ScoredNumber>,
}

impl Default for NumberScores {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberScores {
    pub fn new() -> Self {
        let entries = (1..=POOL_SIZE as u8)
            .map(|number| ScoredNumber { number, frequency: 0.0, rules: 0.0, recent: 0.0 })
            .collect();
        Self { entries }
    }

    pub fn add_frequency(mut self, signal: &Signal, weight: f64) -> Self {
        for (entry, value) in self.entries.iter_mut().zip(signal) {
            entry.frequency += weight * value;
        }
        self
    }

    pub fn add_rules(mut self, signal: &Signal, weight: f64) -> Self {
        for (entry, value) in self.entries.iter_mut().zip(signal) {
            entry.rules += weight * value;
        }
        self
    }

    pub fn add_recent(mut self, signal: &Signal, weight: f64) -> Self {
        for (entry, value) in self.entries.iter_mut().zip(signal) {
            entry.recent += weight * value;
        }
        self
    }

    pub fn get(&self, number: u8) -> Option<&ScoredNumber> {
        self.entries.get((number as usize).checked_sub(1)?)
    }

    /// Keep the `count` best numbers. Equal totals are ordered by ascending number.
    pub fn recommend(self, count: usize) -> Recommendation {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            b.total()
                .total_cmp(&a.total())
                .then_with(|| a.number.cmp(&b.number))
        });
        ranked.truncate(count);
        Recommendation { picks: ranked, scores: self.entries }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Best numbers, highest total first.
    pub picks: Vec<ScoredNumber>,
    /// Every number 1..=25 in order.
    pub scores: Vec<ScoredNumber>,
}

impl Recommendation {
    pub fn numbers(&self) -> Vec<u8> {
        self.picks.iter().map(|p| p.number).collect()
    }

    pub fn sorted_numbers(&self) -> Vec<u8> {
        let mut numbers = self.numbers();
        numbers.sort_unstable();
        numbers
    }

    pub fn score_of(&self, number: u8) -> Option<f64> {
        self.scores.iter().find(|s| s.number == number).map(ScoredNumber::total)
    }
}

pub fn score(
    matrix: &OccurrenceMatrix,
    rules: &[AssociationRule],
    weights: &ScoreWeights,
    recent_window: usize,
) -> Recommendation {
    NumberScores::new()
        .add_frequency(&base_frequency(matrix), weights.frequency)
        .add_rules(&rule_strength(rules), weights.rules)
        .add_recent(&recent_trend(matrix, recent_window), weights.recent)
        .recommend(PICK_COUNT)
}
