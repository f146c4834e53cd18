use std::time::{Duration, Instant};

use lotofacil_data::models::Draw;

use crate::apriori::{FrequentItemsets, frequent_itemsets};
use crate::config::MiningConfig;
use crate::encoding::{OccurrenceMatrix, encode};
use crate::error::{MiningError, MiningResult};
use crate::patterns::{PatternSummary, analyze_patterns, summarize};
use crate::rules::{AssociationRule, generate_rules, top_rules};
use crate::scoring::{Recommendation, score};

#[derive(Debug, Clone)]
pub struct MinedPatterns {
    pub frequent: FrequentItemsets,
    pub rules: Vec<AssociationRule>,
}

/// Frequent itemsets and rules with the thresholds of a validated config.
pub struct PatternMiner<'a> {
    config: &'a MiningConfig,
}

impl<'a> PatternMiner<'a> {
    pub fn new(config: &'a MiningConfig) -> MiningResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn mine(&self, matrix: &OccurrenceMatrix) -> MiningResult<MinedPatterns> {
        let frequent =
            frequent_itemsets(matrix, self.config.min_support, self.config.max_itemset_size)?;
        let rules = generate_rules(&frequent, self.config.min_confidence);
        Ok(MinedPatterns { frequent, rules })
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub draw_count: usize,
    pub patterns: MinedPatterns,
    pub recommendation: Recommendation,
    pub summary: PatternSummary,
    pub elapsed: Duration,
}

impl Analysis {
    pub fn top_rules(&self, n: usize) -> Vec<&AssociationRule> {
        top_rules(&self.patterns.rules, n)
    }
}

/// Full pipeline: encode, mine, score, summarize.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: MiningConfig,
}

impl Analyzer {
    /// Fails on an invalid config, before any data is read.
    pub fn new(config: MiningConfig) -> MiningResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    pub fn analyze(&self, history: &[Draw]) -> MiningResult<Analysis> {
        let started = Instant::now();
        let matrix = encode(history)?;
        self.run(&matrix, history, started)
    }

    /// Same pipeline for an already encoded history (one-hot input).
    pub fn analyze_matrix(&self, matrix: &OccurrenceMatrix) -> MiningResult<Analysis> {
        let started = Instant::now();
        let draws = matrix.draws();
        self.run(matrix, &draws, started)
    }

    fn run(&self, matrix: &OccurrenceMatrix, history: &[Draw], started: Instant) -> MiningResult<Analysis> {
        log::info!(
            "Analyse de {} tirages (support >= {}, confiance >= {}, taille max {})",
            matrix.n_rows(),
            self.config.min_support,
            self.config.min_confidence,
            self.config.max_itemset_size
        );

        let patterns = PatternMiner::new(&self.config)?.mine(matrix)?;
        let recommendation = score(
            matrix,
            &patterns.rules,
            &self.config.weights,
            self.config.recent_window,
        );
        // `mine` already rejected an empty matrix.
        let summary = summarize(&analyze_patterns(history))
            .ok_or_else(|| MiningError::InsufficientData("aucun tirage à résumer".to_string()))?;

        let elapsed = started.elapsed();
        log::debug!("Analyse terminée en {:?}", elapsed);

        Ok(Analysis {
            draw_count: matrix.n_rows(),
            patterns,
            recommendation,
            summary,
            elapsed,
        })
    }
}
