pub mod analyzer;
pub mod apriori;
pub mod config;
pub mod encoding;
pub mod error;
pub mod patterns;
pub mod rules;
pub mod scoring;

pub use analyzer::{Analysis, Analyzer, MinedPatterns, PatternMiner};
pub use config::{MiningConfig, ScoreWeights};
pub use error::MiningError;
