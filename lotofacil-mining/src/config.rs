use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MiningError, MiningResult};

/// Weights of the three additive signals of the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub frequency: f64,
    pub rules: f64,
    pub recent: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            frequency: 0.3,
            rules: 0.4,
            recent: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub min_support: f64,
    pub min_confidence: f64,
    pub max_itemset_size: usize,
    pub recent_window: usize,
    pub weights: ScoreWeights,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.25,
            min_confidence: 0.45,
            max_itemset_size: 6,
            recent_window: 10,
            weights: ScoreWeights::default(),
        }
    }
}

fn check_fraction(parameter: &'static str, value: f64) -> MiningResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::config(parameter, format!("{value} hors de ]0, 1]")))
    }
}

fn check_weight(parameter: &'static str, value: f64) -> MiningResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MiningError::config(parameter, format!("poids {value} négatif ou non fini")))
    }
}

impl MiningConfig {
    pub fn validate(&self) -> MiningResult<()> {
        check_fraction("min_support", self.min_support)?;
        check_fraction("min_confidence", self.min_confidence)?;
        if self.max_itemset_size < 1 {
            return Err(MiningError::config("max_itemset_size", "doit valoir au moins 1"));
        }
        if self.recent_window < 1 {
            return Err(MiningError::config("recent_window", "doit valoir au moins 1"));
        }
        check_weight("weights.frequency", self.weights.frequency)?;
        check_weight("weights.rules", self.weights.rules)?;
        check_weight("weights.recent", self.weights.recent)?;
        if self.weights.frequency + self.weights.rules + self.weights.recent == 0.0 {
            return Err(MiningError::config("weights", "tous les poids sont nuls"));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<MiningConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: MiningConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    Ok(config)
}

pub fn save_config(config: &MiningConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MiningConfig::default();
        assert!((config.min_support - 0.25).abs() < 1e-10);
        assert!((config.min_confidence - 0.45).abs() < 1e-10);
        assert_eq!(config.max_itemset_size, 6);
        assert_eq!(config.recent_window, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.frequency + w.rules + w.recent - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_support_out_of_range() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let config = MiningConfig { min_support: bad, ..Default::default() };
            match config.validate() {
                Err(MiningError::Configuration { parameter, .. }) => assert_eq!(parameter, "min_support"),
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_support_of_one_is_allowed() {
        let config = MiningConfig { min_support: 1.0, min_confidence: 1.0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_confidence_out_of_range() {
        let config = MiningConfig { min_confidence: 0.0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(MiningError::Configuration { parameter: "min_confidence", .. })
        ));
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let config = MiningConfig { max_itemset_size: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(MiningError::Configuration { parameter: "max_itemset_size", .. })
        ));
        let config = MiningConfig { recent_window: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(MiningError::Configuration { parameter: "recent_window", .. })
        ));
    }

    #[test]
    fn test_bad_weights_rejected() {
        let config = MiningConfig {
            weights: ScoreWeights { frequency: -0.1, rules: 0.4, recent: 0.3 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = MiningConfig {
            weights: ScoreWeights { frequency: 0.0, rules: 0.0, recent: 0.0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = MiningConfig { min_support: 0.3, recent_window: 20, ..Default::default() };
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MiningConfig = serde_json::from_str(r#"{"min_support": 0.5}"#).unwrap();
        assert!((config.min_support - 0.5).abs() < 1e-10);
        assert_eq!(config.max_itemset_size, 6);
        assert_eq!(config.weights, ScoreWeights::default());
    }
}
