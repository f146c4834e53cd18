mod display;
mod import;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::display::{display_analysis, display_config, display_export_summary, display_summary};
use crate::import::{History, export_onehot, load_history};
use lotofacil_mining::config::{load_config, save_config};
use lotofacil_mining::encoding::encode;
use lotofacil_mining::patterns::{analyze_patterns, summarize};
use lotofacil_mining::{Analyzer, MiningConfig, ScoreWeights};

#[derive(Parser)]
#[command(name = "lotofacil", about = "Analyseur de règles d'association Lotofácil")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Seuils et poids; chaque option remplace la valeur du fichier de configuration.
#[derive(Args, Debug, Default)]
struct MiningArgs {
    /// Fichier de configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Support minimal des itemsets, dans ]0, 1]
    #[arg(long)]
    min_support: Option<f64>,

    /// Confiance minimale des règles, dans ]0, 1]
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Taille maximale des itemsets
    #[arg(long)]
    max_len: Option<usize>,

    /// Nombre de tirages récents pour la tendance
    #[arg(long)]
    recent_window: Option<usize>,

    /// Poids fréquence,règles,tendance (ex: 0.3,0.4,0.3)
    #[arg(long)]
    weights: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyser l'historique et recommander 15 numéros
    Analyze {
        /// Fichier CSV des tirages (brut ou one-hot)
        #[arg(short, long, default_value = "lotofacil_onehot.csv")]
        file: PathBuf,

        /// Nombre de règles à afficher
        #[arg(short, long, default_value = "5")]
        top: usize,

        #[command(flatten)]
        mining: MiningArgs,
    },

    /// Convertir un CSV de tirages en matrice one-hot (num_1..num_25)
    Encode {
        /// Fichier CSV des tirages
        #[arg(short, long)]
        file: PathBuf,

        /// Fichier de sortie
        #[arg(short, long, default_value = "lotofacil_onehot.csv")]
        output: PathBuf,
    },

    /// Statistiques de motifs (pairs/impairs, sommes, quadrants)
    Stats {
        /// Fichier CSV des tirages (brut ou one-hot)
        #[arg(short, long, default_value = "lotofacil_onehot.csv")]
        file: PathBuf,
    },

    /// Afficher la configuration effective
    Config {
        /// Sauvegarder la configuration dans ce fichier
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(flatten)]
        mining: MiningArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, top, mining } => cmd_analyze(&file, top, &mining),
        Command::Encode { file, output } => cmd_encode(&file, &output),
        Command::Stats { file } => cmd_stats(&file),
        Command::Config { save, mining } => cmd_config(save.as_deref(), &mining),
    }
}

fn parse_weights(raw: &str) -> Result<ScoreWeights> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .context("Format de poids invalide")?;
    if values.len() != 3 {
        bail!("3 poids attendus (fréquence,règles,tendance), {} reçus", values.len());
    }
    Ok(ScoreWeights {
        frequency: values[0],
        rules: values[1],
        recent: values[2],
    })
}

fn resolve_config(args: &MiningArgs) -> Result<MiningConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MiningConfig::default(),
    };
    if let Some(v) = args.min_support {
        config.min_support = v;
    }
    if let Some(v) = args.min_confidence {
        config.min_confidence = v;
    }
    if let Some(v) = args.max_len {
        config.max_itemset_size = v;
    }
    if let Some(v) = args.recent_window {
        config.recent_window = v;
    }
    if let Some(raw) = &args.weights {
        config.weights = parse_weights(raw)?;
    }
    Ok(config)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn window_warning(history_len: usize, recent_window: usize) -> Option<String> {
    (history_len < recent_window).then(|| {
        format!(
            "Historique de {} tirages, plus court que la fenêtre récente ({}) : tendance sur tout l'historique",
            history_len, recent_window
        )
    })
}

fn cmd_analyze(file: &Path, top: usize, args: &MiningArgs) -> Result<()> {
    let analyzer = Analyzer::new(resolve_config(args)?)?;
    log::debug!("Configuration : {:?}", analyzer.config());

    println!("Chargement de {}...", file.display());
    let history = load_history(file)?;
    println!("{} tirages chargés", history.len());
    if let Some(warning) = window_warning(history.len(), analyzer.config().recent_window) {
        log::warn!("{}", warning);
    }

    let pb = spinner("Recherche des itemsets fréquents et des règles...");
    let result = match &history {
        History::Draws(draws) => analyzer.analyze(draws),
        History::Matrix(matrix) => analyzer.analyze_matrix(matrix),
    };
    pb.finish_and_clear();

    let analysis = result.context("Échec de l'analyse")?;
    display_analysis(&analysis, top);
    Ok(())
}

fn cmd_encode(file: &Path, output: &Path) -> Result<()> {
    let result = export_onehot(file, output)?;
    display_export_summary(&result, output);
    Ok(())
}

fn cmd_stats(file: &Path) -> Result<()> {
    let history = load_history(file)?;
    if let History::Draws(draws) = &history {
        // Raw files are only shape-checked at parse time.
        encode(draws).context("Tirages invalides")?;
    }
    let draws = history.draws();
    let summary = summarize(&analyze_patterns(&draws)).context("Aucun tirage à analyser")?;
    println!("Tirages analysés : {}", summary.draws);
    display_summary(&summary);
    Ok(())
}

fn cmd_config(save: Option<&Path>, args: &MiningArgs) -> Result<()> {
    let config = resolve_config(args)?;
    config.validate()?;
    display_config(&config);
    println!("{}", serde_json::to_string_pretty(&config)?);

    if let Some(path) = save {
        save_config(&config, path)?;
        println!("\nConfiguration sauvegardée dans {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let w = parse_weights("0.2, 0.5,0.3").unwrap();
        assert!((w.frequency - 0.2).abs() < 1e-10);
        assert!((w.rules - 0.5).abs() < 1e-10);
        assert!((w.recent - 0.3).abs() < 1e-10);
        assert!(parse_weights("0.2,0.5").is_err());
        assert!(parse_weights("a,b,c").is_err());
    }

    #[test]
    fn test_resolve_config_overrides() {
        let args = MiningArgs {
            min_support: Some(0.3),
            recent_window: Some(20),
            ..Default::default()
        };
        let config = resolve_config(&args).unwrap();
        assert!((config.min_support - 0.3).abs() < 1e-10);
        assert_eq!(config.recent_window, 20);
        assert_eq!(config.max_itemset_size, 6);
    }

    #[test]
    fn test_window_warning() {
        assert!(window_warning(5, 10).unwrap().contains("5 tirages"));
        assert!(window_warning(10, 10).is_none());
        assert!(window_warning(60, 10).is_none());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "lotofacil", "analyze", "-f", "draws.csv", "--min-support", "0.3", "--max-len", "4",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze { file, top, mining } => {
                assert_eq!(file, PathBuf::from("draws.csv"));
                assert_eq!(top, 5);
                assert_eq!(mining.min_support, Some(0.3));
                assert_eq!(mining.max_len, Some(4));
            }
            _ => panic!("expected analyze"),
        }
    }
}
