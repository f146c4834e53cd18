use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use crate::import::ExportResult;
use lotofacil_mining::{Analysis, MiningConfig};
use lotofacil_mining::patterns::PatternSummary;
use lotofacil_mining::rules::AssociationRule;
use lotofacil_mining::scoring::Recommendation;

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_analysis(analysis: &Analysis, top_rules: usize) {
    println!("\n=== ANALYSE COMPLÈTE LOTOFÁCIL ===");
    println!("Tirages analysés : {}", analysis.draw_count);
    println!(
        "Itemsets fréquents : {}, règles d'association : {}",
        analysis.patterns.frequent.itemsets.len(),
        analysis.patterns.rules.len()
    );

    display_recommendation(&analysis.recommendation);
    display_summary(&analysis.summary);
    display_rules(&analysis.top_rules(top_rules));

    println!("\nTemps total d'exécution : {:.2?}", analysis.elapsed);
}

pub fn display_recommendation(recommendation: &Recommendation) {
    println!("\n🎯 Numéros recommandés pour le prochain tirage\n");
    println!("{}", format_numbers(&recommendation.sorted_numbers()));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rang", "Numéro", "Fréquence", "Règles", "Tendance", "Score"]);

    for (i, pick) in recommendation.picks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:2}", pick.number)).fg(Color::Green),
            Cell::new(format!("{:.4}", pick.frequency)),
            Cell::new(format!("{:.4}", pick.rules)),
            Cell::new(format!("{:.4}", pick.recent)),
            Cell::new(format!("{:.4}", pick.total())),
        ]);
    }
    println!("{table}");
}

pub fn display_summary(summary: &PatternSummary) {
    println!("\n📊 Analyse des motifs\n");

    let (even, odd) = summary.parity;
    println!("Répartition pairs/impairs la plus fréquente :");
    println!("  Pairs : {}, Impairs : {}", even, odd);
    println!("  Occurrences : {} tirages", summary.parity_count);

    let (low, high) = summary.sum_range();
    println!("\nSomme des numéros :");
    println!("  Moyenne : {:.1}", summary.sum_mean);
    println!("  Plage la plus fréquente : {:.1} à {:.1}", low, high);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Quadrant", "Plage", "Moyenne"]);

    let ranges = ["1-6", "7-12", "13-18", "19-25"];
    for (i, (mean, range)) in summary.quadrant_means.iter().zip(ranges).enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            range.to_string(),
            format!("{:.1}", mean),
        ]);
    }
    println!("\nMoyenne de numéros par quadrant :");
    println!("{table}");
}

pub fn display_rules(rules: &[&AssociationRule]) {
    println!("\n🔗 Règles d'association les plus fortes\n");
    if rules.is_empty() {
        println!("Aucune règle au-dessus des seuils.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Si apparaissent", "Alors apparaissent", "Confiance", "Support", "Lift"]);

    for rule in rules {
        table.add_row(vec![
            format_numbers(&rule.antecedent),
            format_numbers(&rule.consequent),
            format!("{:.3}", rule.confidence),
            format!("{:.3}", rule.support),
            format!("{:.3}", rule.lift),
        ]);
    }
    println!("{table}");
}

pub fn display_config(config: &MiningConfig) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Paramètre", "Valeur"]);

    let rows = [
        ("min_support", config.min_support.to_string()),
        ("min_confidence", config.min_confidence.to_string()),
        ("max_itemset_size", config.max_itemset_size.to_string()),
        ("recent_window", config.recent_window.to_string()),
        ("poids fréquence", config.weights.frequency.to_string()),
        ("poids règles", config.weights.rules.to_string()),
        ("poids tendance", config.weights.recent.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    println!("{table}");
}

pub fn display_export_summary(result: &ExportResult, output: &std::path::Path) {
    println!("Export terminé :");
    println!("  Lignes écrites : {}", result.rows);
    println!("  Fichier        : {}", output.display());
}
