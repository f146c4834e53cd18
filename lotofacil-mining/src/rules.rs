use crate::apriori::FrequentItemsets;
use crate::encoding::mask_numbers;

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: Vec<u8>,
    pub consequent: Vec<u8>,
    /// Support of antecedent ∪ consequent.
    pub support: f64,
    pub confidence: f64,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub lift: f64,
}

impl AssociationRule {
    /// Every number mentioned by the rule, antecedent first.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.antecedent.iter().chain(self.consequent.iter()).copied()
    }
}

/// Non-empty proper submasks of `mask`, ascending.
fn proper_submasks(mask: u32) -> Vec<u32> {
    let mut subs = Vec::new();
    let mut sub = (mask - 1) & mask;
    while sub != 0 {
        subs.push(sub);
        sub = (sub - 1) & mask;
    }
    subs.reverse();
    subs
}

/// Rules `A -> C` for every frequent itemset of size >= 2 and every split into
/// non-empty `A` and `C`, kept when `count(A ∪ C) / count(A) >= min_confidence`.
pub fn generate_rules(frequent: &FrequentItemsets, min_confidence: f64) -> Vec<AssociationRule> {
    let index = &frequent.index;
    let total = index.total_rows() as f64;
    let mut rules = Vec::new();

    for itemset in frequent.itemsets.iter().filter(|s| s.len() >= 2) {
        for antecedent in proper_submasks(itemset.mask) {
            let consequent = itemset.mask & !antecedent;
            // Subsets of a frequent itemset are always in the index.
            let (Some(ante_count), Some(cons_count)) =
                (index.count(antecedent), index.count(consequent))
            else {
                log::warn!("Sous-ensemble absent de l'index pour {:?}", itemset.numbers);
                continue;
            };

            let confidence = itemset.count as f64 / ante_count as f64;
            if confidence < min_confidence {
                continue;
            }
            let consequent_support = cons_count as f64 / total;
            rules.push(AssociationRule {
                antecedent: mask_numbers(antecedent),
                consequent: mask_numbers(consequent),
                support: itemset.support,
                confidence,
                antecedent_support: ante_count as f64 / total,
                consequent_support,
                lift: confidence / consequent_support,
            });
        }
    }

    log::info!("{} règles d'association (confiance >= {})", rules.len(), min_confidence);
    rules
}

/// The `n` rules with the highest confidence; equal confidences keep generation order.
pub fn top_rules(rules: &[AssociationRule], n: usize) -> Vec<&AssociationRule> {
    let mut sorted: Vec<&AssociationRule> = rules.iter().collect();
    sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    sorted.truncate(n);
    sorted
}
