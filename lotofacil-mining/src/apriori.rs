//! Level-wise frequent itemset search.
//!
//! Level `k + 1` is built by joining frequent `k`-itemsets that share their first
//! `k - 1` members. A candidate is dropped before counting as soon as one of its
//! `k`-subsets is missing from the previous level, since support can only shrink
//! when an itemset grows.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rayon::prelude::*;

use crate::encoding::{OccurrenceMatrix, column_of, mask_numbers, number_mask};
use crate::error::{MiningError, MiningResult};
use lotofacil_data::models::POOL_SIZE;

#[derive(Debug, Clone, PartialEq)]
pub struct Itemset {
    /// Members, ascending.
    pub numbers: Vec<u8>,
    pub mask: u32,
    /// Rows containing every member.
    pub count: usize,
    pub support: f64,
}

impl Itemset {
    fn new(mask: u32, count: usize, total: usize) -> Self {
        Self {
            numbers: mask_numbers(mask),
            mask,
            count,
            support: count as f64 / total as f64,
        }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Row counts of every frequent itemset, keyed by mask so that the same set
/// is found whatever order its members were listed in.
#[derive(Debug, Clone, Default)]
pub struct SupportIndex {
    counts: HashMap<u32, usize>,
    total: usize,
}

impl SupportIndex {
    pub fn total_rows(&self) -> usize {
        self.total
    }

    pub fn count(&self, mask: u32) -> Option<usize> {
        self.counts.get(&mask).copied()
    }

    pub fn support(&self, mask: u32) -> Option<f64> {
        self.count(mask).map(|c| c as f64 / self.total as f64)
    }

    /// `false` if any number is outside 1..=25.
    pub fn contains(&self, numbers: &[u8]) -> bool {
        numbers.iter().all(|&n| column_of(n).is_some())
            && self.counts.contains_key(&number_mask(numbers))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Frequent itemsets ordered by size, then lexicographically, plus their index.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    pub itemsets: Vec<Itemset>,
    pub index: SupportIndex,
}

impl FrequentItemsets {
    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &Itemset> {
        self.itemsets.iter().filter(move |s| s.len() == size)
    }

    pub fn max_size(&self) -> usize {
        self.itemsets.iter().map(Itemset::len).max().unwrap_or(0)
    }
}

fn count_rows(row_masks: &[u32], mask: u32) -> usize {
    row_masks.iter().filter(|&&row| row & mask == mask).count()
}

/// Join step: pairs of the (sorted) frontier sharing all but their last member.
fn join_candidates(frontier: &[Itemset]) -> Vec<Vec<u8>> {
    let mut candidates = Vec::new();
    for (i, a) in frontier.iter().enumerate() {
        let prefix = &a.numbers[..a.numbers.len() - 1];
        for b in &frontier[i + 1..] {
            if &b.numbers[..b.numbers.len() - 1] != prefix {
                // Frontier is sorted, so no later set shares this prefix.
                break;
            }
            let mut joined = a.numbers.clone();
            joined.push(b.numbers[b.numbers.len() - 1]);
            candidates.push(joined);
        }
    }
    candidates
}

/// Prune step: every subset obtained by dropping one member must be frequent.
fn all_subsets_frequent(candidate: &[u8], previous: &HashSet<u32>) -> bool {
    let mask = number_mask(candidate);
    candidate
        .iter()
        .all(|&n| previous.contains(&(mask & !(1 << (n - 1)))))
}

pub fn frequent_itemsets(
    matrix: &OccurrenceMatrix,
    min_support: f64,
    max_size: usize,
) -> MiningResult<FrequentItemsets> {
    if max_size < 1 {
        return Err(MiningError::config("max_itemset_size", "doit valoir au moins 1"));
    }
    let total = matrix.n_rows();
    if total == 0 {
        return Err(MiningError::InsufficientData(
            "aucun tirage dans la matrice d'occurrences".to_string(),
        ));
    }

    let row_masks = matrix.row_masks();
    let is_frequent = |count: usize| count as f64 / total as f64 >= min_support;

    let mut result = FrequentItemsets {
        itemsets: Vec::new(),
        index: SupportIndex { counts: HashMap::new(), total },
    };

    let counts = matrix.column_counts();
    let mut frontier: Vec<Itemset> = (1..=POOL_SIZE as u8)
        .filter(|&n| is_frequent(counts[(n - 1) as usize] as usize))
        .map(|n| Itemset::new(number_mask(&[n]), counts[(n - 1) as usize] as usize, total))
        .collect();
    log::info!("Taille 1 : {} candidats, {} fréquents", POOL_SIZE, frontier.len());

    let mut size = 1;
    while !frontier.is_empty() {
        for itemset in &frontier {
            result.index.counts.insert(itemset.mask, itemset.count);
        }
        result.itemsets.extend(frontier.iter().cloned());

        if size >= max_size {
            break;
        }
        size += 1;

        let started = Instant::now();
        let previous: HashSet<u32> = frontier.iter().map(|s| s.mask).collect();
        let joined = join_candidates(&frontier);
        let joined_count = joined.len();
        let candidates: Vec<u32> = joined
            .into_iter()
            .filter(|c| all_subsets_frequent(c, &previous))
            .map(|c| number_mask(&c))
            .collect();
        let pruned = joined_count - candidates.len();

        // Ordered collect keeps the result independent of thread scheduling.
        let counted: Vec<(u32, usize)> = candidates
            .par_iter()
            .map(|&mask| (mask, count_rows(&row_masks, mask)))
            .collect();

        frontier = counted
            .into_iter()
            .filter(|&(_, count)| is_frequent(count))
            .map(|(mask, count)| Itemset::new(mask, count, total))
            .collect();

        log::info!(
            "Taille {} : {} candidats ({} élagués), {} fréquents",
            size,
            candidates.len(),
            pruned,
            frontier.len()
        );
        log::debug!("Taille {} comptée en {:?}", size, started.elapsed());
    }

    Ok(result)
}
