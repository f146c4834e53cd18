use lotofacil_data::models::Draw;

/// Upper bound (inclusive) of each quadrant. The last one holds 19..=25, seven numbers.
pub const QUADRANT_BOUNDS: [i64; 4] = [6, 12, 18, 25];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPattern {
    pub even: usize,
    pub odd: usize,
    pub sum: i64,
    pub quadrants: [usize; 4],
}

pub fn quadrant_of(number: i64) -> usize {
    QUADRANT_BOUNDS
        .iter()
        .position(|&upper| number <= upper)
        .unwrap_or(QUADRANT_BOUNDS.len() - 1)
}

pub fn draw_pattern(draw: &Draw) -> DrawPattern {
    let even = draw.numbers.iter().filter(|&&n| n % 2 == 0).count();
    let mut quadrants = [0usize; 4];
    for &n in &draw.numbers {
        quadrants[quadrant_of(n)] += 1;
    }
    DrawPattern {
        even,
        odd: draw.numbers.len() - even,
        sum: draw.numbers.iter().sum(),
        quadrants,
    }
}

pub fn analyze_patterns(draws: &[Draw]) -> Vec<DrawPattern> {
    draws.iter().map(draw_pattern).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternSummary {
    pub draws: usize,
    /// Most frequent (even, odd) split and how many draws had it.
    pub parity: (usize, usize),
    pub parity_count: usize,
    pub sum_mean: f64,
    /// Population standard deviation.
    pub sum_std: f64,
    pub quadrant_means: [f64; 4],
}

impl PatternSummary {
    /// `mean ± std`, the usual range of draw sums.
    pub fn sum_range(&self) -> (f64, f64) {
        (self.sum_mean - self.sum_std, self.sum_mean + self.sum_std)
    }
}

/// `None` for an empty slice. Parity ties go to the split seen first.
pub fn summarize(patterns: &[DrawPattern]) -> Option<PatternSummary> {
    if patterns.is_empty() {
        return None;
    }
    let n = patterns.len() as f64;

    let mut splits: Vec<((usize, usize), usize)> = Vec::new();
    for p in patterns {
        let key = (p.even, p.odd);
        match splits.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => splits.push((key, 1)),
        }
    }
    let mut best = splits[0];
    for &candidate in &splits[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }

    let sum_mean = patterns.iter().map(|p| p.sum as f64).sum::<f64>() / n;
    let variance = patterns
        .iter()
        .map(|p| (p.sum as f64 - sum_mean).powi(2))
        .sum::<f64>()
        / n;

    let mut quadrant_means = [0.0; 4];
    for p in patterns {
        for (mean, &count) in quadrant_means.iter_mut().zip(&p.quadrants) {
            *mean += count as f64;
        }
    }
    for mean in &mut quadrant_means {
        *mean /= n;
    }

    Some(PatternSummary {
        draws: patterns.len(),
        parity: best.0,
        parity_count: best.1,
        sum_mean,
        sum_std: variance.sqrt(),
        quadrant_means,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: impl IntoIterator<Item = u8>) -> Draw {
        Draw::new(numbers)
    }

    #[test]
    fn test_quadrants_low_draw() {
        let p = draw_pattern(&draw(1..=15));
        assert_eq!(p.quadrants, [6, 6, 3, 0]);
    }

    #[test]
    fn test_quadrants_high_draw() {
        let p = draw_pattern(&draw(11..=25));
        assert_eq!(p.quadrants, [0, 2, 6, 7]);
    }

    #[test]
    fn test_quadrant_bounds() {
        assert_eq!(quadrant_of(1), 0);
        assert_eq!(quadrant_of(6), 0);
        assert_eq!(quadrant_of(7), 1);
        assert_eq!(quadrant_of(12), 1);
        assert_eq!(quadrant_of(13), 2);
        assert_eq!(quadrant_of(18), 2);
        assert_eq!(quadrant_of(19), 3);
        assert_eq!(quadrant_of(25), 3);
    }

    #[test]
    fn test_parity_and_sum() {
        let p = draw_pattern(&draw(1..=15));
        assert_eq!(p.even, 7);
        assert_eq!(p.odd, 8);
        assert_eq!(p.even + p.odd, 15);
        assert_eq!(p.sum, 120);
    }

    #[test]
    fn test_summary() {
        let patterns = analyze_patterns(&[draw(1..=15), draw(11..=25), draw(1..=15)]);
        let s = summarize(&patterns).unwrap();
        assert_eq!(s.draws, 3);
        // 1..=15 and 11..=25 both split 7 even / 8 odd
        assert_eq!(s.parity, (7, 8));
        assert_eq!(s.parity_count, 3);
        // sums 120, 270, 120
        assert!((s.sum_mean - 170.0).abs() < 1e-10);
        let expected_std = ((50.0f64 * 50.0 * 2.0 + 100.0 * 100.0) / 3.0).sqrt();
        assert!((s.sum_std - expected_std).abs() < 1e-10);
        assert!((s.quadrant_means[0] - 4.0).abs() < 1e-10);
        assert!((s.quadrant_means[3] - 7.0 / 3.0).abs() < 1e-10);
        let (low, high) = s.sum_range();
        assert!((high - low - 2.0 * expected_std).abs() < 1e-10);
    }

    #[test]
    fn test_parity_tie_keeps_first_seen() {
        // 11..=25: 7 even / 8 odd; 2..=16: 8 even / 7 odd
        let patterns = analyze_patterns(&[draw(2..=16), draw(11..=25)]);
        let s = summarize(&patterns).unwrap();
        assert_eq!(s.parity, (8, 7));
        assert_eq!(s.parity_count, 1);
    }

    #[test]
    fn test_summary_empty() {
        assert!(summarize(&[]).is_none());
    }
}
