/// Sweep over the number of cards on the table
///
/// For each card count in the range, a full dataset is generated and reduced
/// to its set counts, the share of tables without set and the average number
/// of sets, next to the modelled probability of a set and the spread of the
/// counts. The results of the whole sweep are kept together so they can be
/// saved as one JSON document.

use serde::{Deserialize, Serialize};

use crate::dataset::*;
use crate::find_sets::Algorithm;
use crate::table::universe_size;
use crate::utils::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub num_attributes: usize,
    pub num_tables: usize,
    pub min_cards: usize,
    pub max_cards: usize,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub num_cards: usize,
    pub set_counts: Vec<usize>,
    pub prob_no_sets: f64,
    pub avg_sets: f64,
    /// histogram[c] = number of tables with exactly c sets
    pub histogram: Vec<usize>,
    /// Modelled probability of at least one set, see `expected_prob_set`
    pub expected_prob_set: f64,
    /// Binomial standard error of the simulated probability of a set
    pub std_prob_set: f64,
    /// Simulated minus modelled probability of at least one set
    pub residual: f64,
    pub mean_sets: f64,
    /// Population standard deviation of the set counts
    pub std_sets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub config: SweepConfig,
    pub entries: Vec<SweepEntry>,
}

impl SweepConfig {
    /// Card counts actually swept: the requested range, capped at the number
    /// of distinct cards
    pub fn card_range(&self) -> std::ops::RangeInclusive<usize> {
        let cap = universe_size(self.num_attributes)
            .and_then(|u| usize::try_from(u).ok())
            .unwrap_or(usize::MAX);
        self.min_cards..=self.max_cards.min(cap)
    }
}

/// Number of tables per set count, from 0 to the largest count
pub fn histogram(set_counts: &[usize]) -> Vec<usize> {
    let max = set_counts.iter().copied().max().unwrap_or(0);
    let mut bins = vec![0usize; max + 1];
    for &c in set_counts {
        bins[c] += 1;
    }
    bins
}

/// Modelled probability that `num_cards` random distinct cards hold at
/// least one set.
///
/// Any two cards complete exactly one third card, so three random cards form
/// a set with probability p3 = 1 / (3^a - 2). Each new card adds C(n-1, 2)
/// pairs, each completed by it with probability p3:
///
/// ```text
/// p(n) = p(n-1) + p3 * C(n-1, 2) * (1 - p(n-1))
/// ```
///
/// with p(n) = 0 below 3 cards. The model overshoots for large n, so the
/// result is capped at 1.
pub fn expected_prob_set(num_cards: usize, num_attributes: usize) -> f64 {
    if num_cards < 3 {
        return 0.0;
    }
    let p3 = match universe_size(num_attributes) {
        Some(u) if u > 3 => 1.0 / (u - 2) as f64,
        Some(_) => 1.0,
        None => 0.0,
    };
    let mut p = p3;
    for n in 4..=num_cards {
        let pairs = ((n - 1) * (n - 2) / 2) as f64;
        p = (p + p3 * pairs * (1.0 - p)).min(1.0);
    }
    p
}

/// Standard error of a proportion `q` estimated over `num_tables` tables
pub fn binomial_std(q: f64, num_tables: usize) -> f64 {
    if num_tables == 0 {
        return 0.0;
    }
    (q * (1.0 - q) / num_tables as f64).sqrt()
}

/// Mean and population standard deviation of the set counts
pub fn mean_and_std(set_counts: &[usize]) -> (f64, f64) {
    if set_counts.is_empty() {
        return (0.0, 0.0);
    }
    let n = set_counts.len() as f64;
    let mean = set_counts.iter().sum::<usize>() as f64 / n;
    let variance = set_counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>() / n;
    (mean, variance.sqrt())
}

pub fn run_sweep(config: &SweepConfig) -> Result<SweepResults, DatasetError> {
    let mut entries = Vec::new();
    for num_cards in config.card_range() {
        progress_print(&format!("Running for {} cards...", num_cards));
        let dataset_config = DatasetConfig {
            num_cards,
            num_attributes: config.num_attributes,
            num_tables: config.num_tables,
            // a distinct stream of seeds per card count
            seed: config.seed.map(|s| s.wrapping_add(
                (num_cards as u64).wrapping_mul(config.num_tables as u64 + 1))),
            algorithm: config.algorithm,
            print_sets: false,
        };
        let dataset = generate_dataset(&dataset_config)?;
        let stats = dataset.stats();
        test_print(&format!("   {:>3} cards: {:>6.2}% without set, {:.3} sets on average",
            num_cards, stats.probability_no_set, stats.average_sets));
        let prob_set = if stats.num_tables == 0 {
            0.0
        } else {
            1.0 - stats.probability_no_set / 100.0
        };
        let expected = expected_prob_set(num_cards, config.num_attributes);
        let (mean_sets, std_sets) = mean_and_std(&dataset.set_counts);
        debug_print(&format!("run_sweep: {} cards, p(set) simulated {:.4}, modelled {:.4}",
            num_cards, prob_set, expected));
        entries.push(SweepEntry {
            num_cards,
            histogram: histogram(&dataset.set_counts),
            expected_prob_set: expected,
            std_prob_set: binomial_std(prob_set, stats.num_tables),
            residual: prob_set - expected,
            mean_sets,
            std_sets,
            set_counts: dataset.set_counts,
            prob_no_sets: stats.probability_no_set,
            avg_sets: stats.average_sets,
        });
    }
    Ok(SweepResults { config: *config, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_cards: usize, max_cards: usize) -> SweepConfig {
        SweepConfig {
            num_attributes: 2,
            num_tables: 20,
            min_cards,
            max_cards,
            seed: Some(11),
            algorithm: Algorithm::Optimized,
        }
    }

    #[test]
    fn test_histogram() {
        assert_eq!(histogram(&[0, 2, 2, 1, 0, 2]), vec![2, 1, 3]);
        assert_eq!(histogram(&[]), vec![0]);
    }

    #[test]
    fn test_expected_prob_set() {
        assert_eq!(expected_prob_set(2, 4), 0.0);
        assert!((expected_prob_set(3, 4) - 1.0 / 79.0).abs() < 1e-15);
        assert!((expected_prob_set(3, 3) - 1.0 / 25.0).abs() < 1e-15);
        // p(4) = p3 + p3 * 3 * (1 - p3)
        let p3 = 1.0 / 79.0;
        assert!((expected_prob_set(4, 4) - (p3 + 3.0 * p3 * (1.0 - p3))).abs() < 1e-15);
        // three distinct cards of one attribute are always a set
        assert_eq!(expected_prob_set(3, 1), 1.0);
    }

    #[test]
    fn test_expected_prob_set_is_monotone() {
        for a in 2..6 {
            let mut previous = 0.0;
            for n in 0..40 {
                let p = expected_prob_set(n, a);
                assert!(p >= previous, "p({}) decreased with {} attributes", n, a);
                assert!(p <= 1.0);
                previous = p;
            }
        }
    }

    #[test]
    fn test_binomial_std_and_spread() {
        assert!((binomial_std(0.5, 100) - 0.05).abs() < 1e-12);
        assert_eq!(binomial_std(1.0, 10), 0.0);
        assert_eq!(binomial_std(0.5, 0), 0.0);

        assert_eq!(mean_and_std(&[2, 4, 4, 4, 5, 5, 7, 9]), (5.0, 2.0));
        assert_eq!(mean_and_std(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_card_range_is_capped() {
        assert_eq!(config(1, 20).card_range(), 1..=9);
        assert_eq!(config(3, 5).card_range(), 3..=5);
    }

    #[test]
    fn test_run_sweep() {
        let results = run_sweep(&config(1, 9)).unwrap();
        assert_eq!(results.entries.len(), 9);
        for entry in &results.entries {
            assert_eq!(entry.set_counts.len(), 20);
            assert_eq!(entry.histogram.iter().sum::<usize>(), 20);
            if entry.num_cards < 3 {
                assert_eq!(entry.prob_no_sets, 100.0);
                assert_eq!(entry.avg_sets, 0.0);
            }
        }
        // the full 2-attribute deck always holds its 12 lines
        let full = &results.entries[8];
        assert_eq!(full.num_cards, 9);
        assert!(full.set_counts.iter().all(|&c| c == 12));
        assert_eq!(full.prob_no_sets, 0.0);
        assert_eq!(full.mean_sets, 12.0);
        assert_eq!(full.std_sets, 0.0);
        assert_eq!(full.std_prob_set, 0.0);
        assert_eq!(full.expected_prob_set, 1.0);
        assert_eq!(full.residual, 0.0);
        for entry in &results.entries {
            assert!((entry.mean_sets - entry.avg_sets).abs() < 1e-12);
            let prob_set = 1.0 - entry.prob_no_sets / 100.0;
            assert!((entry.residual - (prob_set - entry.expected_prob_set)).abs() < 1e-12);
        }
    }
}
