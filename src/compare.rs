/// Timed comparison of the partitioned search against the exhaustive one
///
/// Both searches run on the same table; their results must be the same set
/// of triples (the order in which triples are found differs).

use std::time::Instant;

use crate::find_sets::*;
use crate::find_sets_brute::brute_force_find_sets;
use crate::table::Table;
use crate::utils::*;

#[derive(Debug, Clone)]
pub struct CrossCheck {
    pub optimized: Vec<Triple>,
    pub brute: Vec<Triple>,
    pub agree: bool,
    pub optimized_secs: f64,
    pub brute_secs: f64,
}

impl CrossCheck {
    /// Brute-force time over optimized time (0 when too fast to measure)
    pub fn speedup(&self) -> f64 {
        if self.optimized_secs > 0.0 {
            self.brute_secs / self.optimized_secs
        } else {
            0.0
        }
    }
}

pub fn cross_check(table: &Table) -> CrossCheck {
    let start = Instant::now();
    let optimized = find_sets(table, FindOptions::default());
    let optimized_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let brute = brute_force_find_sets(table, FindOptions::default());
    let brute_secs = start.elapsed().as_secs_f64();

    let agree = optimized.len() == brute.len() && normalize(&optimized) == normalize(&brute);
    if !agree {
        test_print(&format!("cross_check: MISMATCH optimized={} brute={}\n{}",
            optimized.len(), brute.len(), table));
    }
    CrossCheck { optimized, brute, agree, optimized_secs, brute_secs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_check_agrees() {
        for seed in 0..10 {
            let table = Table::random(15, 4, Some(seed)).unwrap();
            let check = cross_check(&table);
            assert!(check.agree, "seed {}", seed);
            assert_eq!(check.optimized.len(), check.brute.len());
        }
    }

    #[test]
    fn test_speedup_without_time() {
        let check = CrossCheck {
            optimized: vec![],
            brute: vec![],
            agree: true,
            optimized_secs: 0.0,
            brute_secs: 1.0,
        };
        assert_eq!(check.speedup(), 0.0);
    }
}
