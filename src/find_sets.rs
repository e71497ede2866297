/// Enumerate the sets of a table in O(n²) pair steps
///
/// The rows are grouped on their first attribute into three blocks: N (-1),
/// Z (0) and P (1). Walking pairs (i, j) in that order, the first attribute
/// alone decides which block the third card k must come from:
///     - (-1, -1) : another -1, k in N after j
///     - ( 0,  0) : another  0, k in Z after j
///     - ( 1,  1) : another  1, k in P after j
///     - (-1,  0) : a 1, k anywhere in P
///     - (-1,  1) : would need a 0, but Z lies between i and j: that triple
///                  is already reached from its (-1, 0) pair
///     - ( 0,  1) : would need a -1, same reason
/// Every k in the admissible range is then checked on all attributes.
///
/// The table itself is never reordered: the partition is done on a copy of
/// the first column tagged with the row indices, and the reported triples are
/// indices of the table as given.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::table::Table;
use crate::ternary::*;
use crate::utils::*;

/// Three row indices, smallest first
pub type Triple = [usize; 3];

/// Enumerate all sets, or stop at the first one found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    All,
    FirstOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub mode: SearchMode,
    /// Report each set on the test output as soon as it is found
    pub print: bool,
}

impl FindOptions {
    pub fn first_only() -> Self {
        Self { mode: SearchMode::FirstOnly, print: false }
    }

    pub fn printing(mut self) -> Self {
        self.print = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
    clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Partitioned O(n²) search
    #[default]
    Optimized,
    /// Exhaustive O(n³) search
    Brute,
}

/// Run the given algorithm
pub fn find_sets_with(table: &Table, algorithm: Algorithm, options: FindOptions)
    -> Vec<Triple> {
    match algorithm {
        Algorithm::Optimized => find_sets(table, options),
        Algorithm::Brute => crate::find_sets_brute::brute_force_find_sets(table, options),
    }
}

/// Number of sets in the table
pub fn count_sets(table: &Table, algorithm: Algorithm) -> usize {
    find_sets_with(table, algorithm, FindOptions::default()).len()
}

/// True if the table holds at least one set
pub fn has_set(table: &Table, algorithm: Algorithm) -> bool {
    !find_sets_with(table, algorithm, FindOptions::first_only()).is_empty()
}

/// Collect triples as a set, for order-independent comparisons
pub fn normalize(triples: &[Triple]) -> BTreeSet<Triple> {
    triples.iter().map(|t| sorted_triple(t[0], t[1], t[2])).collect()
}

#[inline]
pub(crate) fn sorted_triple(a: usize, b: usize, c: usize) -> Triple {
    let mut t = [a, b, c];
    t.sort_unstable();
    t
}

/// Print a set found on the test output
pub(crate) fn report_set(table: &Table, triple: &Triple, label: &str) {
    let mut msg = format!("{} set: {:?}", label, triple);
    for &r in triple {
        msg.push_str(&format!("\n   card {:>3}: {}", r, crate::table::format_row(
            table.row_slice(r))));
    }
    test_print(&msg);
}

/// Index ranges of the three blocks in partitioned order
struct Blocks {
    minus: Range<usize>,
    zero: Range<usize>,
    plus: Range<usize>,
}

impl Blocks {
    fn new(counts: &TernaryCounts) -> Self {
        let [_, z, p] = counts.offsets();
        Self {
            minus: 0..z,
            zero: z..p,
            plus: p..counts.total(),
        }
    }

    /// Positions k admissible for the pair (i, j) given their first-attribute
    /// values, or None if no k after j can complete the pair. The pair is
    /// ordered: `vi <= vj` and `i < j`.
    fn admissible_k(&self, vi: Cell, vj: Cell, j: usize) -> Option<Range<usize>> {
        match vi + vj {
            -2 => Some(j + 1..self.minus.end),
            2 => Some(j + 1..self.plus.end),
            -1 => Some(self.plus.clone()),
            0 if vi == vj => Some(j + 1..self.zero.end),
            // (-1, 1) and (0, 1): the missing value sits before j
            _ => None,
        }
    }
}

/// Find all sets of the table with the partitioned search.
///
/// Returns triples of row indices (smallest first); with
/// `SearchMode::FirstOnly` at most one triple is returned.
pub fn find_sets(table: &Table, options: FindOptions) -> Vec<Triple> {
    let mut valid_sets = Vec::new();
    let n = table.row_count();
    if n < 3 {
        return valid_sets;
    }

    let column = table.first_column_or_zeros();
    let counts = count_by_value(&column);
    let order = partition_by_value(&index_column(&column), &counts);
    let blocks = Blocks::new(&counts);
    debug_print(&format!("find_sets: {} cards, blocks -1/0/1 = {:?}",
        n, counts.as_array()));

    let mut checked = 0u64;
    'pairs: for i in 0..n - 2 {
        let (vi, ri) = order[i];
        let row_i = table.row_slice(ri);
        for j in i + 1..n - 1 {
            let (vj, rj) = order[j];
            let Some(ks) = blocks.admissible_k(vi, vj, j) else {
                // vj is 1 and vi is not: every later j is a 1 too
                break;
            };
            let row_j = table.row_slice(rj);
            for k in ks {
                let rk = order[k].1;
                checked += 1;
                if is_valid_triple(row_i, row_j, table.row_slice(rk)) {
                    let triple = sorted_triple(ri, rj, rk);
                    if options.print {
                        report_set(table, &triple, "valid");
                    }
                    valid_sets.push(triple);
                    if options.mode == SearchMode::FirstOnly {
                        break 'pairs;
                    }
                }
            }
        }
    }

    debug_print(&format!("find_sets: {} candidates checked, {} sets found",
        checked, valid_sets.len()));
    if options.print {
        test_print(&format!("Total valid sets found: {}", valid_sets.len()));
    }
    valid_sets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[Vec<Cell>]) -> Table {
        Table::from_rows(rows).unwrap()
    }

    #[test]
    fn test_find_sets_single_set() {
        let t = table(&[vec![1, 0, -1], vec![0, 1, -1], vec![-1, -1, -1], vec![1, 0, 1]]);
        assert_eq!(find_sets(&t, FindOptions::default()), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_find_sets_three_cards() {
        let t = table(&[vec![1, 1, 1], vec![0, 0, 0], vec![-1, -1, -1]]);
        assert_eq!(find_sets(&t, FindOptions::default()), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_find_sets_too_few_cards() {
        let t = table(&[vec![1, 1], vec![0, 0]]);
        assert!(find_sets(&t, FindOptions::default()).is_empty());
        let t = table(&[]);
        assert!(find_sets(&t, FindOptions::default()).is_empty());
    }

    #[test]
    fn test_find_sets_same_block() {
        // first attribute equal everywhere: only the other columns decide
        let t = table(&[vec![1, -1], vec![1, 0], vec![1, 1], vec![1, 1]]);
        let found = normalize(&find_sets(&t, FindOptions::default()));
        let expected: BTreeSet<Triple> = [[0, 1, 2], [0, 1, 3]].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_sets_reports_original_indices() {
        // rows deliberately out of block order
        let t = table(&[vec![1, 1], vec![-1, 0], vec![0, -1], vec![0, 1]]);
        let found = find_sets(&t, FindOptions::default());
        assert_eq!(found, vec![[0, 1, 2]]);
        // the table is untouched
        assert_eq!(t.get_row(0).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_find_sets_without_attributes() {
        let t = table(&[vec![], vec![], vec![], vec![]]);
        assert_eq!(find_sets(&t, FindOptions::default()).len(), 4);
    }

    #[test]
    fn test_first_only() {
        // full 2-attribute deck: 12 sets
        let mut rows = Vec::new();
        for a in TERNARY_VALUES {
            for b in TERNARY_VALUES {
                rows.push(vec![a, b]);
            }
        }
        let t = table(&rows);
        let all = find_sets(&t, FindOptions::default());
        assert_eq!(all.len(), 12);
        let first = find_sets(&t, FindOptions::first_only());
        assert_eq!(first.len(), 1);
        assert!(all.contains(&first[0]));
        assert!(has_set(&t, Algorithm::Optimized));
        assert_eq!(count_sets(&t, Algorithm::Brute), 12);
    }

    #[test]
    fn test_admissible_k() {
        let counts = TernaryCounts { minus: 3, zero: 2, plus: 4 };
        let blocks = Blocks::new(&counts);
        assert_eq!(blocks.admissible_k(-1, -1, 1), Some(2..3));
        assert_eq!(blocks.admissible_k(-1, 0, 3), Some(5..9));
        assert_eq!(blocks.admissible_k(0, 0, 3), Some(4..5));
        assert_eq!(blocks.admissible_k(1, 1, 6), Some(7..9));
        assert_eq!(blocks.admissible_k(-1, 1, 5), None);
        assert_eq!(blocks.admissible_k(0, 1, 5), None);
    }

    #[test]
    fn test_normalize() {
        let set = normalize(&[[2, 0, 1], [0, 1, 2], [3, 1, 2]]);
        let expected: BTreeSet<Triple> = [[0, 1, 2], [1, 2, 3]].into_iter().collect();
        assert_eq!(set, expected);
    }
}
