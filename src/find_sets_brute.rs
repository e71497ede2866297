/// Exhaustive O(n³) set search, used to cross-check the partitioned search

use crate::find_sets::*;
use crate::table::Table;
use crate::ternary::is_valid_triple;
use crate::utils::*;

/// Check every triple i < j < k, in ascending order
pub fn brute_force_find_sets(table: &Table, options: FindOptions) -> Vec<Triple> {
    let n = table.row_count();
    let mut valid_sets = Vec::new();

    'all: for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                if is_valid_triple(table.row_slice(i), table.row_slice(j),
                    table.row_slice(k)) {
                    let triple = [i, j, k];
                    if options.print {
                        report_set(table, &triple, "brute");
                    }
                    valid_sets.push(triple);
                    if options.mode == SearchMode::FirstOnly {
                        break 'all;
                    }
                }
            }
        }
    }

    if options.print {
        test_print(&format!("Total valid sets found with brute force: {}",
            valid_sets.len()));
    }
    valid_sets
}
