/// The partitioned search and the brute force must find the same sets

use std::collections::BTreeSet;

use set_dataset::find_sets::*;
use set_dataset::find_sets_brute::brute_force_find_sets;
use set_dataset::table::Table;
use set_dataset::ternary::TERNARY_VALUES;

fn all_cards(num_attributes: usize) -> Vec<Vec<i8>> {
    let mut cards = vec![Vec::new()];
    for _ in 0..num_attributes {
        cards = cards
            .into_iter()
            .flat_map(|c| TERNARY_VALUES.iter().map(move |&v| {
                let mut next = c.clone();
                next.push(v);
                next
            }))
            .collect();
    }
    cards
}

fn assert_same_sets(table: &Table) -> usize {
    let optimized = find_sets(table, FindOptions::default());
    let brute = brute_force_find_sets(table, FindOptions::default());
    assert_eq!(optimized.len(), brute.len(), "table:\n{}", table);
    assert_eq!(normalize(&optimized), normalize(&brute), "table:\n{}", table);
    for t in &optimized {
        assert!(t[0] < t[1] && t[1] < t[2]);
    }
    optimized.len()
}

#[test]
fn scenario_one_set_among_four_cards() {
    let table = Table::from_rows(&[
        vec![1, 0, -1], vec![0, 1, -1], vec![-1, -1, -1], vec![1, 0, 1],
    ]).unwrap();
    assert_eq!(find_sets(&table, FindOptions::default()), vec![[0, 1, 2]]);
    assert_eq!(brute_force_find_sets(&table, FindOptions::default()), vec![[0, 1, 2]]);
}

#[test]
fn scenario_all_different_three_cards() {
    let table = Table::from_rows(&[vec![1, 1, 1], vec![0, 0, 0], vec![-1, -1, -1]]).unwrap();
    assert_eq!(find_sets(&table, FindOptions::default()), vec![[0, 1, 2]]);
    assert_eq!(brute_force_find_sets(&table, FindOptions::default()), vec![[0, 1, 2]]);
}

#[test]
fn scenario_two_cards() {
    let table = Table::from_rows(&[vec![1, 1, 1], vec![0, 0, 0]]).unwrap();
    assert!(find_sets(&table, FindOptions::default()).is_empty());
    assert!(brute_force_find_sets(&table, FindOptions::default()).is_empty());
}

#[test]
fn random_tables_agree() {
    for seed in 0..200u64 {
        let num_attributes = 1 + (seed % 5) as usize;
        let max_cards = 3usize.pow(num_attributes as u32).min(30);
        let num_cards = (seed as usize * 7) % (max_cards + 1);
        let table = Table::random(num_cards, num_attributes, Some(seed)).unwrap();
        assert_same_sets(&table);
    }
}

#[test]
fn full_decks_agree() {
    // a full deck of n attributes holds 3^(n-1) * (3^n - 1) / 2 sets
    for n in 1..=4u32 {
        let table = Table::from_rows(&all_cards(n as usize)).unwrap();
        let expected = 3usize.pow(n - 1) * (3usize.pow(n) - 1) / 2;
        assert_eq!(assert_same_sets(&table), expected);
    }
}

#[test]
fn duplicate_rows_agree() {
    let table = Table::from_rows(&[
        vec![1, 0], vec![1, 0], vec![1, 0], vec![0, 0], vec![-1, 0], vec![-1, 0],
    ]).unwrap();
    assert_same_sets(&table);
}

#[test]
fn first_only_returns_a_member_of_the_full_result() {
    for seed in 0..50u64 {
        let table = Table::random(9, 4, Some(seed)).unwrap();
        let all: BTreeSet<Triple> = normalize(&find_sets(&table, FindOptions::default()));
        for algorithm in [Algorithm::Optimized, Algorithm::Brute] {
            let first = find_sets_with(&table, algorithm, FindOptions::first_only());
            assert!(first.len() <= 1);
            match first.first() {
                Some(t) => assert!(all.contains(t)),
                None => assert!(all.is_empty()),
            }
            assert_eq!(has_set(&table, algorithm), !all.is_empty());
        }
    }
}

#[test]
fn in_place_partition_keeps_the_number_of_sets() {
    let mut table = Table::random(20, 4, Some(5)).unwrap();
    let before = count_sets(&table, Algorithm::Optimized);
    table.partition_rows_by_first_column();
    let column = table.get_column(0).unwrap();
    assert!(column.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(count_sets(&table, Algorithm::Brute), before);
}
