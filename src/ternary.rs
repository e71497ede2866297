/// Helpers on ternary card rows
///
/// A card attribute takes one of the three values -1, 0 or 1. With this
/// encoding, three cards form a valid set iff, for every attribute, the sum of
/// the three values is -3 (all -1), 3 (all 1) or 0 (all 0, or one of each).
///
/// The partition helpers exploit the 3-letter alphabet: grouping rows by the
/// value of one attribute is a single counting pass, no general sort needed.

/// A single attribute value, always one of `TERNARY_VALUES`.
pub type Cell = i8;

/// The attribute alphabet, in bucket order.
pub const TERNARY_VALUES: [Cell; 3] = [-1, 0, 1];

/// Return true if the value belongs to the ternary alphabet
#[inline]
pub fn is_ternary(value: Cell) -> bool {
    (-1..=1).contains(&value)
}

/// Bucket index of a value: 0 for -1, 1 for 0, 2 for 1
#[inline]
fn bucket(value: Cell) -> usize {
    match value {
        v if v < 0 => 0,
        0 => 1,
        _ => 2,
    }
}

/// Return true if the three rows form a valid set.
///
/// Stops at the first attribute whose sum is not in {-3, 0, 3}. The rows are
/// expected to have the same length; extra trailing values of a longer row
/// are ignored.
pub fn is_valid_triple(a: &[Cell], b: &[Cell], c: &[Cell]) -> bool {
    a.iter()
        .zip(b)
        .zip(c)
        .all(|((&x, &y), &z)| matches!(x + y + z, -3 | 0 | 3))
}

/// Occurrences of -1, 0 and 1 in a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TernaryCounts {
    pub minus: usize,
    pub zero: usize,
    pub plus: usize,
}

impl TernaryCounts {
    pub fn total(&self) -> usize {
        self.minus + self.zero + self.plus
    }

    /// Counts in bucket order [-1, 0, 1]
    pub fn as_array(&self) -> [usize; 3] {
        [self.minus, self.zero, self.plus]
    }

    /// Start offset of each bucket once the column is partitioned
    pub fn offsets(&self) -> [usize; 3] {
        [0, self.minus, self.minus + self.zero]
    }
}

/// Count the occurrences of -1, 0 and 1 in a single pass
pub fn count_by_value(column: &[Cell]) -> TernaryCounts {
    let mut counts = [0usize; 3];
    for &value in column {
        counts[bucket(value)] += 1;
    }
    TernaryCounts {
        minus: counts[0],
        zero: counts[1],
        plus: counts[2],
    }
}

/// Stable three-bucket partition of `(value, original index)` pairs.
///
/// All -1 entries come first, then all 0 entries, then all 1 entries; the
/// relative order inside each bucket is the input order. Linear time.
///
/// # Panics
/// Panics if `counts` does not describe `indexed` (use `count_by_value` on
/// the same values).
pub fn partition_by_value(
    indexed: &[(Cell, usize)],
    counts: &TernaryCounts,
) -> Vec<(Cell, usize)> {
    assert_eq!(
        counts.total(),
        indexed.len(),
        "partition_by_value: counts do not match the column length"
    );
    let mut next = counts.offsets();
    let mut partitioned = vec![(0 as Cell, 0usize); indexed.len()];
    for &(value, index) in indexed {
        let b = bucket(value);
        partitioned[next[b]] = (value, index);
        next[b] += 1;
    }
    partitioned
}

/// Tag each value of a column with its position
pub fn index_column(column: &[Cell]) -> Vec<(Cell, usize)> {
    column.iter().copied().zip(0..).collect()
}
