/// A table of cards: `num_rows` cards of `num_columns` ternary attributes.
///
/// The table owns its cells in a single row-major buffer. It is built either
/// from rows supplied by the caller (validated) or by drawing random cards
/// until the requested number of distinct cards is reached.
///
/// Row indices are stable: nothing in this crate reorders the rows except
/// an explicit call to `partition_rows_by_first_column`.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::TableError;
use crate::ternary::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    cells: Vec<Cell>,
    num_rows: usize,
    num_columns: usize,
}

/// Number of distinct cards with `num_attributes` attributes (3^n), or None
/// if it does not fit in a u64 (more cards than anyone can ask for).
pub fn universe_size(num_attributes: usize) -> Option<u64> {
    let exp = u32::try_from(num_attributes).ok()?;
    3u64.checked_pow(exp)
}

impl Table {
    /// Build a table of `num_cards` distinct random cards.
    ///
    /// Each cell is drawn uniformly in {-1, 0, 1}; a card colliding with one
    /// already drawn is dropped and drawn again. Rows keep their draw order.
    /// With `Some(seed)` the table is reproducible, with `None` the generator
    /// is seeded from OS entropy.
    ///
    /// Fails with `InvalidArgument` if `num_cards > 3^num_attributes`.
    pub fn random(num_cards: usize, num_attributes: usize, seed: Option<u64>)
        -> Result<Self, TableError> {
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Self::random_with_rng(num_cards, num_attributes, &mut rng)
    }

    /// Same as `random`, drawing from a caller-provided generator
    pub fn random_with_rng<R: Rng + ?Sized>(num_cards: usize, num_attributes: usize,
        rng: &mut R) -> Result<Self, TableError> {
        if let Some(max_cards) = universe_size(num_attributes) {
            if num_cards as u64 > max_cards {
                return Err(TableError::InvalidArgument(format!(
                    "number of cards ({}) exceeds the number of distinct cards \
                    with {} attributes (3^{} = {})",
                    num_cards, num_attributes, num_attributes, max_cards)));
            }
        }

        let too_large = || TableError::InvalidArgument(format!(
            "cannot hold {} cards of {} attributes in memory", num_cards, num_attributes));
        let num_cells = num_cards.checked_mul(num_attributes).ok_or_else(too_large)?;
        let mut cells: Vec<Cell> = Vec::new();
        cells.try_reserve(num_cells).map_err(|_| too_large())?;
        let mut seen: HashSet<Vec<Cell>> = HashSet::new();
        seen.try_reserve(num_cards).map_err(|_| too_large())?;
        let mut draws = 0u64;
        while seen.len() < num_cards {
            let card: Vec<Cell> = (0..num_attributes)
                .map(|_| rng.gen_range(-1..=1))
                .collect();
            draws += 1;
            if !seen.contains(&card) {
                cells.extend_from_slice(&card);
                seen.insert(card);
            }
        }
        if draws > num_cards as u64 {
            crate::utils::debug_print(&format!(
                "Table::random: {} draws for {} distinct cards",
                draws, num_cards));
        }

        Ok(Self { cells, num_rows: num_cards, num_columns: num_attributes })
    }

    /// Wrap rows supplied by the caller.
    ///
    /// The column count is taken from the first row (0 for an empty table).
    /// Fails with `InvalidArgument` on rows of different lengths or on any
    /// value outside {-1, 0, 1}. Duplicate rows are accepted.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, TableError> {
        let num_columns = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(rows.len() * num_columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_columns {
                return Err(TableError::InvalidArgument(format!(
                    "row {} has {} values, expected {} like row 0",
                    i, row.len(), num_columns)));
            }
            check_row_values(row, i)?;
            cells.extend_from_slice(row);
        }
        Ok(Self { cells, num_rows: rows.len(), num_columns })
    }

    /// Parse a table written as rows separated by ';' or newlines, values
    /// separated by ',' or whitespace, e.g. "1,0,-1; 0,1,-1; -1,-1,-1".
    /// Empty rows are skipped.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut rows = Vec::new();
        for line in text.split(|c: char| c == ';' || c == '\n') {
            let values: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|v| !v.is_empty())
                .collect();
            if values.is_empty() {
                continue;
            }
            let row = values
                .iter()
                .map(|v| v.parse::<Cell>().map_err(|e| TableError::InvalidArgument(
                    format!("cannot read '{}' as a value of row {}: {}", v, rows.len(), e))))
                .collect::<Result<Vec<Cell>, TableError>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn row_count(&self) -> usize {
        self.num_rows
    }

    pub fn column_count(&self) -> usize {
        self.num_columns
    }

    /// Value at (row, column)
    pub fn get_value(&self, row: usize, column: usize) -> Result<Cell, TableError> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.cells[row * self.num_columns + column])
    }

    /// Copy of row `i`
    pub fn get_row(&self, i: usize) -> Result<Vec<Cell>, TableError> {
        self.check_row(i)?;
        Ok(self.row_slice(i).to_vec())
    }

    /// Copy of column `j`
    pub fn get_column(&self, j: usize) -> Result<Vec<Cell>, TableError> {
        self.check_column(j)?;
        Ok(self.column_values(j).collect())
    }

    /// Replace row `i`. Uniqueness of rows is not checked.
    pub fn set_row(&mut self, i: usize, new_row: &[Cell]) -> Result<(), TableError> {
        self.check_row(i)?;
        if new_row.len() != self.num_columns {
            return Err(TableError::InvalidArgument(format!(
                "new row has {} values, the table has {} columns",
                new_row.len(), self.num_columns)));
        }
        check_row_values(new_row, i)?;
        let start = i * self.num_columns;
        self.cells[start..start + self.num_columns].copy_from_slice(new_row);
        Ok(())
    }

    /// Borrow row `i` without copying. Callers inside the crate only pass
    /// indices below `row_count()`.
    #[inline]
    pub(crate) fn row_slice(&self, i: usize) -> &[Cell] {
        &self.cells[i * self.num_columns..(i + 1) * self.num_columns]
    }

    /// Iterate over all rows, in index order
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.num_rows).map(move |i| self.row_slice(i))
    }

    fn column_values(&self, j: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(j).step_by(self.num_columns.max(1)).copied()
    }

    /// First attribute of every row, or all zeros for a table without
    /// attributes (every card then looks the same on that column).
    pub(crate) fn first_column_or_zeros(&self) -> Vec<Cell> {
        if self.num_columns == 0 {
            vec![0; self.num_rows]
        } else {
            self.column_values(0).collect()
        }
    }

    /// Reorder the rows in place: first attribute -1, then 0, then 1, keeping
    /// the relative order inside each group. Row indices held by callers
    /// refer to the old layout afterwards.
    pub fn partition_rows_by_first_column(&mut self) {
        if self.num_columns == 0 {
            return;
        }
        let column = self.first_column_or_zeros();
        let counts = count_by_value(&column);
        let order = partition_by_value(&index_column(&column), &counts);
        let mut cells = Vec::with_capacity(self.cells.len());
        for &(_, i) in &order {
            cells.extend_from_slice(self.row_slice(i));
        }
        self.cells = cells;
    }

    /// Space-separated values of row `i`, each followed by a space
    pub fn row_to_string(&self, i: usize) -> Result<String, TableError> {
        self.check_row(i)?;
        Ok(format_row(self.row_slice(i)))
    }

    fn check_row(&self, i: usize) -> Result<(), TableError> {
        if i >= self.num_rows {
            return Err(TableError::OutOfRange(format!(
                "row {} of a table with {} rows", i, self.num_rows)));
        }
        Ok(())
    }

    fn check_column(&self, j: usize) -> Result<(), TableError> {
        if j >= self.num_columns {
            return Err(TableError::OutOfRange(format!(
                "column {} of a table with {} columns", j, self.num_columns)));
        }
        Ok(())
    }
}

pub(crate) fn format_row(row: &[Cell]) -> String {
    let mut s = String::with_capacity(row.len() * 3);
    for v in row {
        s.push_str(&format!("{} ", v));
    }
    s
}

fn check_row_values(row: &[Cell], i: usize) -> Result<(), TableError> {
    match row.iter().position(|&v| !is_ternary(v)) {
        Some(j) => Err(TableError::InvalidArgument(format!(
            "value {} at row {}, column {} is not in {{-1, 0, 1}}", row[j], i, j))),
        None => Ok(()),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", format_row(row))?;
        }
        Ok(())
    }
}
