/// Generation of datasets of random tables, with their set counts
///
/// A dataset is `num_tables` random tables of `num_cards` distinct cards with
/// `num_attributes` attributes each. Every table gets its set count, and the
/// whole dataset is summarised by the share of tables without any set and the
/// average number of sets per table.
///
/// The dataset is written as plain text: parameters, the counts on one line,
/// the statistics, then every table row by row, tables separated by a blank
/// line.

use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::find_sets::{Algorithm, FindOptions, find_sets_with};
use crate::io_helpers::write_text_atomic;
use crate::table::{Table, format_row};
use crate::utils::*;

#[derive(Debug)]
pub enum DatasetError {
    Table(TableError),
    Io(io::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Table(e) => write!(f, "table error: {e}"),
            DatasetError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Table(e) => Some(e),
            DatasetError::Io(e) => Some(e),
        }
    }
}

impl From<TableError> for DatasetError {
    fn from(e: TableError) -> Self {
        DatasetError::Table(e)
    }
}

impl From<io::Error> for DatasetError {
    fn from(e: io::Error) -> Self {
        DatasetError::Io(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub num_cards: usize,
    pub num_attributes: usize,
    pub num_tables: usize,
    /// Table `t` is drawn with seed `seed + t`; None draws from OS entropy
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    /// Print every set found
    pub print_sets: bool,
}

impl DatasetConfig {
    pub fn new(num_cards: usize, num_attributes: usize, num_tables: usize) -> Self {
        Self {
            num_cards,
            num_attributes,
            num_tables,
            seed: None,
            algorithm: Algorithm::Optimized,
            print_sets: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed of table number `t`
    pub fn table_seed(&self, t: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(t as u64))
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub config: DatasetConfig,
    pub tables: Vec<Table>,
    pub set_counts: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub num_tables: usize,
    pub tables_without_sets: usize,
    /// Percentage of tables without any set
    pub probability_no_set: f64,
    pub average_sets: f64,
    pub max_sets: usize,
}

impl DatasetStats {
    pub fn from_counts(set_counts: &[usize]) -> Self {
        let num_tables = set_counts.len();
        let tables_without_sets = set_counts.iter().filter(|&&c| c == 0).count();
        let (probability_no_set, average_sets) = if num_tables == 0 {
            (0.0, 0.0)
        } else {
            let total: usize = set_counts.iter().sum();
            (100.0 * tables_without_sets as f64 / num_tables as f64,
                total as f64 / num_tables as f64)
        };
        Self {
            num_tables,
            tables_without_sets,
            probability_no_set,
            average_sets,
            max_sets: set_counts.iter().copied().max().unwrap_or(0),
        }
    }
}

impl Dataset {
    pub fn stats(&self) -> DatasetStats {
        DatasetStats::from_counts(&self.set_counts)
    }
}

/// Draw the tables of the dataset and count the sets in each.
///
/// Fails with the first table construction error (e.g. more cards than
/// distinct cards exist); no partial dataset is returned.
pub fn generate_dataset(config: &DatasetConfig) -> Result<Dataset, DatasetError> {
    let mut tables = Vec::with_capacity(config.num_tables);
    let mut set_counts = Vec::with_capacity(config.num_tables);
    let options = FindOptions { print: config.print_sets, ..FindOptions::default() };
    let step = (config.num_tables / 10).max(1);

    for t in 0..config.num_tables {
        let table = Table::random(config.num_cards, config.num_attributes,
            config.table_seed(t))?;
        let count = find_sets_with(&table, config.algorithm, options).len();
        debug_print(&format!("generate_dataset: table {} has {} sets", t, count));
        set_counts.push(count);
        tables.push(table);
        if (t + 1) % step == 0 {
            progress_print(&format!("   ... {} / {} tables done",
                fmt_count(t + 1), fmt_count(config.num_tables)));
        }
    }

    Ok(Dataset { config: *config, tables, set_counts })
}

/// Six significant digits, trailing zeros dropped: 33.3333, 0.666667, 50
fn fmt_significant(value: f64) -> String {
    const DIGITS: i32 = 6;
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (DIGITS - 1 - exponent).max(0) as usize;
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Render the dataset in its text format
pub fn render_dataset(dataset: &Dataset) -> String {
    let stats = dataset.stats();
    let mut s = String::new();

    s.push_str("# Parameters:\n");
    s.push_str(&format!("Number of cards: {}\n", dataset.config.num_cards));
    s.push_str(&format!("Number of attributes: {}\n", dataset.config.num_attributes));
    s.push_str(&format!("Number of tables: {}\n\n", dataset.tables.len()));

    s.push_str("# Number of SETs in each Table\n\n");
    for count in &dataset.set_counts {
        s.push_str(&format!("{} ", count));
    }
    s.push_str("\n\n");

    s.push_str(&format!("# Number of Tables with 0 SETs: {}/{}\n\n",
        stats.tables_without_sets, stats.num_tables));
    s.push_str(&format!("# Probability of no SETs: {}% \n\n",
        fmt_significant(stats.probability_no_set)));
    s.push_str(&format!("# Average number of SETs: {}\n\n",
        fmt_significant(stats.average_sets)));

    s.push_str("# Tables considered\n\n");
    for table in &dataset.tables {
        for row in table.rows() {
            s.push_str(&format_row(row));
            s.push('\n');
        }
        s.push('\n');
    }
    s
}

/// Write the dataset to `path` (atomic)
pub fn write_dataset(dataset: &Dataset, path: &Path) -> io::Result<()> {
    write_text_atomic(path, &render_dataset(dataset))?;
    test_print(&format!("Results saved to {}", path.display()));
    Ok(())
}

/// Counts and statistics read back from a dataset text file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCounts {
    pub set_counts: Vec<usize>,
    pub prob_no_sets: Option<f64>,
    pub avg_sets: Option<f64>,
}

/// Read the counts line and the statistics lines of a dataset text.
/// Returns None if the counts header is missing or a count is malformed.
pub fn parse_set_counts(text: &str) -> Option<ParsedCounts> {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines.iter().position(|l| l.trim_end() == "# Number of SETs in each Table")?;
    let set_counts = lines
        .get(header + 2)?
        .split_whitespace()
        .map(|c| c.parse::<usize>().ok())
        .collect::<Option<Vec<usize>>>()?;

    let mut prob_no_sets = None;
    let mut avg_sets = None;
    for line in &lines {
        if let Some(rest) = line.strip_prefix("# Probability of no SETs:") {
            prob_no_sets = rest.trim().trim_end_matches('%').trim().parse::<f64>().ok();
        } else if let Some(rest) = line.strip_prefix("# Average number of SETs:") {
            avg_sets = rest.trim().parse::<f64>().ok();
        }
    }

    Some(ParsedCounts { set_counts, prob_no_sets, avg_sets })
}
