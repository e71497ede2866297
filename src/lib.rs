//! Synthetic datasets for the card game Set
//!
//! Cards are rows of ternary attributes (-1, 0, 1). Three cards form a set
//! when, for every attribute, their values are all equal or all different,
//! i.e. when every attribute sums to -3, 0 or 3.
//!
//! The crate draws random tables of distinct cards, enumerates their sets
//! with a partitioned O(n²) search (checked against an O(n³) brute force),
//! and writes datasets of set counts for statistical analysis.
//!
//! ```
//! use set_dataset::{Algorithm, Table};
//! use set_dataset::find_sets::count_sets;
//!
//! let table = Table::parse("1,0,-1; 0,1,-1; -1,-1,-1; 1,0,1").unwrap();
//! assert_eq!(count_sets(&table, Algorithm::Optimized), 1);
//! assert_eq!(count_sets(&table, Algorithm::Brute), 1);
//! ```

pub mod error;
pub mod ternary;
pub mod table;
pub mod find_sets;
pub mod find_sets_brute;
pub mod dataset;
pub mod sweep;
pub mod compare;
pub mod filenames;
pub mod io_helpers;
pub mod utils;

pub use error::TableError;
pub use find_sets::{Algorithm, FindOptions, SearchMode, Triple};
pub use table::Table;
