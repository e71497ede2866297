//! Output filenames
//!
//! Dataset format: sets_{cards:02}cards_{attributes:02}attr_{tables:06}tables.txt
//! Sweep format:   set_results_{attributes:02}attr.json

use std::path::Path;

/// Path of the text dataset for one (cards, attributes, tables) configuration
pub fn dataset_filename(base_path: &str, num_cards: usize, num_attributes: usize,
    num_tables: usize) -> String {
    let filename = format!("sets_{:02}cards_{:02}attr_{:06}tables.txt",
        num_cards, num_attributes, num_tables);
    Path::new(base_path).join(filename).to_string_lossy().to_string()
}

/// Path of the JSON summary of a card-count sweep
pub fn sweep_filename(base_path: &str, num_attributes: usize) -> String {
    let filename = format!("set_results_{:02}attr.json", num_attributes);
    Path::new(base_path).join(filename).to_string_lossy().to_string()
}
