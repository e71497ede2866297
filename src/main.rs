/// Generate datasets of random Set tables and count their sets
///
/// CLI Usage:
///   set_dataset generate --cards 12 --attributes 4 --tables 1000 --seed 31
///   set_dataset sweep --attributes 4 --tables 1000 --min-cards 1 --max-cards 14
///   set_dataset compare --cards 40 --attributes 4 --tables 10
///   set_dataset find --rows "1,0,-1; 0,1,-1; -1,-1,-1; 1,0,1"

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use set_dataset::compare::cross_check;
use set_dataset::dataset::*;
use set_dataset::filenames::*;
use set_dataset::find_sets::*;
use set_dataset::io_helpers::save_json;
use set_dataset::sweep::*;
use set_dataset::table::Table;
use set_dataset::utils::*;

#[derive(Parser, Debug)]
#[command(name = "set_dataset")]
#[command(about = "Random Set tables and their sets, as datasets", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print internal details of the searches
    #[arg(long, global = true)]
    debug: bool,

    /// Only print progress and results
    #[arg(long, global = true)]
    quiet: bool,

    /// Also write the output to a timestamped log file
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of random tables and write it as text
    Generate {
        /// Number of cards per table
        #[arg(short, long, default_value_t = 12)]
        cards: usize,

        /// Number of attributes per card
        #[arg(short, long, default_value_t = 4)]
        attributes: usize,

        /// Number of tables
        #[arg(short, long, default_value_t = 1000)]
        tables: usize,

        /// Seed for reproducible tables (OS entropy if absent)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_path: String,

        #[arg(long, value_enum, default_value_t = Algorithm::Optimized)]
        algorithm: Algorithm,

        /// Print every set found
        #[arg(long)]
        print_sets: bool,
    },

    /// Generate one dataset per card count and save a JSON summary
    Sweep {
        #[arg(short, long, default_value_t = 4)]
        attributes: usize,

        #[arg(short, long, default_value_t = 1000)]
        tables: usize,

        #[arg(long, default_value_t = 1)]
        min_cards: usize,

        #[arg(long, default_value_t = 14)]
        max_cards: usize,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = ".")]
        output_path: String,

        #[arg(long, value_enum, default_value_t = Algorithm::Optimized)]
        algorithm: Algorithm,
    },

    /// Time both searches on random tables and check they agree
    Compare {
        #[arg(short, long, default_value_t = 12)]
        cards: usize,

        #[arg(short, long, default_value_t = 4)]
        attributes: usize,

        #[arg(short, long, default_value_t = 1)]
        tables: usize,

        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Find the sets of a table given on the command line
    Find {
        /// Rows separated by ';', values by ',' (e.g. "1,0,-1; 0,1,-1")
        #[arg(short, long, allow_hyphen_values = true)]
        rows: String,

        #[arg(long, value_enum, default_value_t = Algorithm::Optimized)]
        algorithm: Algorithm,

        /// Stop at the first set found
        #[arg(long)]
        first_only: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug {
        debug_print_on();
    }
    if args.quiet {
        test_print_off();
    }
    if args.log {
        let base = match &args.command {
            Command::Generate { output_path, .. } | Command::Sweep { output_path, .. } =>
                output_path.as_str(),
            _ => ".",
        };
        init_log_file(base);
    }

    banner("Set dataset generation");

    let result = match args.command {
        Command::Generate { cards, attributes, tables, seed, output_path, algorithm,
            print_sets } => {
            let config = DatasetConfig {
                num_cards: cards,
                num_attributes: attributes,
                num_tables: tables,
                seed,
                algorithm,
                print_sets,
            };
            run_generate(&config, &output_path)
        }
        Command::Sweep { attributes, tables, min_cards, max_cards, seed, output_path,
            algorithm } => {
            let config = SweepConfig {
                num_attributes: attributes,
                num_tables: tables,
                min_cards,
                max_cards,
                seed,
                algorithm,
            };
            run_sweep_and_save(&config, &output_path)
        }
        Command::Compare { cards, attributes, tables, seed } => {
            return run_compare(cards, attributes, tables, seed);
        }
        Command::Find { rows, algorithm, first_only } => run_find(&rows, algorithm, first_only),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run_generate(config: &DatasetConfig, output_path: &str) -> Result<(), DatasetError> {
    test_print(&format!("Generating {} tables of {} cards with {} attributes ({:?})",
        fmt_count(config.num_tables), config.num_cards, config.num_attributes,
        config.algorithm));
    if let Some(seed) = config.seed {
        test_print(&format!("   seed: {}", seed));
    }

    let start = Instant::now();
    let dataset = generate_dataset(config)?;
    let elapsed = start.elapsed().as_secs_f64();

    let filename = dataset_filename(output_path, config.num_cards, config.num_attributes,
        config.num_tables);
    write_dataset(&dataset, Path::new(&filename))?;

    let stats = dataset.stats();
    progress_print(&format!("Tables with 0 sets: {}/{} ({:.2}%)",
        fmt_count(stats.tables_without_sets), fmt_count(stats.num_tables),
        stats.probability_no_set));
    progress_print(&format!("Average number of sets: {:.4} (max {})",
        stats.average_sets, stats.max_sets));
    progress_print(&format!("Execution time: {:.3} seconds", elapsed));
    Ok(())
}

fn run_sweep_and_save(config: &SweepConfig, output_path: &str) -> Result<(), DatasetError> {
    let start = Instant::now();
    let results = run_sweep(config)?;
    let filename = sweep_filename(output_path, config.num_attributes);
    save_json(&results, &filename)?;
    progress_print(&format!("Sweep of {} card counts saved to {} in {:.3} seconds",
        results.entries.len(), filename, start.elapsed().as_secs_f64()));
    Ok(())
}

fn run_compare(cards: usize, attributes: usize, tables: usize, seed: Option<u64>) -> ExitCode {
    let mut mismatches = 0usize;
    let mut optimized_total = 0.0;
    let mut brute_total = 0.0;

    for t in 0..tables {
        let table = match Table::random(cards, attributes, seed.map(|s| s.wrapping_add(t as u64))) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(1);
            }
        };
        let check = cross_check(&table);
        optimized_total += check.optimized_secs;
        brute_total += check.brute_secs;
        if !check.agree {
            mismatches += 1;
        }
        test_print(&format!("table {:>4}: {} sets, optimized {:.6}s, brute {:.6}s, x{:.1}{}",
            t, check.optimized.len(), check.optimized_secs, check.brute_secs,
            check.speedup(), if check.agree { "" } else { "  MISMATCH" }));
    }

    progress_print(&format!("Execution time optimized: {:.6} seconds", optimized_total));
    progress_print(&format!("Execution time brute: {:.6} seconds", brute_total));
    if mismatches > 0 {
        eprintln!("Error: {} table(s) where the searches disagree", mismatches);
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}

fn run_find(rows: &str, algorithm: Algorithm, first_only: bool) -> Result<(), DatasetError> {
    let table = Table::parse(rows)?;
    test_print(&format!("Table ({} cards, {} attributes):\n{}",
        table.row_count(), table.column_count(), table));
    let mut options = FindOptions::default().printing();
    if first_only {
        options.mode = SearchMode::FirstOnly;
    }
    let sets = find_sets_with(&table, algorithm, options);
    for triple in &sets {
        progress_print(&format!("{} {} {}", triple[0], triple[1], triple[2]));
    }
    Ok(())
}
