/// Print switches and log file shared by the whole program
///
/// Two process-wide switches control the output:
///     - 'debug' prints internal details of the searches (off by default)
///     - 'test' prints the normal progress report (on by default)
/// The switches are AtomicBool so that any module can read them without
/// passing a context around.
///
/// Once `init_log_file` has been called, every 'test' and 'progress' message
/// is also appended to a timestamped log file.

use std::fs::{self, OpenOptions};
use std::io::{Write, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use separator::Separatable;

static DEBUG_FLAG: AtomicBool = AtomicBool::new(false);
static TEST_FLAG: AtomicBool = AtomicBool::new(true);

static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Open `log_set_dataset_<timestamp>.txt` in `base_path`, creating the
/// directory if needed.
/// Returns the file path, or None if it could not be created (logging then
/// goes on without file).
pub fn init_log_file(base_path: &str) -> Option<String> {
    let now = chrono::Local::now();
    let filename = format!("log_set_dataset_{}.txt", now.format("%Y-%m-%d_%H-%M-%S"));
    let path = Path::new(base_path).join(filename);
    let path_str = path.to_string_lossy().to_string();

    if let Err(e) = fs::create_dir_all(base_path) {
        eprintln!("Warning: could not create log directory {}: {}", base_path, e);
        return None;
    }
    match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(file);
            }
            eprintln!("Log file created: {}", path_str);
            Some(path_str)
        }
        Err(e) => {
            eprintln!("Warning: could not create log file {}: {}", path_str, e);
            None
        }
    }
}

fn write_to_log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", msg);
        }
    }
}

pub fn debug_print_on() {
    DEBUG_FLAG.store(true, Ordering::Relaxed);
}

pub fn debug_print_off() {
    DEBUG_FLAG.store(false, Ordering::Relaxed);
}

pub fn test_print_on() {
    TEST_FLAG.store(true, Ordering::Relaxed);
}

pub fn test_print_off() {
    TEST_FLAG.store(false, Ordering::Relaxed);
}

pub fn debug_print(msg: &str) {
    if DEBUG_FLAG.load(Ordering::Relaxed) {
        eprintln!("debug: {}", msg);
    }
}

pub fn test_print(msg: &str) {
    if TEST_FLAG.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
    write_to_log(msg);
}

/// Progress output for long runs: stdout, flushed, and logged
pub fn progress_print(msg: &str) {
    println!("{}", msg);
    let _ = stdout().flush();
    write_to_log(msg);
}

/// Centred title between two lines of '=', 80 columns wide
pub fn banner(msg: &str) {
    test_print(&banner_string(msg));
}

fn banner_string(msg: &str) -> String {
    const BANNER_WIDTH: usize = 80;
    let title: String = msg.chars().take(BANNER_WIDTH).collect();
    let total_padding = BANNER_WIDTH - title.chars().count();
    let left_padding = total_padding / 2;
    let right_padding = total_padding - left_padding;
    let line = "=".repeat(BANNER_WIDTH);
    format!("\n{}\n{}{}{}\n{}\n",
        line, " ".repeat(left_padding), title, " ".repeat(right_padding), line)
}

/// Count with thousands separators
pub fn fmt_count<N: Separatable>(n: N) -> String {
    n.separated_string()
}
