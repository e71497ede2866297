use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::debug_print;

/// Atomically write text to `path` by writing a temp file, fsyncing, then
/// renaming into place. Missing parent directories are created.
pub fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    let mut f = File::create(&tmp)?;
    f.write_all(text.as_bytes())?;
    f.sync_all()?;
    if path.exists() {
        let _ = fs::remove_file(path);
    }
    fs::rename(&tmp, path)?;
    debug_print(&format!("write_text_atomic: wrote {} bytes to {}",
        text.len(), path.display()));
    Ok(())
}

/// Save a value as pretty JSON (atomic)
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    write_text_atomic(path.as_ref(), &text)
}

pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> io::Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(file)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("set_dataset_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_text_atomic_overwrites() {
        let path = temp_path("atomic.txt");
        write_text_atomic(&path, "first").unwrap();
        write_text_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_json_roundtrip() {
        let path = temp_path("values.json");
        let values: Vec<u32> = vec![3, 1, 4, 1, 5];
        save_json(&values, &path).unwrap();
        let loaded: Vec<u32> = load_json(&path).unwrap();
        assert_eq!(loaded, values);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_json_missing_file() {
        let res: io::Result<Vec<u32>> = load_json(temp_path("does_not_exist.json"));
        assert!(res.is_err());
    }
}
