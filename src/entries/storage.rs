use super::types::EntryLog;
use crate::config::ensure_parent_dir;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::Path;

/// Load the entry log from a JSON file
///
/// If the file doesn't exist, returns a new empty log.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_entries(path: &Path) -> Result<EntryLog> {
    if !path.exists() {
        return Ok(EntryLog::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open entries file at {}", path.display()))?;

    let log: EntryLog = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load entries from {}", path.display()))?;

    if log.version != 1 {
        anyhow::bail!("Unsupported entries file version: {}", log.version);
    }

    Ok(log)
}

/// Save the entry log to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_entries(path: &Path, log: &EntryLog) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, log).context("Failed to serialize entries")?;

    file.commit().context("Failed to save entries")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::Entry;
    use crate::league::Preset;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("nba_pool_test_entries_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let log = load_entries(&temp_path).unwrap();
        assert_eq!(log.version, 1);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("nba_pool_test_entries_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut log = EntryLog::new();
        log.submit(Entry::new("Sam", Preset::LastSeason.picks()));
        log.submit(Entry::new("Riley", Preset::Alphabetical.picks()));

        save_entries(&temp_path, &log).unwrap();
        let loaded = load_entries(&temp_path).unwrap();

        assert_eq!(loaded.entries, log.entries);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = env::temp_dir().join("nba_pool_test_entries_dir");
        let _ = std::fs::remove_dir_all(&dir);
        let temp_path = dir.join("pool").join("entries.json");

        let mut log = EntryLog::new();
        log.submit(Entry::new("Sam", Preset::LastSeason.picks()));
        save_entries(&temp_path, &log).unwrap();

        assert_eq!(load_entries(&temp_path).unwrap().entries.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_path = env::temp_dir().join("nba_pool_test_entries_version.json");
        std::fs::write(&temp_path, r#"{"version": 2, "entries": []}"#).unwrap();

        let err = load_entries(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported entries file version"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
