use super::types::{WinsRow, WinsTable};
use crate::config::ensure_parent_dir;
use crate::league::TeamId;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

const WINS_FILE_VERSION: u32 = 1;

#[derive(Debug, Deserialize, Serialize)]
struct WinsFile {
    version: u32,
    #[serde(flatten)]
    table: WinsTable,
}

/// One line of the append-only wins history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryRow {
    pub team_id: TeamId,
    pub wins: u32,
    pub as_of: DateTime<Utc>,
}

/// Load the wins snapshot from a JSON file
///
/// If the file doesn't exist, returns an empty table (every team scores 0 wins).
/// If the file exists but has an unsupported version, returns an error.
pub fn load_wins(path: &Path) -> Result<WinsTable> {
    if !path.exists() {
        return Ok(WinsTable::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open wins snapshot at {}", path.display()))?;

    let stored: WinsFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load wins snapshot from {}", path.display()))?;

    if stored.version != WINS_FILE_VERSION {
        anyhow::bail!("Unsupported wins snapshot version: {}", stored.version);
    }

    Ok(stored.table)
}

/// Save the wins snapshot atomically, so a reader never sees a half-written table
pub fn save_wins(path: &Path, table: &WinsTable) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    let stored = WinsFile {
        version: WINS_FILE_VERSION,
        table: table.clone(),
    };
    serde_json::to_writer_pretty(&mut file, &stored).context("Failed to serialize wins snapshot")?;

    file.commit().context("Failed to save wins snapshot")?;

    Ok(())
}

/// Append one history line per row, all stamped with `as_of`
pub fn append_history(path: &Path, rows: &[WinsRow], as_of: DateTime<Utc>) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open wins history at {}", path.display()))?;

    let mut buf = Vec::new();
    for row in rows {
        let line = HistoryRow {
            team_id: row.team_id.clone(),
            wins: row.wins,
            as_of,
        };
        serde_json::to_writer(&mut buf, &line).context("Failed to serialize history row")?;
        buf.push(b'\n');
    }

    file.write_all(&buf)
        .with_context(|| format!("Failed to append wins history at {}", path.display()))?;

    Ok(())
}

/// Read the whole wins history. Missing file means no history yet.
pub fn load_history(path: &Path) -> Result<Vec<HistoryRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open wins history at {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.context("Failed to read wins history")?;
        if line.trim().is_empty() {
            continue;
        }
        let row: HistoryRow = serde_json::from_str(&line)
            .with_context(|| format!("Invalid wins history line {}", i + 1))?;
        rows.push(row);
    }

    Ok(rows)
}
