use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# nba-pool configuration

scoring:
  # weighted: wins x (16 - predicted rank), summed over both conferences
  # distance: 5/3/1 points for a predicted rank 0/1/2 places off the actual finish
  mode: weighted
  # Final standings for distance mode. Without it the order is taken from current wins.
  # actual_path: ~/.config/nba-pool/final-standings.json

# storage:
#   entries_path: ~/.config/nba-pool/entries.json
#   wins_path: ~/.config/nba-pool/wins.json
#   history_path: ~/.config/nba-pool/wins-history.jsonl

feed:
  stale_after: "12h"
  retries: 3
  history: true
"#;

/// Write a starter config file.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    super::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(DEFAULT_CONFIG.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}
